//! Lattice spans and the 1D/2D/3D lattice noise assemblies
//!
//! A lattice maps a coordinate to the two integer lattice points around it
//! plus the offsets from each. Interpolation between corner samples uses the
//! quintic fade so values and first derivatives are continuous across cells.

use std::marker::PhantomData;

use glam::{IVec4, Vec4};

use super::gradient::Gradient;
use super::{lerp4, Noise, Point4, Sample4};
use crate::hash::SmallXXHash4;

/// Lattice points and offsets around four coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatticeSpan4 {
    /// Lower lattice point
    pub p0: IVec4,
    /// Upper lattice point
    pub p1: IVec4,
    /// Offset from `p0`
    pub g0: Vec4,
    /// Offset from `p1` (always `g0 - 1`)
    pub g1: Vec4,
    /// Faded interpolation weight
    pub t: Vec4,
    /// Derivative of the fade with respect to the scaled coordinate
    pub dt: Vec4,
}

/// How coordinates are mapped onto lattice points
pub trait Lattice: Send + Sync + 'static {
    /// Span around `coordinates * frequency`
    fn span4(coordinates: Vec4, frequency: u32) -> LatticeSpan4;

    /// Bring a point that stepped at most one cell outside `[0, frequency)`
    /// back into the lattice
    fn validate_single_step(points: IVec4, frequency: u32) -> IVec4;
}

/// Unbounded lattice
#[derive(Debug, Clone, Copy, Default)]
pub struct LatticeNormal;

/// Lattice that wraps every `frequency` cells, so noise tiles with period 1
#[derive(Debug, Clone, Copy, Default)]
pub struct LatticeTiling;

fn fade(t: Vec4) -> Vec4 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn fade_derivative(t: Vec4) -> Vec4 {
    t * t * (t * (t * 30.0 - 60.0) + 30.0)
}

fn span_from(coordinates: Vec4, frequency: u32) -> LatticeSpan4 {
    let scaled = coordinates * frequency as f32;
    let floor = scaled.floor();
    let g0 = scaled - floor;
    LatticeSpan4 {
        p0: floor.as_ivec4(),
        p1: floor.as_ivec4().wrapping_add(IVec4::ONE),
        g0,
        g1: g0 - Vec4::ONE,
        t: fade(g0),
        dt: fade_derivative(g0),
    }
}

impl Lattice for LatticeNormal {
    fn span4(coordinates: Vec4, frequency: u32) -> LatticeSpan4 {
        span_from(coordinates, frequency)
    }

    fn validate_single_step(points: IVec4, _frequency: u32) -> IVec4 {
        points
    }
}

/// Tiling period in lattice cells, kept within the `i32` lattice range
fn lattice_period(frequency: u32) -> i32 {
    frequency.clamp(1, i32::MAX as u32) as i32
}

impl Lattice for LatticeTiling {
    fn span4(coordinates: Vec4, frequency: u32) -> LatticeSpan4 {
        let mut span = span_from(coordinates, frequency);
        let f = lattice_period(frequency);
        span.p0 = IVec4::from_array(span.p0.to_array().map(|p| p.rem_euclid(f)));
        span.p1 = Self::validate_single_step(span.p0 + IVec4::ONE, frequency);
        span
    }

    fn validate_single_step(points: IVec4, frequency: u32) -> IVec4 {
        let f = lattice_period(frequency);
        IVec4::from_array(points.to_array().map(|p| {
            if p == f {
                0
            } else if p == -1 {
                f - 1
            } else {
                p
            }
        }))
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

/// Interpolate two samples along one axis
///
/// Values and derivatives are lerped; the derivative along the interpolation
/// axis additionally picks up `(b.v - a.v) * dt` by the product rule.
fn lerp_along(a: Sample4, b: Sample4, t: Vec4, dt: Vec4, axis: Axis) -> Sample4 {
    let mut sample = Sample4 {
        v: lerp4(a.v, b.v, t),
        dx: lerp4(a.dx, b.dx, t),
        dy: lerp4(a.dy, b.dy, t),
        dz: lerp4(a.dz, b.dz, t),
    };
    let slope = (b.v - a.v) * dt;
    match axis {
        Axis::X => sample.dx += slope,
        Axis::Y => sample.dy += slope,
        Axis::Z => sample.dz += slope,
    }
    sample
}

/// Lattice noise along x
pub struct Lattice1D<L, G>(PhantomData<(L, G)>);

/// Lattice noise on the xz plane
pub struct Lattice2D<L, G>(PhantomData<(L, G)>);

/// Lattice noise in 3D space
pub struct Lattice3D<L, G>(PhantomData<(L, G)>);

impl<L: Lattice, G: Gradient> Noise for Lattice1D<L, G> {
    fn noise4(positions: Point4, hash: SmallXXHash4, frequency: u32) -> Sample4 {
        let x = L::span4(positions.x, frequency);

        let a = G::evaluate1(hash.eat(x.p0), x.g0);
        let b = G::evaluate1(hash.eat(x.p1), x.g1);

        let sample = lerp_along(a, b, x.t, x.dt, Axis::X);
        G::evaluate_after_interpolation(sample.scale_derivatives(frequency as f32))
    }
}

impl<L: Lattice, G: Gradient> Noise for Lattice2D<L, G> {
    fn noise4(positions: Point4, hash: SmallXXHash4, frequency: u32) -> Sample4 {
        let x = L::span4(positions.x, frequency);
        let z = L::span4(positions.z, frequency);
        let h0 = hash.eat(x.p0);
        let h1 = hash.eat(x.p1);

        let low = lerp_along(
            G::evaluate2(h0.eat(z.p0), x.g0, z.g0),
            G::evaluate2(h0.eat(z.p1), x.g0, z.g1),
            z.t,
            z.dt,
            Axis::Z,
        );
        let high = lerp_along(
            G::evaluate2(h1.eat(z.p0), x.g1, z.g0),
            G::evaluate2(h1.eat(z.p1), x.g1, z.g1),
            z.t,
            z.dt,
            Axis::Z,
        );

        let sample = lerp_along(low, high, x.t, x.dt, Axis::X);
        G::evaluate_after_interpolation(sample.scale_derivatives(frequency as f32))
    }
}

impl<L: Lattice, G: Gradient> Noise for Lattice3D<L, G> {
    fn noise4(positions: Point4, hash: SmallXXHash4, frequency: u32) -> Sample4 {
        let x = L::span4(positions.x, frequency);
        let y = L::span4(positions.y, frequency);
        let z = L::span4(positions.z, frequency);

        let column = |hxy: SmallXXHash4, gx: Vec4, gy: Vec4| {
            lerp_along(
                G::evaluate3(hxy.eat(z.p0), gx, gy, z.g0),
                G::evaluate3(hxy.eat(z.p1), gx, gy, z.g1),
                z.t,
                z.dt,
                Axis::Z,
            )
        };
        let face = |hx: SmallXXHash4, gx: Vec4| {
            lerp_along(
                column(hx.eat(y.p0), gx, y.g0),
                column(hx.eat(y.p1), gx, y.g1),
                y.t,
                y.dt,
                Axis::Y,
            )
        };

        let sample = lerp_along(
            face(hash.eat(x.p0), x.g0),
            face(hash.eat(x.p1), x.g1),
            x.t,
            x.dt,
            Axis::X,
        );
        G::evaluate_after_interpolation(sample.scale_derivatives(frequency as f32))
    }
}
