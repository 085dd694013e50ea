//! Gradient kernels evaluated at lattice corners
//!
//! A kernel turns a corner hash and the offset from that corner into a
//! sample. Wrappers like [`Turbulence`] and [`Smoothstep`] post-process the
//! interpolated result of an inner kernel.

use std::marker::PhantomData;

use glam::Vec4;

use super::{sqrt4, Sample4};
use crate::hash::SmallXXHash4;

/// Per-corner kernel of a lattice noise
pub trait Gradient: Send + Sync + 'static {
    /// Kernel along x
    fn evaluate1(hash: SmallXXHash4, x: Vec4) -> Sample4;

    /// Kernel on the xz plane (`z` is the second lattice axis)
    fn evaluate2(hash: SmallXXHash4, x: Vec4, z: Vec4) -> Sample4;

    /// Kernel in 3D
    fn evaluate3(hash: SmallXXHash4, x: Vec4, y: Vec4, z: Vec4) -> Sample4;

    /// Post-process the interpolated sample
    fn evaluate_after_interpolation(value: Sample4) -> Sample4;
}

// ============================================================================
// BASE GRADIENT VECTORS
// ============================================================================

/// Gradient vectors picked from hash bits
///
/// `line` has magnitudes in `[1, 2]`, `square` and `octahedron` distribute
/// vectors over the outline of a diamond and an octahedron. `circle` and
/// `sphere` are their normalised versions.
pub struct BaseGradients;

impl BaseGradients {
    pub fn line(hash: SmallXXHash4, x: Vec4) -> Sample4 {
        let positive = hash.get_bits(1, 8).as_vec4().cmpeq(Vec4::ZERO);
        let l = (Vec4::ONE + hash.floats01_a()) * Vec4::select(positive, Vec4::ONE, -Vec4::ONE);
        Sample4 {
            v: l * x,
            dx: l,
            ..Default::default()
        }
    }

    fn square_vectors(hash: SmallXXHash4) -> (Vec4, Vec4) {
        let c0 = hash.floats01_a() * 2.0 - Vec4::ONE;
        let c1 = Vec4::splat(0.5) - c0.abs();
        let c0 = c0 - (c0 + Vec4::splat(0.5)).floor();
        (c0, c1)
    }

    fn octahedron_vectors(hash: SmallXXHash4) -> (Vec4, Vec4, Vec4) {
        let gx = hash.floats01_a() * 2.0 - Vec4::ONE;
        let gy = hash.floats01_d() * 2.0 - Vec4::ONE;
        let gz = Vec4::ONE - gx.abs() - gy.abs();
        let offset = (-gz).max(Vec4::ZERO);
        let shift = |g: Vec4| g + Vec4::select(g.cmplt(Vec4::ZERO), offset, -offset);
        (shift(gx), shift(gy), gz)
    }

    pub fn square(hash: SmallXXHash4, x: Vec4, z: Vec4) -> Sample4 {
        let (gx, gz) = Self::square_vectors(hash);
        Sample4 {
            v: gx * x + gz * z,
            dx: gx,
            dz: gz,
            ..Default::default()
        }
    }

    pub fn circle(hash: SmallXXHash4, x: Vec4, z: Vec4) -> Sample4 {
        let (gx, gz) = Self::square_vectors(hash);
        let inverse_length = Vec4::ONE / sqrt4(gx * gx + gz * gz);
        Sample4 {
            v: gx * x + gz * z,
            dx: gx,
            dz: gz,
            ..Default::default()
        } * inverse_length
    }

    pub fn octahedron(hash: SmallXXHash4, x: Vec4, y: Vec4, z: Vec4) -> Sample4 {
        let (gx, gy, gz) = Self::octahedron_vectors(hash);
        Sample4 {
            v: gx * x + gy * y + gz * z,
            dx: gx,
            dy: gy,
            dz: gz,
        }
    }

    pub fn sphere(hash: SmallXXHash4, x: Vec4, y: Vec4, z: Vec4) -> Sample4 {
        let (gx, gy, gz) = Self::octahedron_vectors(hash);
        let inverse_length = Vec4::ONE / sqrt4(gx * gx + gy * gy + gz * gz);
        Sample4 {
            v: gx * x + gy * y + gz * z,
            dx: gx,
            dy: gy,
            dz: gz,
        } * inverse_length
    }
}

// ============================================================================
// KERNELS
// ============================================================================

/// Constant value per corner in `[-1, 1]`
#[derive(Debug, Clone, Copy, Default)]
pub struct Value;

/// Perlin gradient noise, scaled to span `[-1, 1]`
#[derive(Debug, Clone, Copy, Default)]
pub struct Perlin;

/// Gradient kernel using normalised vectors and simplex scaling factors
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplex;

/// Absolute value of the inner noise
pub struct Turbulence<G>(PhantomData<G>);

/// Inner noise remapped by `3v² - 2v³`
pub struct Smoothstep<G>(PhantomData<G>);

const PERLIN_2D_SCALE: f32 = 2.0 / 0.53528;
const PERLIN_3D_SCALE: f32 = 1.0 / 0.56290;
const SIMPLEX_1D_SCALE: f32 = 32.0 / 27.0;
const SIMPLEX_2D_SCALE: f32 = 5.832 / std::f32::consts::SQRT_2;
const SIMPLEX_3D_SCALE: f32 = 1024.0 / (125.0 * 1.732_050_8);

impl Value {
    fn corner(hash: SmallXXHash4) -> Sample4 {
        Sample4::from_value(hash.floats01_a() * 2.0 - Vec4::ONE)
    }
}

impl Gradient for Value {
    fn evaluate1(hash: SmallXXHash4, _x: Vec4) -> Sample4 {
        Self::corner(hash)
    }

    fn evaluate2(hash: SmallXXHash4, _x: Vec4, _z: Vec4) -> Sample4 {
        Self::corner(hash)
    }

    fn evaluate3(hash: SmallXXHash4, _x: Vec4, _y: Vec4, _z: Vec4) -> Sample4 {
        Self::corner(hash)
    }

    fn evaluate_after_interpolation(value: Sample4) -> Sample4 {
        value
    }
}

impl Gradient for Perlin {
    fn evaluate1(hash: SmallXXHash4, x: Vec4) -> Sample4 {
        BaseGradients::line(hash, x)
    }

    fn evaluate2(hash: SmallXXHash4, x: Vec4, z: Vec4) -> Sample4 {
        BaseGradients::square(hash, x, z) * PERLIN_2D_SCALE
    }

    fn evaluate3(hash: SmallXXHash4, x: Vec4, y: Vec4, z: Vec4) -> Sample4 {
        BaseGradients::octahedron(hash, x, y, z) * PERLIN_3D_SCALE
    }

    fn evaluate_after_interpolation(value: Sample4) -> Sample4 {
        value
    }
}

impl Gradient for Simplex {
    fn evaluate1(hash: SmallXXHash4, x: Vec4) -> Sample4 {
        BaseGradients::line(hash, x) * SIMPLEX_1D_SCALE
    }

    fn evaluate2(hash: SmallXXHash4, x: Vec4, z: Vec4) -> Sample4 {
        BaseGradients::circle(hash, x, z) * SIMPLEX_2D_SCALE
    }

    fn evaluate3(hash: SmallXXHash4, x: Vec4, y: Vec4, z: Vec4) -> Sample4 {
        BaseGradients::sphere(hash, x, y, z) * SIMPLEX_3D_SCALE
    }

    fn evaluate_after_interpolation(value: Sample4) -> Sample4 {
        value
    }
}

impl<G: Gradient> Gradient for Turbulence<G> {
    fn evaluate1(hash: SmallXXHash4, x: Vec4) -> Sample4 {
        G::evaluate1(hash, x)
    }

    fn evaluate2(hash: SmallXXHash4, x: Vec4, z: Vec4) -> Sample4 {
        G::evaluate2(hash, x, z)
    }

    fn evaluate3(hash: SmallXXHash4, x: Vec4, y: Vec4, z: Vec4) -> Sample4 {
        G::evaluate3(hash, x, y, z)
    }

    fn evaluate_after_interpolation(value: Sample4) -> Sample4 {
        let mut sample = G::evaluate_after_interpolation(value);
        let sign = Vec4::select(sample.v.cmplt(Vec4::ZERO), -Vec4::ONE, Vec4::ONE);
        sample.dx *= sign;
        sample.dy *= sign;
        sample.dz *= sign;
        sample.v = sample.v.abs();
        sample
    }
}

impl<G: Gradient> Gradient for Smoothstep<G> {
    fn evaluate1(hash: SmallXXHash4, x: Vec4) -> Sample4 {
        G::evaluate1(hash, x)
    }

    fn evaluate2(hash: SmallXXHash4, x: Vec4, z: Vec4) -> Sample4 {
        G::evaluate2(hash, x, z)
    }

    fn evaluate3(hash: SmallXXHash4, x: Vec4, y: Vec4, z: Vec4) -> Sample4 {
        G::evaluate3(hash, x, y, z)
    }

    fn evaluate_after_interpolation(value: Sample4) -> Sample4 {
        G::evaluate_after_interpolation(value).smoothstep()
    }
}
