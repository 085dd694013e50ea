//! Lattice noise with analytic derivatives
//!
//! Noise is evaluated four points at a time. A [`Point4`] carries the x, y
//! and z coordinates of four points in separate lanes and a [`Sample4`]
//! carries the resulting values and partial derivatives lane by lane.
//!
//! A noise variant is a zero-sized type implementing [`Noise`], assembled
//! from a lattice dimension, a lattice kind and a gradient kernel:
//!
//! ```rust
//! use procedural_meshes::noise::*;
//! use procedural_meshes::{NoiseSettings, Vec3};
//!
//! type Perlin3 = Lattice3D<LatticeNormal, Perlin>;
//!
//! let points = Point4::from_points([Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z]);
//! let sample = fractal_noise4::<Perlin3>(points, &NoiseSettings::default());
//! assert!(sample.v.abs().max_element() <= 1.0);
//! ```

mod domain;
mod gradient;
mod job;
mod lattice;

use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::{Affine3A, Mat3, Vec3, Vec4};

use crate::config::NoiseSettings;
use crate::hash::{SmallXXHash, SmallXXHash4};

pub use domain::SpaceTrs;
pub use gradient::{
    BaseGradients, Gradient, Perlin, Simplex, Smoothstep, Turbulence, Value,
};
pub use job::{FractalFn, NoiseJob, NoiseSelection, NoiseType};
pub use lattice::{
    Lattice, Lattice1D, Lattice2D, Lattice3D, LatticeNormal, LatticeSpan4, LatticeTiling,
};

/// One noise sample with its partial derivatives
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub v: f32,
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
}

impl Sample {
    /// Partial derivatives as a gradient vector
    pub fn derivatives(&self) -> Vec3 {
        Vec3::new(self.dx, self.dy, self.dz)
    }
}

/// Four noise samples, one per lane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample4 {
    pub v: Vec4,
    pub dx: Vec4,
    pub dy: Vec4,
    pub dz: Vec4,
}

impl Sample4 {
    /// Sample with the given values and zero derivatives
    pub fn from_value(v: Vec4) -> Self {
        Self {
            v,
            ..Default::default()
        }
    }

    /// Apply `3v² - 2v³` to the value, scaling derivatives by the chain rule
    pub fn smoothstep(self) -> Self {
        let d = 6.0 * self.v * (Vec4::ONE - self.v);
        Self {
            v: self.v * self.v * (Vec4::splat(3.0) - 2.0 * self.v),
            dx: self.dx * d,
            dy: self.dy * d,
            dz: self.dz * d,
        }
    }

    /// Partial derivatives of the four lanes, transposed into lanes
    pub fn derivatives(&self) -> Point4 {
        Point4 {
            x: self.dx,
            y: self.dy,
            z: self.dz,
        }
    }

    /// Extract a single lane
    pub fn lane(&self, index: usize) -> Sample {
        Sample {
            v: self.v[index],
            dx: self.dx[index],
            dy: self.dy[index],
            dz: self.dz[index],
        }
    }

    pub(crate) fn scale_derivatives(self, factor: f32) -> Self {
        Self {
            v: self.v,
            dx: self.dx * factor,
            dy: self.dy * factor,
            dz: self.dz * factor,
        }
    }
}

impl Add for Sample4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            v: self.v + rhs.v,
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
            dz: self.dz + rhs.dz,
        }
    }
}

impl Sub for Sample4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            v: self.v - rhs.v,
            dx: self.dx - rhs.dx,
            dy: self.dy - rhs.dy,
            dz: self.dz - rhs.dz,
        }
    }
}

impl Neg for Sample4 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            v: -self.v,
            dx: -self.dx,
            dy: -self.dy,
            dz: -self.dz,
        }
    }
}

impl Mul<f32> for Sample4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            v: self.v * rhs,
            dx: self.dx * rhs,
            dy: self.dy * rhs,
            dz: self.dz * rhs,
        }
    }
}

impl Mul<Vec4> for Sample4 {
    type Output = Self;

    fn mul(self, rhs: Vec4) -> Self {
        Self {
            v: self.v * rhs,
            dx: self.dx * rhs,
            dy: self.dy * rhs,
            dz: self.dz * rhs,
        }
    }
}

impl Div<f32> for Sample4 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        self * (1.0 / rhs)
    }
}

/// Four points with their coordinates split into lanes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point4 {
    pub x: Vec4,
    pub y: Vec4,
    pub z: Vec4,
}

impl Point4 {
    /// Transpose four points into lanes
    pub fn from_points(points: [Vec3; 4]) -> Self {
        Self {
            x: Vec4::new(points[0].x, points[1].x, points[2].x, points[3].x),
            y: Vec4::new(points[0].y, points[1].y, points[2].y, points[3].y),
            z: Vec4::new(points[0].z, points[1].z, points[2].z, points[3].z),
        }
    }

    /// The same point in all four lanes
    pub fn splat(point: Vec3) -> Self {
        Self {
            x: Vec4::splat(point.x),
            y: Vec4::splat(point.y),
            z: Vec4::splat(point.z),
        }
    }

    /// Point stored in one lane
    pub fn point(&self, index: usize) -> Vec3 {
        Vec3::new(self.x[index], self.y[index], self.z[index])
    }

    /// All four points
    pub fn to_points(&self) -> [Vec3; 4] {
        [self.point(0), self.point(1), self.point(2), self.point(3)]
    }

    /// Apply an affine transform to all four points
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let m = &transform.matrix3;
        let t = transform.translation;
        Self {
            x: m.x_axis.x * self.x + m.y_axis.x * self.y + m.z_axis.x * self.z + t.x,
            y: m.x_axis.y * self.x + m.y_axis.y * self.y + m.z_axis.y * self.z + t.y,
            z: m.x_axis.z * self.x + m.y_axis.z * self.y + m.z_axis.z * self.z + t.z,
        }
    }

    /// Apply a linear transform to all four lanes, treating them as vectors
    pub fn transformed_vectors(&self, matrix: &Mat3) -> Self {
        Self {
            x: matrix.x_axis.x * self.x + matrix.y_axis.x * self.y + matrix.z_axis.x * self.z,
            y: matrix.x_axis.y * self.x + matrix.y_axis.y * self.y + matrix.z_axis.y * self.z,
            z: matrix.x_axis.z * self.x + matrix.y_axis.z * self.y + matrix.z_axis.z * self.z,
        }
    }
}

/// A lattice noise evaluated four points at a time
///
/// `positions` are already in noise space. The returned derivatives are with
/// respect to those positions, so they include the factor `frequency`.
pub trait Noise: Send + Sync + 'static {
    fn noise4(positions: Point4, hash: SmallXXHash4, frequency: u32) -> Sample4;
}

// ============================================================================
// FRACTAL SUMMATION
// ============================================================================

/// Sum `settings.octaves` octaves of `N` and normalise by total amplitude
///
/// Octave `k` samples with the seed hash offset by `k`, frequency
/// `frequency * lacunarity^k` and amplitude `persistence^k`.
pub fn fractal_noise4<N: Noise>(positions: Point4, settings: &NoiseSettings) -> Sample4 {
    let hash = SmallXXHash4::splat(SmallXXHash::seed(settings.seed));
    let mut frequency = settings.frequency;
    let mut amplitude = 1.0;
    let mut amplitude_sum = 0.0;
    let mut sum = Sample4::default();

    for octave in 0..settings.octaves {
        sum = sum + N::noise4(positions, hash + octave as i32, frequency) * amplitude;
        amplitude_sum += amplitude;
        frequency = frequency.saturating_mul(settings.lacunarity);
        amplitude *= settings.persistence;
    }

    sum / amplitude_sum
}

/// Fractal noise for a single point
pub fn fractal_noise<N: Noise>(position: Vec3, settings: &NoiseSettings) -> Sample {
    fractal_noise4::<N>(Point4::splat(position), settings).lane(0)
}

// Lane-wise helpers shared by the lattice and gradient code.

pub(crate) fn lerp4(a: Vec4, b: Vec4, t: Vec4) -> Vec4 {
    a + (b - a) * t
}

pub(crate) fn sqrt4(v: Vec4) -> Vec4 {
    Vec4::from_array(v.to_array().map(f32::sqrt))
}
