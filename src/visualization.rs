//! Sample grids for hash and noise visualizers
//!
//! A visualizer places `resolution²` instances on a shape and colours them
//! by a hash or noise value. This module produces the instance positions
//! and the per-instance hashes; drawing them is up to the host.

use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::{Vec2, Vec3};
use log::debug;

use crate::error::Result;
use crate::hash::SmallXXHash;
use crate::jobs::JobScheduler;
use crate::mesh::checked_resolution;
use crate::noise::SpaceTrs;

/// Surface the visualizer instances are placed on
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    /// Unit square in the xz plane
    #[default]
    Plane,
    /// Sphere with radius 0.5
    UvSphere,
    /// Torus with major radius 0.375 and minor radius 0.125
    Torus,
}

/// Position and normal of one instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapePoint {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Plane, Shape::UvSphere, Shape::Torus];

    /// Point at grid coordinates `uv` in `[0, 1]²`
    pub fn point(self, uv: Vec2) -> ShapePoint {
        match self {
            Shape::Plane => ShapePoint {
                position: Vec3::new(uv.x - 0.5, 0.0, uv.y - 0.5),
                normal: Vec3::Y,
            },
            Shape::UvSphere => {
                let r = 0.5;
                let s = r * (PI * uv.y).sin();
                let position = Vec3::new(
                    s * (2.0 * PI * uv.x).sin(),
                    r * (PI * uv.y).cos(),
                    s * (2.0 * PI * uv.x).cos(),
                );
                ShapePoint {
                    position,
                    normal: position.normalize(),
                }
            }
            Shape::Torus => {
                let (r1, r2) = (0.375, 0.125);
                let s = r1 + r2 * (2.0 * PI * uv.y).cos();
                let (sin_u, cos_u) = (2.0 * PI * uv.x).sin_cos();
                let position = Vec3::new(s * sin_u, r2 * (2.0 * PI * uv.y).sin(), s * cos_u);
                let ring = Vec3::new(r1 * sin_u, 0.0, r1 * cos_u);
                ShapePoint {
                    position,
                    normal: (position - ring).normalize(),
                }
            }
        }
    }

    /// All `resolution²` points packed four per batch
    ///
    /// The last batch repeats its final point when `resolution²` is not a
    /// multiple of four.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn points(self, resolution: u32) -> Result<Vec<[ShapePoint; 4]>> {
        let resolution = checked_resolution(resolution)?;
        let count = (resolution as usize).pow(2);
        Ok((0..count.div_ceil(4))
            .map(|batch| {
                let index = |lane: usize| (4 * batch + lane).min(count - 1);
                [0, 1, 2, 3].map(|lane| self.point(grid_uv(index(lane), resolution)))
            })
            .collect())
    }

    /// Positions only, in the batch layout `NoiseJob` consumes
    pub fn positions(self, resolution: u32) -> Result<Vec<[Vec3; 4]>> {
        Ok(self
            .points(resolution)?
            .into_iter()
            .map(|batch| batch.map(|point| point.position))
            .collect())
    }
}

/// Cell-centred grid coordinates of instance `index` in `[0, 1]²`
fn grid_uv(index: usize, resolution: u32) -> Vec2 {
    let inverse = 1.0 / resolution as f32;
    let v = (inverse * index as f32 + 0.00001).floor();
    let u = inverse * (index as f32 - resolution as f32 * v + 0.5);
    Vec2::new(u, inverse * (v + 0.5))
}

/// Hash of every cell a `resolution²` plane grid touches
///
/// Instance `i` sits at the centre of its cell on the plane
/// `(u, 0, v) ∈ (-0.5, 0.5)²`, is moved by `domain`, and hashes the floor of
/// its transformed coordinates with `seed`.
///
/// # Errors
///
/// Returns `InvalidResolution` if `resolution` is 0
pub fn hash_grid<J: JobScheduler>(
    resolution: u32,
    seed: i32,
    domain: &SpaceTrs,
    scheduler: &J,
) -> Result<Vec<u32>> {
    let resolution = checked_resolution(resolution)?;
    let matrix = domain.matrix();
    let hash = SmallXXHash::seed(seed);
    let count = (resolution as usize).pow(2);
    debug!("hashing {count} grid cells with seed {seed}");

    Ok(scheduler.map(count, resolution as usize, |index| {
        let uv = grid_uv(index, resolution) - 0.5;
        let p = matrix.transform_point3(Vec3::new(uv.x, 0.0, uv.y)).floor();
        hash.eat(p.x as i32)
            .eat(p.y as i32)
            .eat(p.z as i32)
            .finalize()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::Sequential;

    #[test]
    fn test_grid_uv_cell_centres() {
        assert_eq!(grid_uv(0, 4), Vec2::new(0.125, 0.125));
        assert_eq!(grid_uv(3, 4), Vec2::new(0.875, 0.125));
        assert_eq!(grid_uv(4, 4), Vec2::new(0.125, 0.375));
        assert_eq!(grid_uv(15, 4), Vec2::new(0.875, 0.875));
    }

    #[test]
    fn test_points_padded_batches() {
        let batches = Shape::Plane.points(3).unwrap();
        assert_eq!(batches.len(), 3);
        let last = batches[2];
        assert_eq!(last[0], last[1]);
        assert!((last[3].position - Vec3::new(1.0 / 3.0, 0.0, 1.0 / 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_shapes_have_unit_normals() {
        for shape in Shape::ALL {
            for batch in shape.points(5).unwrap() {
                for point in batch {
                    assert!((point.normal.length() - 1.0).abs() < 1e-5, "{shape:?}");
                }
            }
        }
    }

    #[test]
    fn test_sphere_and_torus_radii() {
        for batch in Shape::UvSphere.points(6).unwrap() {
            for point in batch {
                assert!((point.position.length() - 0.5).abs() < 1e-5);
            }
        }
        for batch in Shape::Torus.points(6).unwrap() {
            for point in batch {
                let ring = Vec3::new(point.position.x, 0.0, point.position.z).normalize() * 0.375;
                assert!(((point.position - ring).length() - 0.125).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_hash_grid_matches_scalar_hash() {
        let domain = SpaceTrs::from_scale(8.0);
        let hashes = hash_grid(4, 17, &domain, &Sequential).unwrap();
        assert_eq!(hashes.len(), 16);

        // instance 0 sits at (-0.375, 0, -0.375), scaled to (-3, 0, -3)
        let expected = SmallXXHash::seed(17).eat(-3).eat(0).eat(-3).finalize();
        assert_eq!(hashes[0], expected);
    }

    #[test]
    fn test_hash_grid_depends_on_seed() {
        let domain = SpaceTrs::from_scale(8.0);
        let a = hash_grid(8, 1, &domain, &Sequential).unwrap();
        let b = hash_grid(8, 2, &domain, &Sequential).unwrap();
        assert_ne!(a, b);
        assert!(hash_grid(0, 1, &domain, &Sequential).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_hash_grid_parallel() {
        let domain = SpaceTrs {
            rotation: Vec3::new(0.0, 30.0, 0.0),
            ..SpaceTrs::from_scale(16.0)
        };
        let sequential = hash_grid(32, 5, &domain, &Sequential).unwrap();
        let parallel = hash_grid(32, 5, &domain, &crate::jobs::Parallel::new()).unwrap();
        assert_eq!(sequential, parallel);
    }
}
