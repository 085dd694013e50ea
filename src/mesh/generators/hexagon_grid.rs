//! Hexagon grids built from seven-vertex fans

use glam::{IVec3, Vec2, Vec3};

use super::triangle_at;
use crate::error::Result;
use crate::mesh::{checked_resolution, Bounds, MeshGenerator, MeshStreams, Vertex};

/// Half the width of a hexagon with unit height
const H: f32 = 0.433_012_7;

const SQRT_3: f32 = 1.732_050_8;

/// Write one hexagon as a center vertex plus six corners and six triangles
fn write_hexagon<S: MeshStreams>(
    streams: &mut S,
    vi: i32,
    ti: i32,
    corners: [(Vec3, Vec2); 7],
) {
    let mut vertex = Vertex::FLAT;
    for (k, (position, uv)) in corners.into_iter().enumerate() {
        vertex.position = position;
        vertex.tex_coord0 = uv;
        streams.set_vertex(vi as usize + k, vertex);
    }
    for k in 0..6 {
        let next = if k == 5 { 1 } else { k + 2 };
        streams.set_triangle(
            (ti + k) as usize,
            triangle_at(vi, IVec3::new(0, k + 1, next)),
        );
    }
}

fn hexagon_extent(resolution: u32) -> f32 {
    let r = resolution as f32;
    if resolution > 1 {
        (0.5 + 0.25 / r) * SQRT_3
    } else {
        0.5 * SQRT_3
    }
}

/// Hexagons with a vertex pointing along ±z, laid out in offset rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointyHexagonGrid {
    resolution: u32,
}

impl PointyHexagonGrid {
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn new(resolution: u32) -> Result<Self> {
        Ok(Self {
            resolution: checked_resolution(resolution)?,
        })
    }
}

impl MeshGenerator for PointyHexagonGrid {
    fn resolution(&self) -> u32 {
        self.resolution
    }

    fn vertex_count(&self) -> usize {
        7 * (self.resolution as usize).pow(2)
    }

    fn index_count(&self) -> usize {
        18 * (self.resolution as usize).pow(2)
    }

    fn job_length(&self) -> usize {
        self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        let r = self.resolution as f32;
        Bounds::new(
            Vec3::ZERO,
            Vec3::new(hexagon_extent(self.resolution), 0.0, 0.75 + 0.25 / r),
        )
    }

    fn execute<S: MeshStreams>(&self, job: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let z = job as i32;
        let mut vi = 7 * r * z;
        let mut ti = 6 * r * z;

        let center_offset = if r > 1 {
            let row = if z % 2 == 0 { 0.5 } else { 1.5 };
            Vec2::new((row - rf) * H, -0.375 * (rf - 1.0))
        } else {
            Vec2::ZERO
        };

        for x in 0..r {
            let center = (Vec2::new(2.0 * H * x as f32, 0.75 * z as f32) + center_offset) / rf;
            let xs = Vec2::new(center.x - H / rf, center.x + H / rf);
            let zs = [-0.5, -0.25, 0.25, 0.5].map(|offset| center.y + offset / rf);

            write_hexagon(
                streams,
                vi,
                ti,
                [
                    (Vec3::new(center.x, 0.0, center.y), Vec2::splat(0.5)),
                    (Vec3::new(center.x, 0.0, zs[0]), Vec2::new(0.5, 0.0)),
                    (Vec3::new(xs.x, 0.0, zs[1]), Vec2::new(0.5 - H, 0.25)),
                    (Vec3::new(xs.x, 0.0, zs[2]), Vec2::new(0.5 - H, 0.75)),
                    (Vec3::new(center.x, 0.0, zs[3]), Vec2::new(0.5, 1.0)),
                    (Vec3::new(xs.y, 0.0, zs[2]), Vec2::new(0.5 + H, 0.75)),
                    (Vec3::new(xs.y, 0.0, zs[1]), Vec2::new(0.5 + H, 0.25)),
                ],
            );
            vi += 7;
            ti += 6;
        }
    }
}

/// Hexagons with a vertex pointing along ±x, laid out in offset columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatHexagonGrid {
    resolution: u32,
}

impl FlatHexagonGrid {
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn new(resolution: u32) -> Result<Self> {
        Ok(Self {
            resolution: checked_resolution(resolution)?,
        })
    }
}

impl MeshGenerator for FlatHexagonGrid {
    fn resolution(&self) -> u32 {
        self.resolution
    }

    fn vertex_count(&self) -> usize {
        7 * (self.resolution as usize).pow(2)
    }

    fn index_count(&self) -> usize {
        18 * (self.resolution as usize).pow(2)
    }

    fn job_length(&self) -> usize {
        self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        let r = self.resolution as f32;
        Bounds::new(
            Vec3::ZERO,
            Vec3::new(0.75 + 0.25 / r, 0.0, hexagon_extent(self.resolution)),
        )
    }

    fn execute<S: MeshStreams>(&self, job: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let x = job as i32;
        let mut vi = 7 * r * x;
        let mut ti = 6 * r * x;

        let center_offset = if r > 1 {
            let column = if x % 2 == 0 { 0.5 } else { 1.5 };
            Vec2::new(-0.375 * (rf - 1.0), (column - rf) * H)
        } else {
            Vec2::ZERO
        };

        for z in 0..r {
            let center = (Vec2::new(0.75 * x as f32, 2.0 * H * z as f32) + center_offset) / rf;
            let xs = [-0.5, -0.25, 0.25, 0.5].map(|offset| center.x + offset / rf);
            let zs = Vec2::new(center.y + H / rf, center.y - H / rf);

            write_hexagon(
                streams,
                vi,
                ti,
                [
                    (Vec3::new(center.x, 0.0, center.y), Vec2::splat(0.5)),
                    (Vec3::new(xs[0], 0.0, center.y), Vec2::new(0.0, 0.5)),
                    (Vec3::new(xs[1], 0.0, zs.x), Vec2::new(0.25, 0.5 + H)),
                    (Vec3::new(xs[2], 0.0, zs.x), Vec2::new(0.75, 0.5 + H)),
                    (Vec3::new(xs[3], 0.0, center.y), Vec2::new(1.0, 0.5)),
                    (Vec3::new(xs[2], 0.0, zs.y), Vec2::new(0.75, 0.5 - H)),
                    (Vec3::new(xs[1], 0.0, zs.y), Vec2::new(0.25, 0.5 - H)),
                ],
            );
            vi += 7;
            ti += 6;
        }
    }
}
