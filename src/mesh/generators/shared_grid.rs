//! Grids whose rows share vertices with the row before them

use glam::{IVec3, Vec3};

use super::triangle_at;
use crate::error::Result;
use crate::mesh::{checked_resolution, Bounds, JobOrdering, MeshGenerator, MeshStreams, Vertex};

/// Welded square grid: `(resolution + 1)²` vertices over the unit square
///
/// Row `z` emits the triangles between itself and row `z - 1`, so rows
/// depend on their predecessor and run in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedSquareGrid {
    resolution: u32,
}

impl SharedSquareGrid {
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn new(resolution: u32) -> Result<Self> {
        Ok(Self {
            resolution: checked_resolution(resolution)?,
        })
    }
}

impl MeshGenerator for SharedSquareGrid {
    fn resolution(&self) -> u32 {
        self.resolution
    }

    fn vertex_count(&self) -> usize {
        (self.resolution as usize + 1).pow(2)
    }

    fn index_count(&self) -> usize {
        6 * (self.resolution as usize).pow(2)
    }

    fn job_length(&self) -> usize {
        self.resolution as usize + 1
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0))
    }

    fn ordering(&self) -> JobOrdering {
        JobOrdering::RowDependent
    }

    fn execute<S: MeshStreams>(&self, job: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let z = job as i32;
        let mut vi = (r + 1) * z;
        let mut ti = 2 * r * (z - 1);

        let mut vertex = Vertex::FLAT;
        vertex.position.x = -0.5;
        vertex.position.z = z as f32 / rf - 0.5;
        vertex.tex_coord0.y = z as f32 / rf;
        streams.set_vertex(vi as usize, vertex);
        vi += 1;

        for x in 1..=r {
            vertex.position.x = x as f32 / rf - 0.5;
            vertex.tex_coord0.x = x as f32 / rf;
            streams.set_vertex(vi as usize, vertex);

            if z > 0 {
                streams.set_triangle(ti as usize, triangle_at(vi, IVec3::new(-r - 2, -1, -r - 1)));
                streams.set_triangle(ti as usize + 1, triangle_at(vi, IVec3::new(-r - 1, -1, 0)));
            }
            vi += 1;
            ti += 2;
        }
    }
}

/// Welded grid of equilateral triangles
///
/// Odd rows are shifted half a cell so every quad splits into two
/// equilateral triangles. The grid spans `1 + 0.5 / resolution` along x and
/// `√3 / 2` along z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedTriangleGrid {
    resolution: u32,
}

impl SharedTriangleGrid {
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn new(resolution: u32) -> Result<Self> {
        Ok(Self {
            resolution: checked_resolution(resolution)?,
        })
    }
}

const HALF_SQRT_3: f32 = 0.866_025_4;

impl MeshGenerator for SharedTriangleGrid {
    fn resolution(&self) -> u32 {
        self.resolution
    }

    fn vertex_count(&self) -> usize {
        (self.resolution as usize + 1).pow(2)
    }

    fn index_count(&self) -> usize {
        6 * (self.resolution as usize).pow(2)
    }

    fn job_length(&self) -> usize {
        self.resolution as usize + 1
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(
            Vec3::ZERO,
            Vec3::new(1.0 + 0.5 / self.resolution as f32, 0.0, HALF_SQRT_3),
        )
    }

    fn ordering(&self) -> JobOrdering {
        JobOrdering::RowDependent
    }

    fn execute<S: MeshStreams>(&self, job: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let z = job as i32;
        let mut vi = (r + 1) * z;
        let mut ti = 2 * r * (z - 1);

        let (below_left, below_right, left, current) = (-r - 2, -r - 1, -1, 0);
        let (x_offset, u_offset, first, second) = if z % 2 == 0 {
            (
                -0.25,
                0.0,
                IVec3::new(below_left, left, current),
                IVec3::new(below_left, current, below_right),
            )
        } else {
            (
                0.25,
                0.5 / (rf + 0.5),
                IVec3::new(below_left, left, below_right),
                IVec3::new(below_right, left, current),
            )
        };
        let x_offset = x_offset / rf - 0.5;

        let mut vertex = Vertex::FLAT;
        vertex.position.x = x_offset;
        vertex.position.z = (z as f32 / rf - 0.5) * HALF_SQRT_3;
        vertex.tex_coord0.x = u_offset;
        vertex.tex_coord0.y = vertex.position.z / (1.0 + 0.5 / rf) + 0.5;
        streams.set_vertex(vi as usize, vertex);
        vi += 1;

        for x in 1..=r {
            vertex.position.x = x as f32 / rf + x_offset;
            vertex.tex_coord0.x = x as f32 / (rf + 0.5) + u_offset;
            streams.set_vertex(vi as usize, vertex);

            if z > 0 {
                streams.set_triangle(ti as usize, triangle_at(vi, first));
                streams.set_triangle(ti as usize + 1, triangle_at(vi, second));
            }
            vi += 1;
            ti += 2;
        }
    }
}
