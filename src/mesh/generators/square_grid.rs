//! Square grid with four vertices per quad

use glam::{IVec3, Vec2, Vec3};

use super::triangle_at;
use crate::error::Result;
use crate::mesh::{checked_resolution, Bounds, MeshGenerator, MeshStreams, Vertex};

/// Unit square in the xz plane made of `resolution²` quads
///
/// Quads do not share vertices, so every quad has its own full 0..1 UV
/// square. One job writes one row of quads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareGrid {
    resolution: u32,
}

impl SquareGrid {
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn new(resolution: u32) -> Result<Self> {
        Ok(Self {
            resolution: checked_resolution(resolution)?,
        })
    }
}

impl MeshGenerator for SquareGrid {
    fn resolution(&self) -> u32 {
        self.resolution
    }

    fn vertex_count(&self) -> usize {
        4 * (self.resolution as usize).pow(2)
    }

    fn index_count(&self) -> usize {
        6 * (self.resolution as usize).pow(2)
    }

    fn job_length(&self) -> usize {
        self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0))
    }

    fn execute<S: MeshStreams>(&self, job: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let z = job as i32;
        let mut vi = 4 * r * z;
        let mut ti = 2 * r * z;

        let zs = Vec2::new(z as f32, z as f32 + 1.0) / rf - 0.5;

        for x in 0..r {
            let xs = Vec2::new(x as f32, x as f32 + 1.0) / rf - 0.5;

            let mut vertex = Vertex::FLAT;
            vertex.position.x = xs.x;
            vertex.position.z = zs.x;
            streams.set_vertex(vi as usize, vertex);

            vertex.position.x = xs.y;
            vertex.tex_coord0 = Vec2::new(1.0, 0.0);
            streams.set_vertex(vi as usize + 1, vertex);

            vertex.position.x = xs.x;
            vertex.position.z = zs.y;
            vertex.tex_coord0 = Vec2::new(0.0, 1.0);
            streams.set_vertex(vi as usize + 2, vertex);

            vertex.position.x = xs.y;
            vertex.tex_coord0 = Vec2::ONE;
            streams.set_vertex(vi as usize + 3, vertex);

            streams.set_triangle(ti as usize, triangle_at(vi, IVec3::new(0, 2, 1)));
            streams.set_triangle(ti as usize + 1, triangle_at(vi, IVec3::new(1, 2, 3)));

            vi += 4;
            ti += 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::SingleStream;

    #[test]
    fn test_counts() {
        let grid = SquareGrid::new(3).unwrap();
        assert_eq!(grid.vertex_count(), 36);
        assert_eq!(grid.index_count(), 54);
        assert_eq!(grid.job_length(), 3);
    }

    #[test]
    fn test_second_row_offsets() {
        let grid = SquareGrid::new(2).unwrap();
        let mut stream = SingleStream::with_counts(grid.vertex_count(), grid.index_count());
        grid.execute(1, &mut stream);

        // row 1 starts at vertex 8 and triangle 4
        assert_eq!(stream.vertices[8].position, Vec3::new(-0.5, 0.0, 0.0));
        assert_eq!(stream.vertices[15].position, Vec3::new(0.5, 0.0, 0.5));
        assert_eq!(stream.triangles[4], [8, 10, 9]);
        assert_eq!(stream.triangles[7], [13, 14, 15]);
    }
}
