//! Latitude/longitude sphere

use std::f32::consts::PI;

use glam::{IVec3, Vec2, Vec3};

use super::triangle_at;
use crate::error::Result;
use crate::mesh::{checked_resolution, Bounds, JobOrdering, MeshGenerator, MeshStreams, Vertex};

/// Unit sphere made of `4R` meridian columns and `2R` latitude bands
///
/// Job 0 writes the seam column (`u = 0`, without poles). Job `u > 0` writes
/// its own pole vertices, its ring of vertices and the triangles connecting
/// it to column `u - 1`. Poles are duplicated per column so each gets its
/// own texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UvSphere {
    resolution: u32,
}

impl UvSphere {
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn new(resolution: u32) -> Result<Self> {
        Ok(Self {
            resolution: checked_resolution(resolution)?,
        })
    }

    fn resolution_u(&self) -> i32 {
        4 * self.resolution as i32
    }

    fn resolution_v(&self) -> i32 {
        2 * self.resolution as i32
    }

    fn execute_seam<S: MeshStreams>(&self, streams: &mut S) {
        let rv = self.resolution_v();
        let mut vertex = Vertex {
            tangent: glam::Vec4::new(1.0, 0.0, 0.0, -1.0),
            ..Default::default()
        };

        for v in 1..rv {
            let (sin, cos) = (PI + PI * v as f32 / rv as f32).sin_cos();
            vertex.position = Vec3::new(0.0, cos, sin);
            vertex.normal = vertex.position;
            vertex.tex_coord0.y = v as f32 / rv as f32;
            streams.set_vertex(v as usize - 1, vertex);
        }
    }

    fn execute_regular<S: MeshStreams>(&self, u: i32, streams: &mut S) {
        let ru = self.resolution_u();
        let rv = self.resolution_v();
        let mut vi = (rv + 1) * u - 2;
        let mut ti = 2 * (rv - 1) * (u - 1);

        // Poles take the tangent halfway between this column and the last.
        let (sin, cos) = (2.0 * PI * (u as f32 - 0.5) / ru as f32).sin_cos();
        let mut vertex = Vertex {
            position: Vec3::NEG_Y,
            normal: Vec3::NEG_Y,
            tangent: glam::Vec4::new(cos, 0.0, sin, -1.0),
            tex_coord0: Vec2::new((u as f32 - 0.5) / ru as f32, 0.0),
        };
        streams.set_vertex(vi as usize, vertex);

        vertex.position.y = 1.0;
        vertex.normal.y = 1.0;
        vertex.tex_coord0.y = 1.0;
        streams.set_vertex((vi + rv) as usize, vertex);
        vi += 1;

        let (sin, cos) = (2.0 * PI * u as f32 / ru as f32).sin_cos();
        let circle = Vec2::new(sin, -cos);
        vertex.tangent.x = cos;
        vertex.tangent.z = sin;
        vertex.tex_coord0.x = u as f32 / ru as f32;

        let shift_left = if u == 1 { 0 } else { -1 } - rv;

        streams.set_triangle(ti as usize, triangle_at(vi, IVec3::new(-1, shift_left, 0)));
        ti += 1;

        for v in 1..rv {
            let (radius, y) = (PI + PI * v as f32 / rv as f32).sin_cos();
            vertex.position = Vec3::new(circle.x * -radius, y, circle.y * -radius);
            vertex.normal = vertex.position;
            vertex.tex_coord0.y = v as f32 / rv as f32;
            streams.set_vertex(vi as usize, vertex);

            if v > 1 {
                streams.set_triangle(
                    ti as usize,
                    triangle_at(vi, IVec3::new(shift_left - 1, shift_left, -1)),
                );
                streams.set_triangle(
                    ti as usize + 1,
                    triangle_at(vi, IVec3::new(-1, shift_left, 0)),
                );
                ti += 2;
            }
            vi += 1;
        }

        streams.set_triangle(ti as usize, triangle_at(vi, IVec3::new(shift_left - 1, 0, -1)));
    }
}

impl MeshGenerator for UvSphere {
    fn resolution(&self) -> u32 {
        self.resolution
    }

    fn vertex_count(&self) -> usize {
        let ru = self.resolution_u() as usize;
        let rv = self.resolution_v() as usize;
        (ru + 1) * (rv + 1) - 2
    }

    fn index_count(&self) -> usize {
        let ru = self.resolution_u() as usize;
        let rv = self.resolution_v() as usize;
        6 * ru * (rv - 1)
    }

    fn job_length(&self) -> usize {
        self.resolution_u() as usize + 1
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(Vec3::ZERO, Vec3::splat(2.0))
    }

    fn ordering(&self) -> JobOrdering {
        JobOrdering::RowDependent
    }

    fn execute<S: MeshStreams>(&self, job: usize, streams: &mut S) {
        if job == 0 {
            self.execute_seam(streams);
        } else {
            self.execute_regular(job as i32, streams);
        }
    }
}
