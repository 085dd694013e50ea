//! Spheres made by projecting the six faces of a cube

use glam::{IVec3, Vec2, Vec3};

use super::triangle_at;
use crate::error::Result;
use crate::mesh::{checked_resolution, Bounds, JobOrdering, MeshGenerator, MeshStreams, Vertex};

/// Map a point on the surface of the `[-1, 1]³` cube onto the unit sphere
///
/// Unlike plain normalisation this spreads vertices evenly across each face.
pub fn cube_to_sphere(p: Vec3) -> Vec3 {
    let p2 = p * p;
    let a = Vec3::new(p2.y, p2.x, p2.x);
    let b = Vec3::new(p2.z, p2.z, p2.y);
    let scale = Vec3::ONE - (a + b) * 0.5 + a * b / 3.0;
    p * Vec3::new(scale.x.sqrt(), scale.y.sqrt(), scale.z.sqrt())
}

/// One face of the cube, walked along `u_vector` in columns of `v_vector`
#[derive(Debug, Clone, Copy)]
struct Side {
    id: i32,
    uv_origin: Vec3,
    u_vector: Vec3,
    v_vector: Vec3,
    /// Offset, in columns of R² vertices, to the face this one wraps onto
    seam_step: i32,
}

impl Side {
    fn get(id: i32) -> Side {
        let (uv_origin, u_vector, v_vector, seam_step) = match id {
            0 => (Vec3::NEG_ONE, 2.0 * Vec3::X, 2.0 * Vec3::Y, 4),
            1 => (Vec3::new(1.0, -1.0, -1.0), 2.0 * Vec3::Z, 2.0 * Vec3::Y, 4),
            2 => (Vec3::NEG_ONE, 2.0 * Vec3::Z, 2.0 * Vec3::X, -2),
            3 => (Vec3::new(-1.0, -1.0, 1.0), 2.0 * Vec3::Y, 2.0 * Vec3::X, -2),
            4 => (Vec3::NEG_ONE, 2.0 * Vec3::Y, 2.0 * Vec3::Z, -2),
            _ => (Vec3::new(-1.0, 1.0, -1.0), 2.0 * Vec3::X, 2.0 * Vec3::Z, -2),
        };
        Side {
            id,
            uv_origin,
            u_vector,
            v_vector,
            seam_step,
        }
    }

    /// Even faces start at the `(-1, -1, -1)` corner
    fn touches_minimum_pole(&self) -> bool {
        self.id % 2 == 0
    }
}

/// Cube sphere whose faces are split into separate quads
///
/// Every quad owns four vertices with a 0..1 UV square, like
/// [`super::SquareGrid`]. Job `i` writes column `i / 6` of face `i % 6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeSphere {
    resolution: u32,
}

impl CubeSphere {
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn new(resolution: u32) -> Result<Self> {
        Ok(Self {
            resolution: checked_resolution(resolution)?,
        })
    }
}

impl MeshGenerator for CubeSphere {
    fn resolution(&self) -> u32 {
        self.resolution
    }

    fn vertex_count(&self) -> usize {
        24 * (self.resolution as usize).pow(2)
    }

    fn index_count(&self) -> usize {
        36 * (self.resolution as usize).pow(2)
    }

    fn job_length(&self) -> usize {
        6 * self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(Vec3::ZERO, Vec3::splat(2.0))
    }

    fn execute<S: MeshStreams>(&self, job: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let i = job as i32;
        let u = i / 6;
        let side = Side::get(i - 6 * u);
        let mut vi = 4 * r * (r * side.id + u);
        let mut ti = 2 * r * (r * side.id + u);

        let u_a = side.uv_origin + side.u_vector * u as f32 / rf;
        let u_b = side.uv_origin + side.u_vector * (u + 1) as f32 / rf;
        let mut p_a = cube_to_sphere(u_a);
        let mut p_b = cube_to_sphere(u_b);

        let mut vertex = Vertex {
            tangent: (p_b - p_a).normalize().extend(-1.0),
            ..Default::default()
        };

        for v in 1..=r {
            let p_c = cube_to_sphere(u_a + side.v_vector * v as f32 / rf);
            let p_d = cube_to_sphere(u_b + side.v_vector * v as f32 / rf);

            vertex.position = p_a;
            vertex.normal = (p_c - p_a).cross(vertex.tangent.truncate()).normalize();
            vertex.tex_coord0 = Vec2::ZERO;
            streams.set_vertex(vi as usize, vertex);

            vertex.position = p_b;
            vertex.normal = (p_d - p_b).cross(vertex.tangent.truncate()).normalize();
            vertex.tex_coord0 = Vec2::new(1.0, 0.0);
            streams.set_vertex(vi as usize + 1, vertex);

            vertex.tangent = (p_d - p_c).normalize().extend(-1.0);

            vertex.position = p_c;
            vertex.normal = (p_c - p_a).cross(vertex.tangent.truncate()).normalize();
            vertex.tex_coord0 = Vec2::new(0.0, 1.0);
            streams.set_vertex(vi as usize + 2, vertex);

            vertex.position = p_d;
            vertex.normal = (p_d - p_b).cross(vertex.tangent.truncate()).normalize();
            vertex.tex_coord0 = Vec2::ONE;
            streams.set_vertex(vi as usize + 3, vertex);

            streams.set_triangle(ti as usize, triangle_at(vi, IVec3::new(0, 2, 1)));
            streams.set_triangle(ti as usize + 1, triangle_at(vi, IVec3::new(1, 2, 3)));

            vi += 4;
            ti += 2;
            p_a = p_c;
            p_b = p_d;
        }
    }
}

/// Watertight cube sphere with every vertex shared between its quads
///
/// Vertices 0 and 1 are the two cube corners no face column starts on. Each
/// job writes one column of `R` vertices and stitches it to the previous
/// column, or across the seam to the neighbouring face, so jobs run in
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedCubeSphere {
    resolution: u32,
}

impl SharedCubeSphere {
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn new(resolution: u32) -> Result<Self> {
        Ok(Self {
            resolution: checked_resolution(resolution)?,
        })
    }
}

fn sphere_vertex(position: Vec3, direction: Vec3) -> Vertex {
    let tangent = (direction - position * position.dot(direction)).normalize();
    Vertex {
        position,
        normal: position,
        tangent: tangent.extend(-1.0),
        tex_coord0: Vec2::ZERO,
    }
}

impl MeshGenerator for SharedCubeSphere {
    fn resolution(&self) -> u32 {
        self.resolution
    }

    fn vertex_count(&self) -> usize {
        6 * (self.resolution as usize).pow(2) + 2
    }

    fn index_count(&self) -> usize {
        36 * (self.resolution as usize).pow(2)
    }

    fn job_length(&self) -> usize {
        6 * self.resolution as usize
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(Vec3::ZERO, Vec3::splat(2.0))
    }

    fn ordering(&self) -> JobOrdering {
        JobOrdering::RowDependent
    }

    fn execute<S: MeshStreams>(&self, job: usize, streams: &mut S) {
        let r = self.resolution as i32;
        let rf = self.resolution as f32;
        let i = job as i32;
        let mut u = i / 6;
        let side = Side::get(i - 6 * u);
        let mut vi = r * (r * side.id + u) + 2;
        let mut ti = 2 * r * (r * side.id + u);
        let first_column = u == 0;
        let min_pole = side.touches_minimum_pole();
        u += 1;

        let p_start = side.uv_origin + side.u_vector * u as f32 / rf;
        let u_direction = side.u_vector.normalize();

        if i == 0 {
            let corner = Vec3::splat((1.0f32 / 3.0).sqrt());
            streams.set_vertex(0, sphere_vertex(-corner, Vec3::X));
            streams.set_vertex(1, sphere_vertex(corner, Vec3::X));
        }

        streams.set_vertex(vi as usize, sphere_vertex(cube_to_sphere(p_start), u_direction));

        let mut triangle = IVec3::new(
            vi,
            if first_column && min_pole { 0 } else { vi - r },
            vi + if first_column {
                if min_pole {
                    side.seam_step * r * r
                } else if r == 1 {
                    side.seam_step
                } else {
                    -r + 1
                }
            } else {
                -r + 1
            },
        );
        streams.set_triangle(ti as usize, triangle);
        vi += 1;
        ti += 1;

        let z_add = if first_column && min_pole { r } else { 1 };
        let z_add_last = if first_column && min_pole {
            r
        } else if !first_column && !min_pole {
            r * ((side.seam_step + 1) * r - u) + u
        } else {
            (side.seam_step + 1) * r * r - r + 1
        };

        for v in 1..r {
            let position = cube_to_sphere(p_start + side.v_vector * v as f32 / rf);
            streams.set_vertex(vi as usize, sphere_vertex(position, u_direction));

            triangle.x += 1;
            triangle.y = triangle.z;
            triangle.z += if v == r - 1 { z_add_last } else { z_add };

            streams.set_triangle(
                ti as usize,
                IVec3::new(triangle.x - 1, triangle.y, triangle.x),
            );
            streams.set_triangle(ti as usize + 1, triangle);
            vi += 1;
            ti += 2;
        }

        let closing = if min_pole {
            triangle.z + r
        } else if u == r {
            1
        } else {
            triangle.z + 1
        };
        streams.set_triangle(ti as usize, IVec3::new(triangle.x, triangle.z, closing));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::SingleStream;

    fn run<G: MeshGenerator>(generator: &G) -> SingleStream {
        let mut stream = SingleStream::with_counts(generator.vertex_count(), generator.index_count());
        for job in 0..generator.job_length() {
            generator.execute(job, &mut stream);
        }
        stream
    }

    #[test]
    fn test_cube_to_sphere_corner() {
        let mapped = cube_to_sphere(Vec3::ONE);
        assert!((mapped - Vec3::ONE / 3.0f32.sqrt()).length() < 1e-6);
        assert_eq!(cube_to_sphere(Vec3::X), Vec3::X);
        assert_eq!(cube_to_sphere(Vec3::NEG_Z), Vec3::NEG_Z);
    }

    #[test]
    fn test_cube_sphere_quad_normals_follow_own_tangent() {
        let stream = run(&CubeSphere::new(2).unwrap());
        for quad in stream.vertices.chunks(4) {
            let [a, b, c, d] = [quad[0], quad[1], quad[2], quad[3]];
            let expected = [
                (a, (c.position - a.position).cross(a.tangent_direction())),
                (b, (d.position - b.position).cross(b.tangent_direction())),
                (c, (c.position - a.position).cross(c.tangent_direction())),
                (d, (d.position - b.position).cross(d.tangent_direction())),
            ];
            for (vertex, normal) in expected {
                assert!((vertex.normal - normal.normalize()).length() < 1e-5);
            }
        }
    }

    #[test]
    fn test_cube_to_sphere_unit_length_on_faces() {
        for a in -4..=4 {
            for b in -4..=4 {
                let (s, t) = (a as f32 / 4.0, b as f32 / 4.0);
                for p in [
                    Vec3::new(1.0, s, t),
                    Vec3::new(s, -1.0, t),
                    Vec3::new(s, t, 1.0),
                ] {
                    assert!((cube_to_sphere(p).length() - 1.0).abs() < 1e-6, "{p}");
                }
            }
        }
    }

    #[test]
    fn test_cube_sphere_resolution_one() {
        let sphere = CubeSphere::new(1).unwrap();
        assert_eq!(sphere.vertex_count(), 24);
        assert_eq!(sphere.index_count(), 36);
        let stream = run(&sphere);
        for vertex in &stream.vertices {
            assert!((vertex.position.length() - 1.0).abs() < 1e-5);
            assert!(vertex.normal.dot(vertex.position) > 0.0);
        }
    }

    #[test]
    fn test_shared_cube_sphere_resolution_one() {
        let sphere = SharedCubeSphere::new(1).unwrap();
        assert_eq!(sphere.vertex_count(), 8);
        assert_eq!(sphere.index_count(), 36);

        let stream = run(&sphere);
        // the eight cube corners, each exactly once
        for (i, a) in stream.vertices.iter().enumerate() {
            assert!((a.position.abs() - Vec3::splat((1.0f32 / 3.0).sqrt())).length() < 1e-5);
            for b in &stream.vertices[i + 1..] {
                assert!((a.position - b.position).length() > 0.1);
            }
        }
    }

    #[test]
    fn test_shared_cube_sphere_tangents_perpendicular() {
        let stream = run(&SharedCubeSphere::new(3).unwrap());
        for vertex in &stream.vertices {
            assert!(vertex.tangent_direction().dot(vertex.normal).abs() < 1e-5);
            assert!((vertex.tangent_direction().length() - 1.0).abs() < 1e-5);
        }
    }
}
