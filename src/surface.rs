//! Noise displacement of flat meshes
//!
//! Displaces each vertex of a mesh lying in the xz plane vertically by
//! fractal noise, then rebuilds its normal and tangent from the analytic
//! noise derivatives so no neighbour lookups are needed.

use glam::{Vec3, Vec4};
use log::debug;

use crate::config::NoiseSettings;
use crate::error::Result;
use crate::jobs::JobScheduler;
use crate::mesh::Vertex;
use crate::noise::{fractal_noise4, FractalFn, Noise, Point4, SpaceTrs};

/// Vertical displacement job for flat meshes
pub struct SurfaceJob;

impl SurfaceJob {
    /// Displace `vertices` by `displacement * N(domain(position))`
    ///
    /// # Algorithm
    /// 1. Transform four positions at a time into noise space
    /// 2. Sample fractal noise scaled by `displacement`
    /// 3. Map derivatives back through the domain's derivative matrix
    /// 4. Set `y` to the sample and derive tangent and normal from the
    ///    x and z slopes
    pub fn run<N: Noise, J: JobScheduler>(
        vertices: &mut [Vertex],
        settings: &NoiseSettings,
        domain: &SpaceTrs,
        displacement: f32,
        scheduler: &J,
    ) -> Result<()> {
        Self::run_with(fractal_noise4::<N>, vertices, settings, domain, displacement, scheduler)
    }

    /// Same as [`SurfaceJob::run`] with a runtime-selected noise
    pub fn run_with<J: JobScheduler>(
        noise: FractalFn,
        vertices: &mut [Vertex],
        settings: &NoiseSettings,
        domain: &SpaceTrs,
        displacement: f32,
        scheduler: &J,
    ) -> Result<()> {
        settings.validate()?;
        let matrix = domain.matrix();
        let derivative_matrix = domain.derivative_matrix();
        debug!(
            "displacing {} vertices by {} (seed {})",
            vertices.len(),
            displacement,
            settings.seed
        );

        scheduler.for_each_chunk_mut(vertices, 4, |_, chunk| {
            let mut points = [chunk[0].position; 4];
            for (point, vertex) in points.iter_mut().zip(chunk.iter()) {
                *point = vertex.position;
            }

            let sample = noise(Point4::from_points(points).transformed(&matrix), settings)
                * displacement;
            let slopes = sample.derivatives().transformed_vectors(&derivative_matrix);

            for (lane, vertex) in chunk.iter_mut().enumerate() {
                let (dx, dz) = (slopes.x[lane], slopes.z[lane]);
                vertex.position.y = sample.v[lane];

                let n = 1.0 / (dx * dx + 1.0).sqrt();
                vertex.tangent = Vec4::new(n, dx * n, 0.0, -1.0);

                let n = 1.0 / (dx * dx + dz * dz + 1.0).sqrt();
                vertex.normal = Vec3::new(-dx * n, n, -dz * n);
            }
        });
        Ok(())
    }
}
