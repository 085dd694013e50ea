//! Procedural mesh generation
//!
//! Generates engine-agnostic grid and sphere meshes. A generator describes
//! how many vertices and indices it writes and fills them job by job; sinks
//! implementing [`MeshStreams`] decide how the data is laid out.
//!
//! # Example
//!
//! ```rust
//! use procedural_meshes::mesh::*;
//! use procedural_meshes::Sequential;
//!
//! let grid = SharedSquareGrid::new(4).unwrap();
//! let mut mesh = MeshData::with_counts(grid.vertex_count(), grid.index_count());
//! generate_mesh(&grid, &mut mesh, &Sequential).unwrap();
//! assert_eq!(mesh.vertex_count(), 25);
//! assert_eq!(mesh.triangle_count(), 32);
//! ```

mod generators;
mod streams;

use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::{Vec2, Vec3, Vec4};
use log::debug;

use crate::error::{MeshError, Result};
use crate::jobs::JobScheduler;

pub use generators::{
    cube_to_sphere, CubeSphere, FlatHexagonGrid, PointyHexagonGrid, SharedCubeSphere,
    SharedSquareGrid, SharedTriangleGrid, SquareGrid, UvSphere,
};
pub(crate) use streams::RecordedWrites;
pub use streams::{MeshData, MeshStreams, SingleStream};

/// A single mesh vertex
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Tangent direction with handedness in `w`
    pub tangent: Vec4,
    pub tex_coord0: Vec2,
}

impl Vertex {
    /// Vertex at the origin facing up, the starting point for flat grids
    pub const FLAT: Vertex = Vertex {
        position: Vec3::ZERO,
        normal: Vec3::Y,
        tangent: Vec4::new(1.0, 0.0, 0.0, -1.0),
        tex_coord0: Vec2::ZERO,
    };

    /// Tangent direction without handedness
    pub fn tangent_direction(&self) -> Vec3 {
        self.tangent.truncate()
    }
}

/// Axis-aligned bounding box
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub center: Vec3,
    pub size: Vec3,
}

impl Bounds {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    /// Half the size along each axis
    pub fn extents(&self) -> Vec3 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size * 0.5
    }

    /// Check containment with a small tolerance
    pub fn contains(&self, point: Vec3, tolerance: f32) -> bool {
        point.cmpge(self.min() - Vec3::splat(tolerance)).all()
            && point.cmple(self.max() + Vec3::splat(tolerance)).all()
    }
}

/// Whether jobs of a generator may run in any order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOrdering {
    /// Every job writes disjoint slots and reads nothing written by others
    Independent,
    /// Job `i` emits triangles over vertices written by job `i - 1`
    RowDependent,
}

/// A procedural mesh generator
///
/// `execute(i, streams)` for every `i` in `0..job_length()` writes each
/// vertex slot in `0..vertex_count()` and each triangle slot in
/// `0..index_count() / 3` exactly once.
pub trait MeshGenerator: Sync {
    fn resolution(&self) -> u32;

    fn vertex_count(&self) -> usize;

    fn index_count(&self) -> usize;

    fn job_length(&self) -> usize;

    fn bounds(&self) -> Bounds;

    fn ordering(&self) -> JobOrdering {
        JobOrdering::Independent
    }

    fn execute<S: MeshStreams>(&self, job: usize, streams: &mut S);
}

pub(crate) fn checked_resolution(resolution: u32) -> Result<u32> {
    if resolution < 1 {
        return Err(MeshError::InvalidResolution(resolution));
    }
    Ok(resolution)
}

/// Run every job of `generator` into `streams`
///
/// Independent jobs are spread across the scheduler and replayed in job
/// order; row-dependent generators always run in index order on the calling
/// thread.
///
/// # Errors
///
/// Returns `BufferTooSmall` if the sink cannot hold every vertex or triangle
/// the generator writes. Nothing is written in that case.
pub fn generate_mesh<G, S, J>(generator: &G, streams: &mut S, scheduler: &J) -> Result<()>
where
    G: MeshGenerator,
    S: MeshStreams,
    J: JobScheduler,
{
    let vertex_count = generator.vertex_count();
    let triangle_count = generator.index_count() / 3;
    if streams.vertex_capacity() < vertex_count {
        return Err(MeshError::BufferTooSmall {
            what: "vertex",
            required: vertex_count,
            available: streams.vertex_capacity(),
        });
    }
    if streams.triangle_capacity() < triangle_count {
        return Err(MeshError::BufferTooSmall {
            what: "triangle",
            required: triangle_count,
            available: streams.triangle_capacity(),
        });
    }

    let start = Instant::now();
    let jobs = generator.job_length();
    let parallel =
        generator.ordering() == JobOrdering::Independent && !scheduler.is_sequential();

    if parallel {
        let batch = (generator.resolution() as usize).max(1);
        let recorded = scheduler.map(jobs, batch, |job| {
            let mut writes = RecordedWrites::new(vertex_count, triangle_count);
            generator.execute(job, &mut writes);
            writes
        });
        for writes in recorded {
            writes.replay(streams);
        }
    } else {
        for job in 0..jobs {
            generator.execute(job, streams);
        }
    }

    debug!(
        "generated {} vertices, {} triangles in {} jobs ({:?}, parallel: {})",
        vertex_count,
        triangle_count,
        jobs,
        start.elapsed(),
        parallel
    );
    Ok(())
}

/// Mesh generators selectable at runtime
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeshType {
    #[default]
    SquareGrid,
    SharedSquareGrid,
    SharedTriangleGrid,
    PointyHexagonGrid,
    FlatHexagonGrid,
    UvSphere,
    CubeSphere,
    SharedCubeSphere,
}

impl MeshType {
    pub const ALL: [MeshType; 8] = [
        MeshType::SquareGrid,
        MeshType::SharedSquareGrid,
        MeshType::SharedTriangleGrid,
        MeshType::PointyHexagonGrid,
        MeshType::FlatHexagonGrid,
        MeshType::UvSphere,
        MeshType::CubeSphere,
        MeshType::SharedCubeSphere,
    ];

    /// Generate a complete mesh with exactly sized buffers
    ///
    /// # Errors
    ///
    /// Returns `InvalidResolution` if `resolution` is 0
    pub fn generate<J: JobScheduler>(
        self,
        resolution: u32,
        scheduler: &J,
    ) -> Result<(MeshData, Bounds)> {
        match self {
            MeshType::SquareGrid => build(&SquareGrid::new(resolution)?, scheduler),
            MeshType::SharedSquareGrid => build(&SharedSquareGrid::new(resolution)?, scheduler),
            MeshType::SharedTriangleGrid => {
                build(&SharedTriangleGrid::new(resolution)?, scheduler)
            }
            MeshType::PointyHexagonGrid => build(&PointyHexagonGrid::new(resolution)?, scheduler),
            MeshType::FlatHexagonGrid => build(&FlatHexagonGrid::new(resolution)?, scheduler),
            MeshType::UvSphere => build(&UvSphere::new(resolution)?, scheduler),
            MeshType::CubeSphere => build(&CubeSphere::new(resolution)?, scheduler),
            MeshType::SharedCubeSphere => build(&SharedCubeSphere::new(resolution)?, scheduler),
        }
    }

    /// Whether the mesh lies in the xz plane
    pub fn is_flat(self) -> bool {
        !matches!(
            self,
            MeshType::UvSphere | MeshType::CubeSphere | MeshType::SharedCubeSphere
        )
    }
}

fn build<G: MeshGenerator, J: JobScheduler>(
    generator: &G,
    scheduler: &J,
) -> Result<(MeshData, Bounds)> {
    let mut mesh = MeshData::with_counts(generator.vertex_count(), generator.index_count());
    generate_mesh(generator, &mut mesh, scheduler)?;
    Ok((mesh, generator.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::Sequential;

    #[test]
    fn test_square_grid_resolution_one() {
        let (mesh, bounds) = MeshType::SquareGrid.generate(1, &Sequential).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 2, 1, 1, 2, 3]);
        assert_eq!(mesh.positions[0], [-0.5, 0.0, -0.5]);
        assert_eq!(mesh.positions[3], [0.5, 0.0, 0.5]);
        assert!(mesh.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));
        assert!(mesh.tangents.iter().all(|t| *t == [1.0, 0.0, 0.0, -1.0]));
        assert_eq!(mesh.uvs, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        assert_eq!(bounds.size, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_buffer_too_small() {
        let grid = SquareGrid::new(2).unwrap();
        let mut mesh = MeshData::with_counts(grid.vertex_count() - 1, grid.index_count());
        let err = generate_mesh(&grid, &mut mesh, &Sequential).unwrap_err();
        assert_eq!(
            err,
            MeshError::BufferTooSmall {
                what: "vertex",
                required: 16,
                available: 15,
            }
        );
        assert!(mesh.positions.iter().all(|p| *p == [0.0; 3]));

        let mut mesh = MeshData::with_counts(grid.vertex_count(), 6);
        assert!(matches!(
            generate_mesh(&grid, &mut mesh, &Sequential),
            Err(MeshError::BufferTooSmall { what: "triangle", .. })
        ));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        for mesh_type in MeshType::ALL {
            assert_eq!(
                mesh_type.generate(0, &Sequential).unwrap_err(),
                MeshError::InvalidResolution(0)
            );
        }
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert!(bounds.contains(Vec3::new(0.5, 0.0, -0.5), 1e-6));
        assert!(!bounds.contains(Vec3::new(0.6, 0.0, 0.0), 1e-6));
        assert_eq!(bounds.min(), Vec3::new(-0.5, 0.0, -0.5));
    }

    #[test]
    fn test_larger_sink_is_accepted() {
        let grid = SharedSquareGrid::new(2).unwrap();
        let mut stream = SingleStream::with_counts(100, 300);
        generate_mesh(&grid, &mut stream, &Sequential).unwrap();
        assert_eq!(stream.vertices[8].position, Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn test_flat_classification() {
        assert!(MeshType::FlatHexagonGrid.is_flat());
        assert!(!MeshType::SharedCubeSphere.is_flat());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        use crate::jobs::Parallel;
        for mesh_type in MeshType::ALL {
            let (sequential, _) = mesh_type.generate(5, &Sequential).unwrap();
            let (parallel, _) = mesh_type.generate(5, &Parallel::new()).unwrap();
            assert_eq!(sequential, parallel, "{mesh_type:?}");
        }
    }
}
