//! Procedural grid and sphere meshes with lattice noise
//!
//! A standalone library for generating engine-agnostic meshes (square,
//! triangle and hexagon grids, UV and cube spheres) and displacing them with
//! fractal lattice noise that carries analytic derivatives.
//!
//! # Quick Start
//!
//! ```rust
//! use procedural_meshes::*;
//! use procedural_meshes::noise::{Lattice2D, LatticeNormal, Perlin};
//!
//! // Build a welded plane
//! let grid = SharedSquareGrid::new(16).unwrap();
//! let mut stream = SingleStream::with_counts(grid.vertex_count(), grid.index_count());
//! generate_mesh(&grid, &mut stream, &DefaultScheduler::default()).unwrap();
//!
//! // Displace it with three octaves of Perlin noise
//! let settings = NoiseSettingsBuilder::new()
//!     .seed(42)
//!     .octaves(3).unwrap()
//!     .build().unwrap();
//!
//! SurfaceJob::run::<Lattice2D<LatticeNormal, Perlin>, _>(
//!     &mut stream.vertices,
//!     &settings,
//!     &SpaceTrs::default(),
//!     0.25,
//!     &Sequential,
//! ).unwrap();
//! println!("Generated {} triangles", stream.triangles.len());
//! ```
//!
//! # Features
//!
//! - `parallel` (default): Runs independent jobs on rayon via [`Parallel`]
//! - `serde`: Enables serialization support for settings, vertices and meshes

// Modules
pub mod config;
pub mod error;
pub mod hash;
pub mod jobs;
pub mod mesh;
pub mod noise;
pub mod surface;
pub mod visualization;

// Re-export core types for convenience
pub use config::{NoiseSettings, NoiseSettingsBuilder};
pub use error::{MeshError, Result};
pub use hash::{SmallXXHash, SmallXXHash4};
pub use jobs::{DefaultScheduler, JobScheduler, Sequential};
pub use mesh::{
    generate_mesh, Bounds, CubeSphere, FlatHexagonGrid, JobOrdering, MeshData, MeshGenerator,
    MeshStreams, MeshType, PointyHexagonGrid, SharedCubeSphere, SharedSquareGrid,
    SharedTriangleGrid, SingleStream, SquareGrid, UvSphere, Vertex,
};
pub use noise::{NoiseJob, NoiseSelection, NoiseType, Sample, Sample4, SpaceTrs};
pub use surface::SurfaceJob;
pub use visualization::{hash_grid, Shape};

#[cfg(feature = "parallel")]
pub use jobs::Parallel;

// Re-export glam types used throughout the public API
pub use glam::{Vec2, Vec3, Vec4};
