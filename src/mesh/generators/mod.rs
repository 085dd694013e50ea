//! Grid and sphere generators

mod cube_sphere;
mod hexagon_grid;
mod shared_grid;
mod square_grid;
mod uv_sphere;

pub use cube_sphere::{cube_to_sphere, CubeSphere, SharedCubeSphere};
pub use hexagon_grid::{FlatHexagonGrid, PointyHexagonGrid};
pub use shared_grid::{SharedSquareGrid, SharedTriangleGrid};
pub use square_grid::SquareGrid;
pub use uv_sphere::UvSphere;

use glam::IVec3;

/// Triangle `base + offsets`
pub(crate) fn triangle_at(base: i32, offsets: IVec3) -> IVec3 {
    IVec3::splat(base) + offsets
}
