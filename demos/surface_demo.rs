//! Displacing a generated plane with fractal noise

use procedural_meshes::noise::{Lattice2D, LatticeTiling, Perlin, Turbulence};
use procedural_meshes::*;

fn main() -> Result<()> {
    env_logger::init();

    let resolution = 64;
    let grid = SharedSquareGrid::new(resolution)?;
    let mut stream = SingleStream::with_counts(grid.vertex_count(), grid.index_count());
    generate_mesh(&grid, &mut stream, &DefaultScheduler::default())?;

    let settings = NoiseSettingsBuilder::new()
        .seed(7)
        .frequency(2)?
        .octaves(5)?
        .persistence(0.5)?
        .build()?;
    let domain = SpaceTrs {
        rotation: Vec3::new(0.0, 30.0, 0.0),
        ..SpaceTrs::from_scale(1.0)
    };

    println!("Displacing {} vertices...", stream.vertices.len());
    SurfaceJob::run::<Lattice2D<LatticeTiling, Turbulence<Perlin>>, _>(
        &mut stream.vertices,
        &settings,
        &domain,
        0.2,
        &DefaultScheduler::default(),
    )?;

    let (low, high) = stream
        .vertices
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position.y), hi.max(v.position.y))
        });
    let steepest = stream
        .vertices
        .iter()
        .map(|v| v.normal.y)
        .fold(1.0, f32::min);

    println!("  Height range: {:.4} .. {:.4}", low, high);
    println!(
        "  Steepest slope: {:.1} degrees",
        steepest.clamp(-1.0, 1.0).acos().to_degrees()
    );

    // Runtime-selected variant on the same plane
    let selection = NoiseSelection {
        kind: NoiseType::Simplex,
        tiling: false,
        dimensions: 2,
    };
    SurfaceJob::run_with(
        selection.resolve()?,
        &mut stream.vertices,
        &settings,
        &SpaceTrs::default(),
        0.1,
        &Sequential,
    )?;
    let centre = &stream.vertices[stream.vertices.len() / 2];
    println!(
        "  Simplex centre vertex: y={:+.4} normal={} tangent={}",
        centre.position.y, centre.normal, centre.tangent
    );

    Ok(())
}
