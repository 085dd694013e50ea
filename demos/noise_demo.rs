//! Sampling every noise variant on the visualizer shapes

use procedural_meshes::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Noise Demo\n");

    let settings = NoiseSettingsBuilder::new()
        .seed(42)
        .frequency(4)?
        .octaves(3)?
        .build()?;
    let domain = SpaceTrs::from_scale(2.0);
    let scheduler = DefaultScheduler::default();

    for shape in Shape::ALL {
        let positions = shape.positions(32)?;
        println!("{:?} ({} instances)", shape, positions.len() * 4);
        println!("{:-<60}", "");

        for kind in NoiseType::ALL {
            for tiling in [false, true] {
                let selection = NoiseSelection {
                    kind,
                    tiling,
                    dimensions: 3,
                };
                let noise = selection.resolve()?;
                let values = NoiseJob::run_with(noise, &positions, &settings, &domain, 8, &scheduler)?;

                let (min, max, sum) = values
                    .iter()
                    .flat_map(|v| v.to_array())
                    .fold((f32::MAX, f32::MIN, 0.0), |(lo, hi, sum), v| {
                        (lo.min(v), hi.max(v), sum + v)
                    });
                println!(
                    "  {:<22} tiling={:<5} min={:+.3} max={:+.3} mean={:+.3}",
                    format!("{kind:?}"),
                    tiling,
                    min,
                    max,
                    sum / (values.len() * 4) as f32
                );
            }
        }
        println!();
    }

    // Analytic derivatives at a single point
    type Perlin3 = noise::Lattice3D<noise::LatticeNormal, noise::Perlin>;
    let sample = noise::fractal_noise::<Perlin3>(Vec3::new(0.3, 0.7, 0.1), &settings);
    println!("Perlin at (0.3, 0.7, 0.1): value {:+.4}, gradient {}", sample.v, sample.derivatives());

    Ok(())
}
