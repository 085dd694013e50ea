//! Hash grid statistics, the data a hash visualizer colours instances with

use procedural_meshes::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Hash Demo\n");

    let resolution = 32;
    let domain = SpaceTrs::from_scale(8.0);
    let hashes = hash_grid(resolution, 42, &domain, &DefaultScheduler::default())?;

    // Bucket the low byte like a visualizer would map it to colour
    let mut buckets = [0usize; 8];
    for hash in &hashes {
        buckets[(hash & 255) as usize / 32] += 1;
    }
    println!("{} instances, low byte distribution:", hashes.len());
    for (i, count) in buckets.iter().enumerate() {
        println!("  {:3}..{:3}: {}", i * 32, i * 32 + 31, "#".repeat(count / 4));
    }

    // Instances sharing a unit cell share a hash
    let distinct: std::collections::HashSet<_> = hashes.iter().collect();
    println!("\n{} distinct cell hashes", distinct.len());

    // Scalar and four-wide hashing agree lane by lane
    let scalar = SmallXXHash::seed(42).eat(1).eat(2).finalize();
    let wide = SmallXXHash4::splat(SmallXXHash::seed(42))
        .eat(glam::IVec4::splat(1))
        .eat(glam::IVec4::splat(2))
        .finalize();
    println!("Scalar {:#010x}, wide {:?}", scalar, wide.to_array());

    for shape in Shape::ALL {
        let points = shape.points(resolution)?;
        println!("{:?}: {} batches of four", shape, points.len());
    }

    Ok(())
}
