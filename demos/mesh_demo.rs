//! Demonstration of mesh generation

use std::time::Instant;

use procedural_meshes::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Generating a shared square grid...");
    let (mesh, bounds) = MeshType::SharedSquareGrid.generate(10, &DefaultScheduler::default())?;

    println!("\nMesh statistics:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Indices: {}", mesh.indices.len());
    println!("  Bounds: center {} size {}", bounds.center, bounds.size);

    // Memory estimate
    let mem_positions = mesh.positions.len() * 12; // 3 floats * 4 bytes
    let mem_normals = mesh.normals.len() * 12;
    let mem_tangents = mesh.tangents.len() * 16;
    let mem_uvs = mesh.uvs.len() * 8;
    let mem_indices = mesh.indices.len() * 4;
    let total = mem_positions + mem_normals + mem_tangents + mem_uvs + mem_indices;
    println!("\nMemory usage:");
    println!("  Positions: {} bytes", mem_positions);
    println!("  Normals: {} bytes", mem_normals);
    println!("  Tangents: {} bytes", mem_tangents);
    println!("  UVs: {} bytes", mem_uvs);
    println!("  Indices: {} bytes", mem_indices);
    println!("  Total: {} bytes ({:.2} MB)", total, total as f32 / 1024.0 / 1024.0);

    // Interleaved sink
    let sphere = SharedCubeSphere::new(8)?;
    let mut stream = SingleStream::with_counts(sphere.vertex_count(), sphere.index_count());
    generate_mesh(&sphere, &mut stream, &Sequential)?;
    println!(
        "\nSingle stream cube sphere: {} vertices, {} triangles",
        stream.vertices.len(),
        stream.triangles.len()
    );

    // Undersized sinks are rejected
    let mut small = SingleStream::with_counts(4, 6);
    if let Err(e) = generate_mesh(&sphere, &mut small, &Sequential) {
        println!("Undersized sink rejected: {e}");
    }

    println!("\n=== Testing all mesh types ===");
    for mesh_type in MeshType::ALL {
        for resolution in [1, 10, 50] {
            let start = Instant::now();
            let (mesh, _) = mesh_type.generate(resolution, &DefaultScheduler::default())?;
            println!(
                "{:?} R={}: {} vertices, {} triangles in {:?}",
                mesh_type,
                resolution,
                mesh.vertex_count(),
                mesh.triangle_count(),
                start.elapsed()
            );
        }
    }

    Ok(())
}
