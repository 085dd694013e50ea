//! Output sinks for generated meshes
//!
//! Generators write vertices and triangles into pre-sized slots by index.
//! Writing outside the sized range is a caller bug and panics; use
//! [`crate::mesh::generate_mesh`] to get a `BufferTooSmall` error instead.

use glam::{IVec3, Vec2, Vec3, Vec4};

use super::Vertex;

/// Indexed vertex and triangle storage
pub trait MeshStreams {
    /// Number of vertex slots
    fn vertex_capacity(&self) -> usize;

    /// Number of triangle slots
    fn triangle_capacity(&self) -> usize;

    fn set_vertex(&mut self, index: usize, vertex: Vertex);

    /// Store a triangle; every component must be a valid vertex index
    fn set_triangle(&mut self, index: usize, triangle: IVec3);
}

fn to_indices(triangle: IVec3) -> [u32; 3] {
    debug_assert!(
        triangle.min_element() >= 0,
        "negative vertex index in {triangle}"
    );
    triangle.as_uvec3().to_array()
}

/// Interleaved storage: one vertex struct per slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleStream {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<[u32; 3]>,
}

impl SingleStream {
    /// Storage sized for exactly `vertex_count` vertices and `index_count / 3`
    /// triangles
    pub fn with_counts(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: vec![Vertex::default(); vertex_count],
            triangles: vec![[0; 3]; index_count / 3],
        }
    }

    /// Flattened triangle list
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

impl MeshStreams for SingleStream {
    fn vertex_capacity(&self) -> usize {
        self.vertices.len()
    }

    fn triangle_capacity(&self) -> usize {
        self.triangles.len()
    }

    fn set_vertex(&mut self, index: usize, vertex: Vertex) {
        self.vertices[index] = vertex;
    }

    fn set_triangle(&mut self, index: usize, triangle: IVec3) {
        self.triangles[index] = to_indices(triangle);
    }
}

/// Engine-agnostic mesh data, one buffer per attribute
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: insert each buffer as a `Mesh` attribute
/// - wgpu: upload the buffers directly as separate vertex streams
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Tangents with handedness in `w`
    pub tangents: Vec<[f32; 4]>,
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn with_counts(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: vec![[0.0; 3]; vertex_count],
            normals: vec![[0.0; 3]; vertex_count],
            tangents: vec![[0.0; 4]; vertex_count],
            uvs: vec![[0.0; 2]; vertex_count],
            indices: vec![0; index_count - index_count % 3],
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Reassemble the vertex stored at `index`
    pub fn vertex(&self, index: usize) -> Vertex {
        Vertex {
            position: Vec3::from_array(self.positions[index]),
            normal: Vec3::from_array(self.normals[index]),
            tangent: Vec4::from_array(self.tangents[index]),
            tex_coord0: Vec2::from_array(self.uvs[index]),
        }
    }

    /// Triangle at `index`
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        let start = index * 3;
        [
            self.indices[start],
            self.indices[start + 1],
            self.indices[start + 2],
        ]
    }
}

impl MeshStreams for MeshData {
    fn vertex_capacity(&self) -> usize {
        self.positions.len()
    }

    fn triangle_capacity(&self) -> usize {
        self.indices.len() / 3
    }

    fn set_vertex(&mut self, index: usize, vertex: Vertex) {
        self.positions[index] = vertex.position.to_array();
        self.normals[index] = vertex.normal.to_array();
        self.tangents[index] = vertex.tangent.to_array();
        self.uvs[index] = vertex.tex_coord0.to_array();
    }

    fn set_triangle(&mut self, index: usize, triangle: IVec3) {
        let start = index * 3;
        self.indices[start..start + 3].copy_from_slice(&to_indices(triangle));
    }
}

/// Buffers the writes of one job so they can be replayed in job order
#[derive(Debug, Default)]
pub(crate) struct RecordedWrites {
    vertex_capacity: usize,
    triangle_capacity: usize,
    vertices: Vec<(usize, Vertex)>,
    triangles: Vec<(usize, IVec3)>,
}

impl RecordedWrites {
    pub(crate) fn new(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            vertex_capacity,
            triangle_capacity,
            ..Default::default()
        }
    }

    pub(crate) fn replay<S: MeshStreams + ?Sized>(self, streams: &mut S) {
        for (index, vertex) in self.vertices {
            streams.set_vertex(index, vertex);
        }
        for (index, triangle) in self.triangles {
            streams.set_triangle(index, triangle);
        }
    }
}

impl MeshStreams for RecordedWrites {
    fn vertex_capacity(&self) -> usize {
        self.vertex_capacity
    }

    fn triangle_capacity(&self) -> usize {
        self.triangle_capacity
    }

    fn set_vertex(&mut self, index: usize, vertex: Vertex) {
        self.vertices.push((index, vertex));
    }

    fn set_triangle(&mut self, index: usize, triangle: IVec3) {
        self.triangles.push((index, triangle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vertex() -> Vertex {
        Vertex {
            position: Vec3::new(1.0, 2.0, 3.0),
            normal: Vec3::Y,
            tangent: Vec4::new(1.0, 0.0, 0.0, -1.0),
            tex_coord0: Vec2::new(0.25, 0.75),
        }
    }

    #[test]
    fn test_single_stream_writes() {
        let mut stream = SingleStream::with_counts(4, 6);
        assert_eq!(stream.vertex_capacity(), 4);
        assert_eq!(stream.triangle_capacity(), 2);

        stream.set_vertex(2, sample_vertex());
        stream.set_triangle(1, IVec3::new(3, 2, 1));
        assert_eq!(stream.vertices[2], sample_vertex());
        assert_eq!(stream.indices(), vec![0, 0, 0, 3, 2, 1]);
    }

    #[test]
    fn test_mesh_data_writes() {
        let mut mesh = MeshData::with_counts(3, 3);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_empty());

        mesh.set_vertex(1, sample_vertex());
        mesh.set_triangle(0, IVec3::new(0, 2, 1));
        assert_eq!(mesh.vertex(1), sample_vertex());
        assert_eq!(mesh.positions[1], [1.0, 2.0, 3.0]);
        assert_eq!(mesh.tangents[1], [1.0, 0.0, 0.0, -1.0]);
        assert_eq!(mesh.triangle(0), [0, 2, 1]);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_vertex_panics() {
        let mut mesh = MeshData::with_counts(2, 3);
        mesh.set_vertex(2, sample_vertex());
    }

    #[test]
    fn test_recorded_writes_replay() {
        let mut recorded = RecordedWrites::new(4, 1);
        recorded.set_vertex(3, sample_vertex());
        recorded.set_triangle(0, IVec3::new(1, 2, 3));

        let mut stream = SingleStream::with_counts(4, 3);
        recorded.replay(&mut stream);
        assert_eq!(stream.vertices[3], sample_vertex());
        assert_eq!(stream.triangles[0], [1, 2, 3]);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(MeshData::default().is_empty());
        assert_eq!(MeshData::default().triangle_count(), 0);
    }
}
