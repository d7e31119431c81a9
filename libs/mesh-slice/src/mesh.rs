//! # Mesh Data Structure
//!
//! Core mesh representation: interleaved vertices, a flat triangle index
//! list, and handles into the owning model's texture table.

use crate::error::{MeshError, MeshResult};
use crate::texture::TextureHandle;
use crate::vertex::Vertex;
use glam::Vec3;

/// A triangle mesh with vertices, indices and texture handles.
///
/// Invariants, checked by [`Mesh::new`] and preserved by every slicing
/// operation:
/// - the index count is a multiple of 3
/// - every index is below the vertex count
///
/// # Example
///
/// ```rust
/// use mesh_slice::{Mesh, Vertex};
/// use glam::Vec3;
///
/// let vertices = vec![
///     Vertex::from_position(Vec3::ZERO),
///     Vertex::from_position(Vec3::X),
///     Vertex::from_position(Vec3::Y),
/// ];
/// let mesh = Mesh::new(vertices, vec![0, 1, 2], Vec::new()).unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Interleaved vertex attributes.
    vertices: Vec<Vertex>,
    /// Triangle indices (3 per triangle).
    indices: Vec<u32>,
    /// Textures used by this mesh, in binding order.
    textures: Vec<TextureHandle>,
}

impl Mesh {
    /// Creates a mesh, validating its index buffer.
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        textures: Vec<TextureHandle>,
    ) -> MeshResult<Self> {
        let mesh = Self {
            vertices,
            indices,
            textures,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Creates a mesh from buffers already known to satisfy the invariants.
    pub(crate) fn from_valid_parts(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        textures: Vec<TextureHandle>,
    ) -> Self {
        debug_assert!(indices.len() % 3 == 0);
        debug_assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        Self {
            vertices,
            indices,
            textures,
        }
    }

    /// Creates an empty mesh.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of indices.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns a reference to the flat index list.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the texture handles of this mesh.
    #[inline]
    pub fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Returns the position of the vertex at `index`.
    #[inline]
    pub fn position(&self, index: u32) -> Vec3 {
        self.vertices[index as usize].position
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        Some(
            self.vertices[1..]
                .iter()
                .fold((first, first), |(min, max), v| {
                    (min.min(v.position), max.max(v.position))
                }),
        )
    }

    /// Validates the mesh invariants.
    ///
    /// Checks:
    /// - The vertex count fits in `u32` indices
    /// - The index count is a multiple of 3
    /// - All indices are in range
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        if vertex_count > u32::MAX as usize {
            return Err(MeshError::TooManyVertices {
                count: vertex_count,
                max: u32::MAX as usize,
            });
        }

        if self.indices.len() % 3 != 0 {
            return Err(MeshError::invalid_topology(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }

        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        Ok(())
    }

    /// Vertex buffer contents for device upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents for device upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_vertices() -> Vec<Vertex> {
        vec![
            Vertex::from_position(Vec3::new(0.0, 0.0, 0.0)),
            Vertex::from_position(Vec3::new(1.0, 0.0, 0.0)),
            Vertex::from_position(Vec3::new(0.0, 1.0, 0.0)),
        ]
    }

    #[test]
    fn test_mesh_empty() {
        let mesh = Mesh::empty();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.bounding_box().is_none());
    }

    #[test]
    fn test_mesh_new_valid() {
        let mesh = Mesh::new(triangle_vertices(), vec![0, 1, 2], Vec::new()).unwrap();
        assert!(!mesh.is_empty());
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_mesh_new_rejects_partial_triangle() {
        let result = Mesh::new(triangle_vertices(), vec![0, 1], Vec::new());
        assert!(matches!(result, Err(MeshError::InvalidTopology { .. })));
    }

    #[test]
    fn test_mesh_new_rejects_out_of_range_index() {
        let result = Mesh::new(triangle_vertices(), vec![0, 1, 3], Vec::new());
        assert!(matches!(
            result,
            Err(MeshError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            })
        ));
    }

    #[test]
    fn test_vertices_without_indices_is_empty() {
        let mesh = Mesh::new(triangle_vertices(), Vec::new(), Vec::new()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_mesh_bounding_box() {
        let vertices = vec![
            Vertex::from_position(Vec3::new(-1.0, -2.0, -3.0)),
            Vertex::from_position(Vec3::new(4.0, 5.0, 6.0)),
            Vertex::from_position(Vec3::new(0.0, 0.0, 0.0)),
        ];
        let mesh = Mesh::new(vertices, vec![0, 1, 2], Vec::new()).unwrap();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_buffer_bytes() {
        let mesh = Mesh::new(triangle_vertices(), vec![0, 1, 2], Vec::new()).unwrap();
        assert_eq!(mesh.vertex_bytes().len(), 3 * crate::vertex::VERTEX_STRIDE);
        assert_eq!(mesh.index_bytes().len(), 3 * 4);
    }
}
