//! # Mesh Partitioner
//!
//! Splits or carves a mesh's triangles against a cutting primitive.
//!
//! ## Policy
//!
//! Triangles are kept or dropped whole. No vertex is synthesized at a cut:
//! a triangle straddling a plane is dropped from both halves, and a triangle
//! with any vertex inside a carving cylinder is removed. Cut seams are
//! therefore jagged.
//!
//! Every output gets a freshly compacted vertex buffer. A vertex is copied
//! the first time a kept triangle references it, so outputs carry no unused
//! vertices and their indices run densely from 0.

use crate::mesh::Mesh;
use crate::predicates::Cylinder;
use crate::texture::TextureHandle;
use crate::vertex::Vertex;
use glam::Vec3;

// =============================================================================
// AXIS
// =============================================================================

/// Coordinate axis a planar slice is taken along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// X axis.
    #[default]
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// Component index into a `Vec3`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Coordinate of `point` along this axis.
    #[inline]
    pub fn coordinate(self, point: Vec3) -> f32 {
        point[self.index()]
    }
}

// =============================================================================
// INDEX COMPACTION
// =============================================================================

/// Builds one output mesh from the kept triangles of a source mesh.
struct CompactMesh<'a> {
    source: &'a Mesh,
    /// Source vertex index -> output vertex index, filled on first use.
    remap: Vec<Option<u32>>,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl<'a> CompactMesh<'a> {
    fn new(source: &'a Mesh) -> Self {
        Self {
            source,
            remap: vec![None; source.vertex_count()],
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    fn push_triangle(&mut self, triangle: [u32; 3]) {
        for old in triangle {
            let new = match self.remap[old as usize] {
                Some(new) => new,
                None => {
                    let new = self.vertices.len() as u32;
                    self.vertices.push(self.source.vertices()[old as usize]);
                    self.remap[old as usize] = Some(new);
                    new
                }
            };
            self.indices.push(new);
        }
    }

    fn finish(self) -> Mesh {
        let textures: Vec<TextureHandle> = self.source.textures().to_vec();
        Mesh::from_valid_parts(self.vertices, self.indices, textures)
    }
}

// =============================================================================
// PLANAR SLICE
// =============================================================================

/// The two halves of a planar slice. A side that kept no triangle is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarSplit {
    /// Triangles with every vertex at or below the threshold.
    pub left: Option<Mesh>,
    /// Triangles with every vertex above the threshold.
    pub right: Option<Mesh>,
}

impl PlanarSplit {
    /// Flattens the split into 0, 1 or 2 meshes, left first.
    pub fn into_meshes(self) -> Vec<Mesh> {
        self.left.into_iter().chain(self.right).collect()
    }
}

/// Side of the threshold a triangle falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Straddling,
}

fn classify(mesh: &Mesh, triangle: [u32; 3], axis: Axis, threshold: f32) -> Side {
    let mut any_left = false;
    let mut any_right = false;
    for index in triangle {
        if axis.coordinate(mesh.position(index)) <= threshold {
            any_left = true;
        } else {
            any_right = true;
        }
    }
    match (any_left, any_right) {
        (true, false) => Side::Left,
        (false, true) => Side::Right,
        _ => Side::Straddling,
    }
}

fn non_empty(mesh: Mesh) -> Option<Mesh> {
    (!mesh.is_empty()).then_some(mesh)
}

/// Splits a mesh along `axis` at `threshold`.
///
/// # Example
///
/// ```rust
/// use mesh_slice::{slice_mesh_along, Axis, Mesh, Vertex};
/// use glam::Vec3;
///
/// let vertices = vec![
///     Vertex::from_position(Vec3::new(0.0, -3.0, 0.0)),
///     Vertex::from_position(Vec3::new(1.0, -3.0, 0.0)),
///     Vertex::from_position(Vec3::new(0.0, -2.0, 0.0)),
/// ];
/// let mesh = Mesh::new(vertices, vec![0, 1, 2], Vec::new()).unwrap();
/// let split = slice_mesh_along(&mesh, Axis::Y, 0.0);
/// assert!(split.left.is_some());
/// assert!(split.right.is_none());
/// ```
pub fn slice_mesh_along(mesh: &Mesh, axis: Axis, threshold: f32) -> PlanarSplit {
    let mut left = CompactMesh::new(mesh);
    let mut right = CompactMesh::new(mesh);

    for triangle in mesh.triangles() {
        match classify(mesh, triangle, axis, threshold) {
            Side::Left => left.push_triangle(triangle),
            Side::Right => right.push_triangle(triangle),
            Side::Straddling => {}
        }
    }

    PlanarSplit {
        left: non_empty(left.finish()),
        right: non_empty(right.finish()),
    }
}

/// Splits a mesh at `x_threshold` on the X axis.
///
/// Returns 0, 1 or 2 non-empty meshes, the left (`x <= x_threshold`) half
/// first.
pub fn slice_mesh(mesh: &Mesh, x_threshold: f32) -> Vec<Mesh> {
    slice_mesh_along(mesh, Axis::X, x_threshold).into_meshes()
}

// =============================================================================
// CYLINDRICAL CARVE
// =============================================================================

/// Removes every triangle with at least one vertex inside `cylinder`.
///
/// The result may be empty; check [`Mesh::is_empty`] before uploading it.
pub fn carve_mesh(mesh: &Mesh, cylinder: &Cylinder) -> Mesh {
    let mut kept = CompactMesh::new(mesh);

    for triangle in mesh.triangles() {
        let hit = triangle
            .iter()
            .any(|&index| cylinder.contains(mesh.position(index)));
        if !hit {
            kept.push_triangle(triangle);
        }
    }

    kept.finish()
}

/// Carves the cylinder `axis_start..axis_end` of `radius` out of a mesh.
///
/// # Example
///
/// ```rust
/// use mesh_slice::{slice_mesh_cylinder, Mesh, Vertex};
/// use glam::Vec3;
///
/// let vertices = vec![
///     Vertex::from_position(Vec3::new(0.0, 0.0, 1.0)),
///     Vertex::from_position(Vec3::new(0.1, 0.0, 1.0)),
///     Vertex::from_position(Vec3::new(0.0, 0.1, 1.0)),
/// ];
/// let mesh = Mesh::new(vertices, vec![0, 1, 2], Vec::new()).unwrap();
/// let carved = slice_mesh_cylinder(&mesh, Vec3::ZERO, Vec3::Z * 2.0, 0.5);
/// assert!(carved.is_empty());
/// ```
pub fn slice_mesh_cylinder(mesh: &Mesh, axis_start: Vec3, axis_end: Vec3, radius: f32) -> Mesh {
    carve_mesh(mesh, &Cylinder::new(axis_start, axis_end, radius))
}
