//! # Mesh Slice
//!
//! Runtime destructive editing of indexed triangle meshes.
//!
//! ## Architecture
//!
//! ```text
//! import (scene graph) → Model → partition (slice / carve) → Model(s)
//!                          ↑
//!             predicates (ray vs. box, point vs. cylinder)
//! ```
//!
//! ## Operations
//!
//! - **Planar slice**: split a mesh at an axis-aligned plane into a left
//!   and a right mesh. Triangles crossing the plane are dropped.
//! - **Cylindrical carve**: remove every triangle with a vertex inside a
//!   finite cylinder.
//! - **Hit test**: slab test of a ray against an axis-aligned box.
//!
//! Every output mesh is compacted: it only holds the vertices its triangles
//! reference, in the order they were first referenced.
//!
//! ## Usage
//!
//! ```rust
//! use glam::Vec3;
//! use mesh_slice::{slice_mesh_cylinder, Mesh, Vertex};
//!
//! let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y]
//!     .into_iter()
//!     .map(Vertex::from_position)
//!     .collect();
//! let mesh = Mesh::new(vertices, vec![0, 1, 2], Vec::new()).unwrap();
//!
//! let carved = slice_mesh_cylinder(&mesh, Vec3::NEG_Z, Vec3::Z, 0.1);
//! assert!(carved.is_empty());
//! ```

pub mod error;
pub mod import;
pub mod mesh;
pub mod model;
pub mod partition;
pub mod predicates;
pub mod texture;
pub mod vertex;

pub use error::{MeshError, MeshResult};
pub use mesh::Mesh;
pub use model::{CarveSummary, Model, SamplerBinding};
pub use partition::{carve_mesh, slice_mesh, slice_mesh_along, slice_mesh_cylinder, Axis, PlanarSplit};
pub use predicates::{hit_bounding_box, Cylinder};
pub use texture::{TextureHandle, TextureKind, TextureRecord, TextureTable};
pub use vertex::{Vertex, VertexAttribute, VERTEX_ATTRIBUTES, VERTEX_STRIDE};
