//! # Vertex
//!
//! Interleaved vertex record shared by every mesh, plus the attribute layout
//! a renderer needs to bind it.

use glam::{Vec2, Vec3};
use std::mem::{offset_of, size_of};

// =============================================================================
// VERTEX
// =============================================================================

/// A single mesh vertex.
///
/// `#[repr(C)]` and `Pod` so a vertex slice can be uploaded to a device as
/// raw bytes with [`bytemuck::cast_slice`].
///
/// # Example
///
/// ```rust
/// use mesh_slice::Vertex;
/// use glam::Vec3;
///
/// let v = Vertex::from_position(Vec3::new(1.0, 2.0, 3.0));
/// assert_eq!(v.normal, Vec3::ZERO);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: Vec3,
    /// Surface normal.
    pub normal: Vec3,
    /// Texture coordinate.
    pub tex_coords: Vec2,
    /// Tangent for normal mapping.
    pub tangent: Vec3,
    /// Bitangent for normal mapping.
    pub bitangent: Vec3,
}

impl Vertex {
    /// Creates a vertex from all of its attributes.
    pub fn new(
        position: Vec3,
        normal: Vec3,
        tex_coords: Vec2,
        tangent: Vec3,
        bitangent: Vec3,
    ) -> Self {
        Self {
            position,
            normal,
            tex_coords,
            tangent,
            bitangent,
        }
    }

    /// Creates a vertex with only a position; every other attribute is zero.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

// =============================================================================
// ATTRIBUTE LAYOUT
// =============================================================================

/// One vertex attribute as a renderer binds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: u32,
    /// Byte offset inside [`Vertex`].
    pub offset: usize,
}

/// Size in bytes of one [`Vertex`].
pub const VERTEX_STRIDE: usize = size_of::<Vertex>();

/// Attribute table for [`Vertex`]: position, normal, texcoord, tangent,
/// bitangent at locations 0 through 4.
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 5] = [
    VertexAttribute {
        location: 0,
        components: 3,
        offset: offset_of!(Vertex, position),
    },
    VertexAttribute {
        location: 1,
        components: 3,
        offset: offset_of!(Vertex, normal),
    },
    VertexAttribute {
        location: 2,
        components: 2,
        offset: offset_of!(Vertex, tex_coords),
    },
    VertexAttribute {
        location: 3,
        components: 3,
        offset: offset_of!(Vertex, tangent),
    },
    VertexAttribute {
        location: 4,
        components: 3,
        offset: offset_of!(Vertex, bitangent),
    },
];
