//! # Mesh Errors
//!
//! Error types for mesh construction and scene import. Slicing and carving
//! themselves never fail; errors only arise where data enters the crate.

use thiserror::Error;

/// Errors that can occur while building meshes or importing a scene.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Index sequence does not form whole triangles.
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// An index points past the end of the vertex sequence.
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Too many vertices to address with `u32` indices.
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// The importer handed over a scene without a usable root.
    #[error("Incomplete scene: {message}")]
    IncompleteScene { message: String },

    /// A node or mesh refers to something the scene does not contain.
    #[error("Invalid scene reference: {message}")]
    InvalidReference { message: String },

    /// A texture could not be loaded by the texture loader.
    #[error("Failed to load texture '{path}': {message}")]
    TextureLoad { path: String, message: String },
}

impl MeshError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates an incomplete scene error.
    pub fn incomplete_scene(message: impl Into<String>) -> Self {
        Self::IncompleteScene {
            message: message.into(),
        }
    }

    /// Creates an invalid reference error.
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }

    /// Creates a texture load error.
    pub fn texture_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TextureLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for mesh construction and import.
pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::IndexOutOfRange {
            index: 7,
            vertex_count: 3,
        };
        assert!(err.to_string().contains("7"));
        assert!(err.to_string().contains("3 vertices"));

        let err = MeshError::texture_load("skin.png", "not found");
        assert!(err.to_string().contains("skin.png"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
