//! # Texture Table
//!
//! Owned arena of texture records for one model. Meshes refer to textures by
//! [`TextureHandle`] instead of holding copies, and the table de-duplicates
//! records by source path for the lifetime of the model.

use crate::error::MeshResult;
use std::collections::HashMap;

// =============================================================================
// TEXTURE KIND
// =============================================================================

/// Semantic role of a texture in the lighting shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Base color map.
    Diffuse = 0,
    /// Specular intensity map.
    Specular = 1,
    /// Tangent-space normal map.
    Normal = 2,
    /// Height / displacement map.
    Height = 3,
}

impl TextureKind {
    /// All kinds, in the order materials are scanned.
    pub const ALL: [TextureKind; 4] = [
        TextureKind::Diffuse,
        TextureKind::Specular,
        TextureKind::Normal,
        TextureKind::Height,
    ];

    /// Position of this kind in [`TextureKind::ALL`].
    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Sampler uniform prefix; the shader names samplers `<prefix><n>`
    /// with `n` starting at 1.
    pub fn sampler_prefix(self) -> &'static str {
        match self {
            TextureKind::Diffuse => "texture_diffuse",
            TextureKind::Specular => "texture_specular",
            TextureKind::Normal => "texture_normal",
            TextureKind::Height => "texture_height",
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Small integer handle into a [`TextureTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// Position of the record in its table.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A loaded texture: device id, role, and the path it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRecord {
    /// Device-side texture id returned by the loader.
    pub id: u32,
    /// Role of the texture.
    pub kind: TextureKind,
    /// Path as written in the source material, relative to the model directory.
    pub path: String,
}

// =============================================================================
// TABLE
// =============================================================================

/// De-duplicating texture arena.
///
/// # Example
///
/// ```rust
/// use mesh_slice::{TextureKind, TextureTable};
///
/// let mut table = TextureTable::new();
/// let a = table.get_or_load("skin.png", TextureKind::Diffuse, || Ok(7)).unwrap();
/// let b = table.get_or_load("skin.png", TextureKind::Diffuse, || Ok(9)).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(table.get(a).unwrap().id, 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextureTable {
    records: Vec<TextureRecord>,
    by_path: HashMap<String, TextureHandle>,
}

impl TextureTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct textures.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no texture has been loaded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by handle.
    pub fn get(&self, handle: TextureHandle) -> Option<&TextureRecord> {
        self.records.get(handle.index())
    }

    /// Finds the handle of an already-loaded path.
    pub fn find(&self, path: &str) -> Option<TextureHandle> {
        self.by_path.get(path).copied()
    }

    /// Iterates over handles and records in load order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureHandle, &TextureRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (TextureHandle(i as u32), record))
    }

    /// Inserts a record, or returns the existing handle if its path is known.
    ///
    /// The first record for a path wins, including its kind.
    pub fn insert(&mut self, record: TextureRecord) -> TextureHandle {
        if let Some(handle) = self.find(&record.path) {
            return handle;
        }
        let handle = TextureHandle(self.records.len() as u32);
        self.by_path.insert(record.path.clone(), handle);
        self.records.push(record);
        handle
    }

    /// Returns the handle for `path`, calling `load` to obtain a device id
    /// only the first time the path is seen.
    pub fn get_or_load<F>(
        &mut self,
        path: &str,
        kind: TextureKind,
        load: F,
    ) -> MeshResult<TextureHandle>
    where
        F: FnOnce() -> MeshResult<u32>,
    {
        if let Some(handle) = self.find(path) {
            return Ok(handle);
        }
        let id = load()?;
        Ok(self.insert(TextureRecord {
            id,
            kind,
            path: path.to_string(),
        }))
    }

    /// Returns true if every handle refers to a record of this table.
    pub fn contains_all(&self, handles: &[TextureHandle]) -> bool {
        handles.iter().all(|h| h.index() < self.records.len())
    }
}
