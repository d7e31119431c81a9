//! # Scene Import
//!
//! Builds a [`Model`] from the scene description handed over by an external
//! asset importer.
//!
//! ## Traversal
//!
//! The node tree is walked with an explicit stack: depth-first, a node's
//! meshes before its children, children in declared order. Deeply nested
//! scenes cannot overflow the call stack.
//!
//! ## Textures
//!
//! Material textures go through the model's [`TextureTable`], so each path is
//! loaded once per model no matter how many meshes use it.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::model::Model;
use crate::texture::{TextureHandle, TextureKind, TextureTable};
use crate::vertex::Vertex;
use glam::{Vec2, Vec3};
use log::{debug, warn};
use std::path::Path;

// =============================================================================
// SCENE DESCRIPTION
// =============================================================================

/// Texture slot of an imported material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    /// Diffuse color maps.
    Diffuse,
    /// Specular maps.
    Specular,
    /// Height maps; bound as normal maps.
    Height,
    /// Ambient maps; bound as height maps.
    Ambient,
}

impl MaterialSlot {
    /// Slots in the order their textures are attached to a mesh.
    pub const SCAN_ORDER: [MaterialSlot; 4] = [
        MaterialSlot::Diffuse,
        MaterialSlot::Specular,
        MaterialSlot::Height,
        MaterialSlot::Ambient,
    ];

    /// Shader role of textures found in this slot.
    pub fn texture_kind(self) -> TextureKind {
        match self {
            MaterialSlot::Diffuse => TextureKind::Diffuse,
            MaterialSlot::Specular => TextureKind::Specular,
            MaterialSlot::Height => TextureKind::Normal,
            MaterialSlot::Ambient => TextureKind::Height,
        }
    }
}

/// A material: texture paths per slot, in declared order.
#[derive(Debug, Clone, Default)]
pub struct ImportedMaterial {
    /// `(slot, path)` pairs.
    pub textures: Vec<(MaterialSlot, String)>,
}

/// Raw mesh data as produced by the importer.
///
/// Optional attribute arrays must match `positions` in length when present.
#[derive(Debug, Clone, Default)]
pub struct ImportedMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals.
    pub normals: Option<Vec<Vec3>>,
    /// First texture coordinate channel.
    pub tex_coords: Option<Vec<Vec2>>,
    /// Tangents; only read when texture coordinates are present.
    pub tangents: Option<Vec<Vec3>>,
    /// Bitangents; only read when texture coordinates are present.
    pub bitangents: Option<Vec<Vec3>>,
    /// Faces as index lists; all must be triangles.
    pub faces: Vec<Vec<u32>>,
    /// Index into [`SceneDescription::materials`].
    pub material: usize,
}

/// A node of the scene graph.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Indices into [`SceneDescription::meshes`].
    pub meshes: Vec<usize>,
    /// Child nodes, in declared order.
    pub children: Vec<SceneNode>,
}

/// Everything the importer hands over for one file.
#[derive(Debug, Clone, Default)]
pub struct SceneDescription {
    /// Mesh pool referenced by nodes.
    pub meshes: Vec<ImportedMesh>,
    /// Material pool referenced by meshes.
    pub materials: Vec<ImportedMaterial>,
    /// Root node; `None` if the importer produced no hierarchy.
    pub root: Option<SceneNode>,
    /// Set by the importer when it could not read the whole file.
    pub incomplete: bool,
}

// =============================================================================
// TEXTURE LOADER
// =============================================================================

/// Collaborator that turns a texture path into a device texture id.
pub trait TextureLoader {
    /// Loads `path`, relative to `directory`.
    fn load(&mut self, path: &str, directory: &Path, gamma_correction: bool) -> MeshResult<u32>;
}

impl<F> TextureLoader for F
where
    F: FnMut(&str, &Path, bool) -> MeshResult<u32>,
{
    fn load(&mut self, path: &str, directory: &Path, gamma_correction: bool) -> MeshResult<u32> {
        self(path, directory, gamma_correction)
    }
}

// =============================================================================
// IMPORT
// =============================================================================

/// Directory part of a model path: everything before the last `/`, or the
/// whole path if it has none.
pub fn model_directory(path: &str) -> &str {
    match path.rfind('/') {
        Some(end) => &path[..end],
        None => path,
    }
}

impl Model {
    /// Builds a model from an importer's scene.
    ///
    /// # Arguments
    ///
    /// * `scene` - Scene description from the importer
    /// * `path` - Path the scene was read from; its directory resolves textures
    /// * `gamma_correction` - Forwarded to the texture loader
    /// * `loader` - Loads each distinct texture path once
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_slice::import::{ImportedMesh, SceneDescription, SceneNode};
    /// use mesh_slice::{MeshResult, Model};
    /// use glam::Vec3;
    /// use std::path::Path;
    ///
    /// let scene = SceneDescription {
    ///     meshes: vec![ImportedMesh {
    ///         positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
    ///         faces: vec![vec![0, 1, 2]],
    ///         ..Default::default()
    ///     }],
    ///     materials: vec![Default::default()],
    ///     root: Some(SceneNode { meshes: vec![0], children: vec![] }),
    ///     incomplete: false,
    /// };
    /// let mut loader = |_: &str, _: &Path, _: bool| -> MeshResult<u32> { Ok(1) };
    /// let model = Model::from_scene(&scene, "res/objects/tri.obj", false, &mut loader).unwrap();
    /// assert_eq!(model.triangle_count(), 1);
    /// assert_eq!(model.directory(), Path::new("res/objects"));
    /// ```
    pub fn from_scene<L: TextureLoader>(
        scene: &SceneDescription,
        path: &str,
        gamma_correction: bool,
        loader: &mut L,
    ) -> MeshResult<Model> {
        if scene.incomplete {
            return Err(MeshError::incomplete_scene(format!(
                "importer flagged '{}' as incomplete",
                path
            )));
        }
        let root = scene.root.as_ref().ok_or_else(|| {
            MeshError::incomplete_scene(format!("'{}' has no root node", path))
        })?;

        let directory = Path::new(model_directory(path));
        let mut textures = TextureTable::new();
        let mut meshes = Vec::new();

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            for &mesh_index in &node.meshes {
                let imported = scene.meshes.get(mesh_index).ok_or_else(|| {
                    MeshError::invalid_reference(format!(
                        "node references mesh {} of {}",
                        mesh_index,
                        scene.meshes.len()
                    ))
                })?;
                let handles = material_textures(
                    scene,
                    imported.material,
                    directory,
                    gamma_correction,
                    &mut textures,
                    loader,
                )?;
                meshes.push(convert_mesh(imported, handles)?);
            }
            // Reversed so the first child is popped next
            stack.extend(node.children.iter().rev());
        }

        debug!(
            "imported '{}': {} meshes, {} textures",
            path,
            meshes.len(),
            textures.len()
        );

        Model::new(meshes, textures, directory, gamma_correction)
    }
}

/// Converts one imported mesh into interleaved vertices and a flat index list.
fn convert_mesh(imported: &ImportedMesh, textures: Vec<TextureHandle>) -> MeshResult<Mesh> {
    let count = imported.positions.len();
    let check = |name: &str, len: Option<usize>| match len {
        Some(len) if len != count => Err(MeshError::invalid_topology(format!(
            "{} has {} entries for {} vertices",
            name, len, count
        ))),
        _ => Ok(()),
    };
    check("normals", imported.normals.as_ref().map(Vec::len))?;
    check("texture coordinates", imported.tex_coords.as_ref().map(Vec::len))?;

    let textured = imported.tex_coords.is_some();
    if textured {
        check("tangents", imported.tangents.as_ref().map(Vec::len))?;
        check("bitangents", imported.bitangents.as_ref().map(Vec::len))?;
    }

    let attribute = |values: &Option<Vec<Vec3>>, i: usize| {
        values.as_ref().map_or(Vec3::ZERO, |values| values[i])
    };

    let vertices = (0..count)
        .map(|i| {
            let mut vertex = Vertex::from_position(imported.positions[i]);
            vertex.normal = attribute(&imported.normals, i);
            if let Some(tex_coords) = &imported.tex_coords {
                vertex.tex_coords = tex_coords[i];
                vertex.tangent = attribute(&imported.tangents, i);
                vertex.bitangent = attribute(&imported.bitangents, i);
            }
            vertex
        })
        .collect();

    let mut indices = Vec::with_capacity(imported.faces.len() * 3);
    for (i, face) in imported.faces.iter().enumerate() {
        if face.len() != 3 {
            return Err(MeshError::invalid_topology(format!(
                "face {} has {} indices; the importer must triangulate",
                i,
                face.len()
            )));
        }
        indices.extend_from_slice(face);
    }

    Mesh::new(vertices, indices, textures)
}

/// Resolves a material's textures in slot order, loading unseen paths.
fn material_textures<L: TextureLoader>(
    scene: &SceneDescription,
    material: usize,
    directory: &Path,
    gamma_correction: bool,
    table: &mut TextureTable,
    loader: &mut L,
) -> MeshResult<Vec<TextureHandle>> {
    let material = scene.materials.get(material).ok_or_else(|| {
        MeshError::invalid_reference(format!(
            "mesh references material {} of {}",
            material,
            scene.materials.len()
        ))
    })?;

    let mut handles = Vec::new();
    for slot in MaterialSlot::SCAN_ORDER {
        for (_, path) in material.textures.iter().filter(|(s, _)| *s == slot) {
            if path.is_empty() {
                warn!("skipping {:?} texture with an empty path", slot);
                continue;
            }
            let handle = table.get_or_load(path, slot.texture_kind(), || {
                loader.load(path, directory, gamma_correction)
            })?;
            handles.push(handle);
        }
    }
    Ok(handles)
}
