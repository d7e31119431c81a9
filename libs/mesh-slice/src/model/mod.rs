//! # Model Aggregator
//!
//! A model is an ordered list of meshes sharing one texture table. This
//! module applies the partitioner to every mesh of a model, recombines the
//! results, and derives the model's bounding box.
//!
//! ## Bounding Box
//!
//! The bounding box is never stored. Every query scans the current mesh set,
//! so a carve is reflected immediately in the next hit test.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::partition::{carve_mesh, slice_mesh_along, Axis};
use crate::predicates::Cylinder;
use crate::texture::{TextureKind, TextureTable};
use glam::Vec3;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of process-wide unique mesh set generations.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

// =============================================================================
// CARVE SUMMARY
// =============================================================================

/// What an in-place carve did to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarveSummary {
    /// Triangle count before the carve.
    pub triangles_before: usize,
    /// Triangle count after the carve.
    pub triangles_after: usize,
    /// Meshes that lost every triangle and were removed.
    pub meshes_removed: usize,
}

impl CarveSummary {
    /// Number of triangles the carve removed.
    #[inline]
    pub fn triangles_removed(&self) -> usize {
        self.triangles_before - self.triangles_after
    }

    /// Returns true if the model's mesh set changed.
    #[inline]
    pub fn changed(&self) -> bool {
        self.triangles_removed() > 0 || self.meshes_removed > 0
    }
}

// =============================================================================
// SAMPLER BINDINGS
// =============================================================================

/// One texture bound for drawing a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerBinding {
    /// Sampler uniform name, e.g. `texture_diffuse1`.
    pub uniform: String,
    /// Texture unit the texture is bound to.
    pub unit: u32,
    /// Device texture id.
    pub texture_id: u32,
}

// =============================================================================
// MODEL
// =============================================================================

/// A multi-mesh model with its texture table and source directory.
///
/// Cloning keeps the generation: a clone holds the same mesh set until one
/// of the two is edited.
#[derive(Debug, Clone)]
pub struct Model {
    meshes: Vec<Mesh>,
    textures: TextureTable,
    directory: PathBuf,
    gamma_correction: bool,
    revision: u64,
    generation: u64,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            meshes: Vec::new(),
            textures: TextureTable::default(),
            directory: PathBuf::new(),
            gamma_correction: false,
            revision: 0,
            generation: next_generation(),
        }
    }
}

impl Model {
    /// Creates a model, checking that every mesh's texture handles refer to
    /// `textures`.
    pub fn new(
        meshes: Vec<Mesh>,
        textures: TextureTable,
        directory: impl Into<PathBuf>,
        gamma_correction: bool,
    ) -> MeshResult<Self> {
        if let Some(position) = meshes
            .iter()
            .position(|mesh| !textures.contains_all(mesh.textures()))
        {
            return Err(MeshError::invalid_reference(format!(
                "mesh {} uses a texture handle outside the model's table",
                position
            )));
        }
        Ok(Self {
            meshes,
            textures,
            directory: directory.into(),
            gamma_correction,
            revision: 0,
            generation: next_generation(),
        })
    }

    /// Creates a model sharing this model's texture table, directory and
    /// gamma flag but holding `meshes`.
    fn with_meshes(&self, meshes: Vec<Mesh>) -> Self {
        Self {
            meshes,
            textures: self.textures.clone(),
            directory: self.directory.clone(),
            gamma_correction: self.gamma_correction,
            revision: 0,
            generation: next_generation(),
        }
    }

    /// Returns the meshes in draw order.
    #[inline]
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Returns the texture table.
    #[inline]
    pub fn textures(&self) -> &TextureTable {
        &self.textures
    }

    /// Directory relative texture paths are resolved against.
    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether textures are loaded with gamma correction.
    #[inline]
    pub fn gamma_correction(&self) -> bool {
        self.gamma_correction
    }

    /// Structural revision, incremented whenever an in-place edit changes the
    /// mesh set. Render caches compare it to decide when to rebuild.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Identity of the current mesh set, unique across every model in the
    /// process. Changes on every in-place edit that changes the mesh set.
    /// Unlike [`Model::revision`], two different models never share it.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Total vertex count over all meshes.
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    /// Total triangle count over all meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// Returns true if the model has no meshes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    // -------------------------------------------------------------------------
    // Bounding box
    // -------------------------------------------------------------------------

    /// Component-wise minimum over every vertex of every mesh.
    ///
    /// An empty model yields `f32::MAX` on every axis, which no ray can hit.
    pub fn bounding_box_min(&self) -> Vec3 {
        self.positions()
            .fold(Vec3::splat(f32::MAX), |min, p| min.min(p))
    }

    /// Component-wise maximum over every vertex of every mesh.
    ///
    /// An empty model yields `f32::MIN` on every axis.
    pub fn bounding_box_max(&self) -> Vec3 {
        self.positions()
            .fold(Vec3::splat(f32::MIN), |max, p| max.max(p))
    }

    /// Both corners of the bounding box, or `None` for an empty model.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.positions();
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.meshes
            .iter()
            .flat_map(|mesh| mesh.vertices().iter().map(|v| v.position))
    }

    // -------------------------------------------------------------------------
    // Slicing
    // -------------------------------------------------------------------------

    /// Splits every mesh at `x_threshold` on the X axis.
    ///
    /// See [`Model::slice_model_along`].
    pub fn slice_model(&self, x_threshold: f32) -> Vec<Model> {
        self.slice_model_along(Axis::X, x_threshold)
    }

    /// Splits every mesh along `axis` at `threshold`, collecting left halves
    /// into one model and right halves into another.
    ///
    /// Returns 0, 1 or 2 models, left first. A model is only produced if it
    /// received at least one mesh. The source model is left untouched.
    pub fn slice_model_along(&self, axis: Axis, threshold: f32) -> Vec<Model> {
        let mut left = Vec::new();
        let mut right = Vec::new();

        for mesh in &self.meshes {
            let split = slice_mesh_along(mesh, axis, threshold);
            left.extend(split.left);
            right.extend(split.right);
        }

        debug!(
            "sliced model along {:?} at {}: {} left meshes, {} right meshes",
            axis,
            threshold,
            left.len(),
            right.len()
        );

        [left, right]
            .into_iter()
            .filter(|meshes| !meshes.is_empty())
            .map(|meshes| self.with_meshes(meshes))
            .collect()
    }

    /// Carves the cylinder `axis_start..axis_end` of `radius` out of every
    /// mesh, in place.
    ///
    /// See [`Model::carve`].
    pub fn slice_model_cylinder(
        &mut self,
        axis_start: Vec3,
        axis_end: Vec3,
        radius: f32,
    ) -> CarveSummary {
        self.carve(&Cylinder::new(axis_start, axis_end, radius))
    }

    /// Carves `cylinder` out of every mesh, in place.
    ///
    /// Meshes left without triangles are removed. When anything changed the
    /// revision is bumped; any device buffers built from the previous mesh
    /// set are stale from then on.
    pub fn carve(&mut self, cylinder: &Cylinder) -> CarveSummary {
        let triangles_before = self.triangle_count();
        let mesh_count = self.meshes.len();

        let survivors: Vec<Mesh> = self
            .meshes
            .iter()
            .map(|mesh| carve_mesh(mesh, cylinder))
            .filter(|mesh| !mesh.is_empty())
            .collect();

        let summary = CarveSummary {
            triangles_before,
            triangles_after: survivors.iter().map(Mesh::triangle_count).sum(),
            meshes_removed: mesh_count - survivors.len(),
        };

        if summary.changed() {
            self.meshes = survivors;
            self.revision += 1;
            self.generation = next_generation();
            debug!(
                "carved {} of {} triangles ({} meshes removed), revision {}",
                summary.triangles_removed(),
                summary.triangles_before,
                summary.meshes_removed,
                self.revision
            );
        }

        summary
    }

    // -------------------------------------------------------------------------
    // Drawing support
    // -------------------------------------------------------------------------

    /// Sampler bindings for drawing `mesh`.
    ///
    /// Textures are bound to consecutive units in the mesh's handle order.
    /// Uniform names count per kind from 1: `texture_diffuse1`,
    /// `texture_diffuse2`, `texture_specular1`, ...
    pub fn sampler_bindings(&self, mesh: &Mesh) -> Vec<SamplerBinding> {
        let mut counters = [0u32; TextureKind::ALL.len()];

        mesh.textures()
            .iter()
            .filter_map(|&handle| self.textures.get(handle))
            .enumerate()
            .map(|(unit, record)| {
                let counter = &mut counters[record.kind.slot()];
                *counter += 1;
                SamplerBinding {
                    uniform: format!("{}{}", record.kind.sampler_prefix(), counter),
                    unit: unit as u32,
                    texture_id: record.id,
                }
            })
            .collect()
    }
}
