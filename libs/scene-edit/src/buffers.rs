//! # Device Buffers
//!
//! Renderer-side copies of a model's meshes, rebuilt whenever the cache is
//! handed a different mesh set, either an edited model or another model
//! entirely. Old buffers are always released before new ones are uploaded.

use log::debug;
use mesh_slice::{Mesh, Model};

/// Graphics backend that owns vertex/index buffers.
pub trait RenderDevice {
    /// Handle to one mesh's uploaded buffers.
    type Buffers;
    /// Upload failure reported by the backend.
    type Error;

    /// Uploads a non-empty mesh.
    fn upload(&mut self, mesh: &Mesh) -> Result<Self::Buffers, Self::Error>;

    /// Frees buffers returned by [`RenderDevice::upload`].
    fn release(&mut self, buffers: Self::Buffers);
}

/// Buffer cache for the model currently drawn in one slot.
///
/// The cached model may be replaced, e.g. by a half returned from
/// [`Model::slice_model`]; the next `sync` notices the new generation.
///
/// Entries are `(mesh index, buffers)`; meshes without triangles get no
/// entry.
pub struct ModelBuffers<D: RenderDevice> {
    entries: Vec<(usize, D::Buffers)>,
    /// [`Model::generation`] the entries were built from.
    generation: Option<u64>,
}

impl<D: RenderDevice> Default for ModelBuffers<D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            generation: None,
        }
    }
}

impl<D: RenderDevice> ModelBuffers<D> {
    /// Creates an empty, stale cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the cache does not reflect `model`'s mesh set.
    pub fn is_stale(&self, model: &Model) -> bool {
        self.generation != Some(model.generation())
    }

    /// Brings the cache up to date with `model`.
    ///
    /// Returns `Ok(true)` if buffers were rebuilt. On an upload failure the
    /// partial set is released and the cache is left empty and stale.
    pub fn sync(&mut self, device: &mut D, model: &Model) -> Result<bool, D::Error> {
        if !self.is_stale(model) {
            return Ok(false);
        }
        self.release_all(device);

        for (index, mesh) in model.meshes().iter().enumerate() {
            if mesh.is_empty() {
                continue;
            }
            match device.upload(mesh) {
                Ok(buffers) => self.entries.push((index, buffers)),
                Err(err) => {
                    self.release_all(device);
                    return Err(err);
                }
            }
        }

        self.generation = Some(model.generation());
        debug!(
            "rebuilt {} mesh buffers for model generation {} (revision {})",
            self.entries.len(),
            model.generation(),
            model.revision()
        );
        Ok(true)
    }

    /// Releases every buffer and marks the cache stale.
    pub fn release_all(&mut self, device: &mut D) {
        for (_, buffers) in self.entries.drain(..) {
            device.release(buffers);
        }
        self.generation = None;
    }

    /// Uploaded buffers with the index of the mesh they hold, in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &D::Buffers)> {
        self.entries.iter().map(|(index, buffers)| (*index, buffers))
    }

    /// Number of uploaded meshes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is uploaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use mesh_slice::{Cylinder, TextureTable, Vertex};
    use std::collections::BTreeSet;

    /// Hands out sequential ids and tracks which are still live.
    #[derive(Default)]
    struct FakeDevice {
        next_id: u32,
        live: BTreeSet<u32>,
        released: Vec<u32>,
        fail_on_upload: Option<usize>,
        uploads: usize,
    }

    impl RenderDevice for FakeDevice {
        type Buffers = u32;
        type Error = &'static str;

        fn upload(&mut self, mesh: &Mesh) -> Result<u32, &'static str> {
            assert!(!mesh.is_empty());
            if self.fail_on_upload == Some(self.uploads) {
                return Err("out of device memory");
            }
            self.uploads += 1;
            self.next_id += 1;
            self.live.insert(self.next_id);
            Ok(self.next_id)
        }

        fn release(&mut self, buffers: u32) {
            assert!(self.live.remove(&buffers), "double release of {}", buffers);
            self.released.push(buffers);
        }
    }

    fn triangle_at(x: f32) -> Mesh {
        let vertices = [Vec3::ZERO, Vec3::Y, Vec3::Z]
            .into_iter()
            .map(|p| Vertex::from_position(p + Vec3::new(x, 0.0, 0.0)))
            .collect();
        Mesh::new(vertices, vec![0, 1, 2], Vec::new()).unwrap()
    }

    fn three_mesh_model() -> Model {
        let meshes = vec![triangle_at(0.0), Mesh::empty(), triangle_at(5.0), triangle_at(10.0)];
        Model::new(meshes, TextureTable::new(), "", false).unwrap()
    }

    #[test]
    fn test_sync_uploads_non_empty_meshes() {
        let mut device = FakeDevice::default();
        let mut cache = ModelBuffers::new();
        let model = three_mesh_model();

        assert!(cache.is_stale(&model));
        assert!(cache.sync(&mut device, &model).unwrap());
        assert_eq!(cache.len(), 3);

        let indices: Vec<usize> = cache.iter().map(|(index, _)| index).collect();
        assert_eq!(indices, vec![0, 2, 3]);

        // Nothing changed, nothing rebuilt
        assert!(!cache.sync(&mut device, &model).unwrap());
        assert_eq!(device.uploads, 3);
    }

    #[test]
    fn test_carve_releases_previous_buffers() {
        let mut device = FakeDevice::default();
        let mut cache = ModelBuffers::new();
        let mut model = three_mesh_model();
        cache.sync(&mut device, &model).unwrap();
        let before: Vec<u32> = cache.iter().map(|(_, &id)| id).collect();

        let cylinder = Cylinder::new(Vec3::new(5.0, 0.0, -1.0), Vec3::new(5.0, 0.0, 1.0), 0.1);
        assert!(model.carve(&cylinder).changed());
        assert!(cache.is_stale(&model));

        assert!(cache.sync(&mut device, &model).unwrap());
        assert_eq!(device.released, before);
        assert_eq!(cache.len(), 2);
        assert_eq!(device.live.len(), 2);
    }

    #[test]
    fn test_replaced_model_releases_previous_buffers() {
        let mut device = FakeDevice::default();
        let mut cache = ModelBuffers::new();
        let meshes = vec![triangle_at(-5.0), triangle_at(5.0)];
        let mut model = Model::new(meshes, TextureTable::new(), "", false).unwrap();
        cache.sync(&mut device, &model).unwrap();
        let before: Vec<u32> = cache.iter().map(|(_, &id)| id).collect();

        // Same revision, different mesh set
        let left = model.slice_model(0.0).remove(0);
        assert_eq!(left.revision(), model.revision());
        model = left;

        assert!(cache.is_stale(&model));
        assert!(cache.sync(&mut device, &model).unwrap());
        assert_eq!(device.released, before);
        assert_eq!(cache.len(), 1);
        assert_eq!(device.live.len(), 1);
    }

    #[test]
    fn test_fresh_model_at_same_revision_is_stale() {
        let mut device = FakeDevice::default();
        let mut cache = ModelBuffers::new();
        cache.sync(&mut device, &three_mesh_model()).unwrap();

        let replacement = three_mesh_model();
        assert!(cache.is_stale(&replacement));
        assert!(cache.sync(&mut device, &replacement).unwrap());
        assert_eq!(device.released.len(), 3);
        assert_eq!(device.live.len(), 3);
    }

    #[test]
    fn test_release_all() {
        let mut device = FakeDevice::default();
        let mut cache = ModelBuffers::new();
        let model = three_mesh_model();
        cache.sync(&mut device, &model).unwrap();

        cache.release_all(&mut device);
        assert!(cache.is_empty());
        assert!(device.live.is_empty());
        assert!(cache.is_stale(&model));
    }

    #[test]
    fn test_failed_upload_leaves_nothing_live() {
        let mut device = FakeDevice {
            fail_on_upload: Some(1),
            ..FakeDevice::default()
        };
        let mut cache = ModelBuffers::new();
        let model = three_mesh_model();

        assert_eq!(cache.sync(&mut device, &model), Err("out of device memory"));
        assert!(cache.is_empty());
        assert!(cache.is_stale(&model));
        assert!(device.live.is_empty());
    }
}
