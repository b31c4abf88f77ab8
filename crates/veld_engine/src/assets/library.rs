//! Registry of importer-produced resources.

use std::collections::HashMap;
use std::sync::Arc;

use super::model::Model;
use super::texture::Texture;
use super::AssetError;

/// Shared, read-only resources keyed by the ids that map descriptors
/// reference. The embedding application fills this from its importers
/// before loading a map.
#[derive(Default)]
pub struct ResourceLibrary {
    models: HashMap<String, Arc<Model>>,
    textures: HashMap<String, Arc<Texture>>,
}

impl ResourceLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under the given id. Re-registering an id
    /// replaces the previous resource; existing entities keep their
    /// `Arc` to the old one.
    pub fn insert_model(&mut self, id: impl Into<String>, model: Model) {
        self.models.insert(id.into(), Arc::new(model));
    }

    /// Register a texture under the given id.
    pub fn insert_texture(&mut self, id: impl Into<String>, texture: Texture) {
        self.textures.insert(id.into(), Arc::new(texture));
    }

    /// Look up a model, failing with the load-time error the scene
    /// loader propagates.
    pub fn model(&self, id: &str) -> Result<Arc<Model>, AssetError> {
        self.models
            .get(id)
            .cloned()
            .ok_or_else(|| AssetError::ModelNotFound(id.to_string()))
    }

    /// Look up a texture.
    pub fn texture(&self, id: &str) -> Result<Arc<Texture>, AssetError> {
        self.textures
            .get(id)
            .cloned()
            .ok_or_else(|| AssetError::TextureNotFound(id.to_string()))
    }

    /// Number of registered models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}
