//! Importer-facing resource contracts and map descriptors.
//!
//! Format decoders (3DS, images, fonts) live outside the engine; they
//! hand over finished [`Model`] and [`Texture`] resources which the
//! scene shares read-only via `Arc`. Map descriptors arrive as RON
//! files and tell [`crate::scene::Scene::load`] what to spawn.

pub mod descriptor;
pub mod library;
pub mod manifest;
pub mod model;
pub mod pattern;
pub mod texture;

pub use descriptor::{EntityDescriptor, MapDescriptor, SubEntityRule};
pub use library::ResourceLibrary;
pub use manifest::{Manifest, ManifestItem, MANIFEST_VERSION};
pub use model::{Geometry, Material, Model, ResourceId};
pub use pattern::glob_match;
pub use texture::{PixelFormat, Texture};

use thiserror::Error;

/// Configuration and asset loading failures.
///
/// All of these are load-time fatal: the engine aborts startup rather
/// than running with partial state.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset manifest is missing or unreadable
    #[error("manifest not found: {0}")]
    ManifestNotFound(String),

    /// The manifest declares a version this engine does not speak
    #[error("unsupported manifest version {0}")]
    UnsupportedVersion(u32),

    /// The manifest names an item type with no registered importer
    #[error("unknown item type '{0}'")]
    UnknownItemType(String),

    /// An importer was handed an item of the wrong type
    #[error("importer type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        /// Item type the importer can load into
        expected: &'static str,
        /// Item type that was actually supplied
        found: &'static str,
    },

    /// A referenced data file does not exist
    #[error("item file not found: {0}")]
    FileNotFound(String),

    /// A descriptor references a model id that is not registered
    #[error("model '{0}' is not registered")]
    ModelNotFound(String),

    /// A descriptor references a texture id that is not registered
    #[error("texture '{0}' is not registered")]
    TextureNotFound(String),

    /// A descriptor file failed to parse
    #[error("descriptor parse error: {0}")]
    Parse(String),

    /// Underlying I/O failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
