//! Asset manifest validation.
//!
//! Importers ship a RON manifest listing every item they can produce.
//! The manifest is checked up front so a bad asset pack fails at
//! startup instead of mid-session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AssetError;

/// Manifest version this engine can load.
pub const MANIFEST_VERSION: u32 = 1;

/// Item kinds with a registered importer.
const KNOWN_KINDS: &[&str] = &["model", "texture", "shader"];

/// One importable item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestItem {
    /// Resource id map descriptors reference
    pub id: String,
    /// Importer kind, one of `model`, `texture` or `shader`
    pub kind: String,
    /// Data file, relative to the manifest
    pub path: String,
}

/// An asset pack manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Format version
    pub version: u32,
    /// Items in the pack
    pub items: Vec<ManifestItem>,
}

impl Manifest {
    /// Parse a manifest from RON text.
    pub fn from_ron(text: &str) -> Result<Self, AssetError> {
        ron::from_str(text).map_err(|e| AssetError::Parse(e.to_string()))
    }

    /// Load and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|_| {
            AssetError::ManifestNotFound(path.display().to_string())
        })?;
        Self::from_ron(&text)
    }

    /// Check the version and every item kind. Called once after
    /// loading, before any importer runs.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.version != MANIFEST_VERSION {
            return Err(AssetError::UnsupportedVersion(self.version));
        }
        for item in &self.items {
            interned_kind(&item.kind)?;
        }
        Ok(())
    }

    /// Find an item by id, checking it carries the kind the caller's
    /// importer loads.
    pub fn item(&self, id: &str, expected: &'static str) -> Result<&ManifestItem, AssetError> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| AssetError::FileNotFound(id.to_string()))?;
        let found = interned_kind(&item.kind)?;
        if found != expected {
            return Err(AssetError::TypeMismatch { expected, found });
        }
        Ok(item)
    }
}

fn interned_kind(kind: &str) -> Result<&'static str, AssetError> {
    KNOWN_KINDS
        .iter()
        .find(|known| **known == kind)
        .copied()
        .ok_or_else(|| AssetError::UnknownItemType(kind.to_string()))
}
