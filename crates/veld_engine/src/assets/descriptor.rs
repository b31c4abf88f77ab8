//! Map and entity spawn descriptors.
//!
//! A map is a RON file listing the entities to spawn: ids, resource
//! references, the entity kind to instantiate, optional placement and
//! mass properties, and sub-entity rules for composite models.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AssetError;
use crate::scene::EntityKind;

/// Rule mapping composite sub-mesh names to a concrete entity kind
/// and texture. Rules are tested in descriptor order; the first
/// matching pattern wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubEntityRule {
    /// Glob pattern tested against the sub-mesh name (`*`, `?`)
    pub pattern: String,
    /// Entity kind to instantiate for matching sub-meshes
    pub kind: EntityKind,
    /// Texture override for matching sub-meshes
    #[serde(default)]
    pub texture: Option<String>,
}

/// One entity to spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Unique object id within the scene
    pub id: String,
    /// Registered model resource id
    pub model: String,
    /// Registered texture resource id
    #[serde(default)]
    pub texture: Option<String>,
    /// Entity variant to instantiate
    pub kind: EntityKind,
    /// Initial position
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    /// Initial Euler rotation, radians
    #[serde(default)]
    pub rotation: Option<[f32; 3]>,
    /// Material density; mass is derived from the collision volume.
    /// Ignored when `mass` is given.
    #[serde(default)]
    pub density: Option<f32>,
    /// Explicit body mass, overriding `density`
    #[serde(default)]
    pub mass: Option<f32>,
    /// Optional shader resource id
    #[serde(default)]
    pub shader: Option<String>,
    /// Sub-entity rules for composite models
    #[serde(default)]
    pub sub_entities: Vec<SubEntityRule>,
}

/// A full map: the list of entity spawn descriptors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapDescriptor {
    /// Entities to spawn, in order
    pub entities: Vec<EntityDescriptor>,
}

impl MapDescriptor {
    /// Parse a map descriptor from RON text.
    pub fn from_ron(text: &str) -> Result<Self, AssetError> {
        ron::from_str(text).map_err(|e| AssetError::Parse(e.to_string()))
    }

    /// Load and parse a map descriptor file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|_| {
            AssetError::FileNotFound(path.display().to_string())
        })?;
        Self::from_ron(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_descriptor_parses() {
        let map = MapDescriptor::from_ron(
            r#"(
                entities: [
                    (id: "crate01", model: "models/crate", kind: Physical),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(map.entities.len(), 1);
        let entity = &map.entities[0];
        assert_eq!(entity.id, "crate01");
        assert!(entity.texture.is_none());
        assert!(entity.sub_entities.is_empty());
    }

    #[test]
    fn full_descriptor_parses() {
        let map = MapDescriptor::from_ron(
            r#"(
                entities: [
                    (
                        id: "car",
                        model: "models/car",
                        texture: Some("textures/paint"),
                        kind: Visual,
                        position: Some((0.0, 1.0, -4.0)),
                        rotation: Some((0.0, 1.5708, 0.0)),
                        density: Some(400.0),
                        sub_entities: [
                            (pattern: "wheel_*", kind: Physical, texture: Some("textures/rubber")),
                            (pattern: "*", kind: Visual),
                        ],
                    ),
                ],
            )"#,
        )
        .unwrap();

        let entity = &map.entities[0];
        assert_eq!(entity.position, Some([0.0, 1.0, -4.0]));
        assert_eq!(entity.sub_entities.len(), 2);
        assert_eq!(entity.sub_entities[0].pattern, "wheel_*");
    }

    #[test]
    fn malformed_descriptor_is_a_parse_error() {
        let err = MapDescriptor::from_ron("(entities: [").unwrap_err();
        assert!(matches!(err, AssetError::Parse(_)));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = MapDescriptor::load("/nonexistent/map.ron").unwrap_err();
        assert!(matches!(err, AssetError::FileNotFound(_)));
    }
}
