//! Collision layer filtering.
//!
//! Bodies carry a layer bit and a mask of layers they collide with;
//! the broad phase drops pairs whose layers do not mutually accept
//! each other.

/// Collision layer definitions for broad-phase filtering.
pub struct CollisionLayers;

impl CollisionLayers {
    /// No collision layer
    pub const NONE: u32 = 0;

    /// All collision layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// Player-controlled entities
    pub const PLAYER: u32 = 1 << 0;

    /// Computer-controlled entities
    pub const ENEMY: u32 = 1 << 1;

    /// Projectiles
    pub const PROJECTILE: u32 = 1 << 2;

    /// Static level geometry and obstacles
    pub const ENVIRONMENT: u32 = 1 << 3;

    /// Movable props (crates, debris)
    pub const MOVABLE: u32 = 1 << 4;

    /// Check if two bodies should collide based on their layers and
    /// masks: each body's layer must appear in the other's mask.
    pub fn should_collide(layer_a: u32, mask_a: u32, layer_b: u32, mask_b: u32) -> bool {
        (layer_a & mask_b) != 0 && (layer_b & mask_a) != 0
    }

    /// Build a mask from multiple layers.
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutual_masks_collide() {
        assert!(CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PLAYER,
        ));
    }

    #[test]
    fn one_way_masks_do_not_collide() {
        assert!(!CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PROJECTILE,
        ));
    }

    #[test]
    fn mask_combines_layers() {
        let mask = CollisionLayers::mask(&[CollisionLayers::PLAYER, CollisionLayers::MOVABLE]);
        assert_eq!(mask, CollisionLayers::PLAYER | CollisionLayers::MOVABLE);
    }
}
