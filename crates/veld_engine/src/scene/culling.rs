//! Hierarchical bounding-sphere culling.

use super::entity::Entity;
use super::frustum::{Containment, Frustum};
use crate::foundation::math::Vec3;

/// Cull an entity forest against the frustum, level by level.
///
/// Each level's entities are tested as bounding spheres: a top-level
/// entity is tested at its own world position, a child at its parent's
/// world position plus the child's local bounding-sphere center. An
/// entity classified `Outside` is marked out of view and its subtree
/// is never visited, so a parent's verdict always gates its children.
/// Entities that survive are marked in view and their children join
/// the next level.
pub fn cull_hierarchy<'a, I>(frustum: &Frustum, roots: I)
where
    I: IntoIterator<Item = &'a mut Entity>,
{
    let mut level: Vec<(Option<Vec3>, &'a mut Entity)> =
        roots.into_iter().map(|entity| (None, entity)).collect();

    while !level.is_empty() {
        let mut next = Vec::new();
        for (parent_world, entity) in level {
            let center = match parent_world {
                None => entity.node().position(),
                Some(parent) => parent + entity.local_bounding_center(),
            };

            if frustum.classify_sphere(center, entity.bounding_radius()) == Containment::Outside {
                entity.set_in_view(false);
                continue;
            }

            entity.set_in_view(true);
            let world = parent_world.unwrap_or_else(Vec3::zeros) + entity.node().position();
            for child in entity.children_mut().values_mut() {
                next.push((Some(world), child));
            }
        }
        level = next;
    }
}

/// Mark every entity in the forest as in view again.
///
/// Culling verdicts are sticky between frames; when a frame skips the
/// culling pass, stale `Outside` verdicts from earlier frames must not
/// keep suppressing entities.
pub fn reset_in_view<'a, I>(roots: I)
where
    I: IntoIterator<Item = &'a mut Entity>,
{
    let mut level: Vec<&'a mut Entity> = roots.into_iter().collect();
    while !level.is_empty() {
        let mut next = Vec::new();
        for entity in level {
            entity.set_in_view(true);
            next.extend(entity.children_mut().values_mut());
        }
        level = next;
    }
}
