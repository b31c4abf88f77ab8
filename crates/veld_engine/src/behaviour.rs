//! Per-entity logic hooks.
//!
//! A behaviour is the "brain" attached to at most one entity. The
//! scene invokes its hooks during the prepare pass, once per fixed
//! update, and whenever the owning entity collides with another.

use thiserror::Error;

use crate::physics::PhysicsWorld;
use crate::scene::Entity;

/// Failure raised from inside a behaviour hook.
///
/// The scene's handling differs per call site: prepare failures are
/// fatal and abort the prepare pass, while update and collision
/// failures are logged and the remaining behaviours still run.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BehaviourError(pub String);

impl BehaviourError {
    /// Convenience constructor from anything string-like.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Entity logic hook invoked by the scene.
///
/// All hooks have default no-op implementations; a behaviour overrides
/// only what it needs. Hooks receive the owning entity and the physics
/// world so they can steer the body without reaching back into the
/// scene registries.
pub trait Behaviour {
    /// Called once when the scene loads, after the entity's resources
    /// are prepared.
    fn prepare(&mut self, entity: &mut Entity, physics: &mut PhysicsWorld) -> Result<(), BehaviourError> {
        let _ = (entity, physics);
        Ok(())
    }

    /// Called on every fixed simulation step.
    fn update(&mut self, entity: &mut Entity, physics: &mut PhysicsWorld) -> Result<(), BehaviourError> {
        let _ = (entity, physics);
        Ok(())
    }

    /// Called when the owning entity collides with another entity.
    /// `other` is the colliding entity's object id.
    fn collision(
        &mut self,
        entity: &mut Entity,
        physics: &mut PhysicsWorld,
        other: &str,
    ) -> Result<(), BehaviourError> {
        let _ = (entity, physics, other);
        Ok(())
    }
}
