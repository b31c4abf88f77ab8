//! Fixed-step rigid-body physics and collision detection.
//!
//! The world owns all bodies in an arena; bodies refer back to their
//! owning entity by object id, never by pointer, so there are no
//! ownership cycles between the scene graph and the simulation. Each
//! [`PhysicsWorld::step`] runs a broad phase over body bounding
//! spheres, a narrow phase over collision shapes, impulse-based
//! contact resolution, and a semi-implicit Euler integration, and
//! reports the contacts so the scene can fan them out to behaviours.

pub mod body;
pub mod layers;
pub mod shape;
pub mod world;

pub use body::{BodyKey, RigidBody};
pub use layers::CollisionLayers;
pub use shape::{CollisionShape, Contact};
pub use world::{ContactEvent, PhysicsWorld};

/// Number of fixed physics substeps per frame update.
///
/// A 0.02 s frame splits into two 0.01 s substeps; the count is
/// tunable, but the step size stays fixed for determinism.
pub const SUBSTEPS: u32 = 2;
