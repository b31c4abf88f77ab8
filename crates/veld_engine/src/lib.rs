//! # Veld Engine
//!
//! A small real-time 3D engine core. The crate owns the scene graph,
//! view-frustum culling, the fixed-step physics/collision loop and typed
//! event dispatch; rendering, windowing and asset decoding are external
//! collaborators reached through narrow seams (`render::Painter`, the
//! importer-facing resource types in [`assets`], and the raw input feed
//! on [`engine::Engine`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veld_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let config = EngineConfig::default();
//!     let mut engine = Engine::new(config);
//!     engine.scene_mut().prepare()?;
//!
//!     // An external window loop drives the engine:
//!     loop {
//!         engine.tick()?;
//!         // engine.render(&mut painter)?;
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod assets;
pub mod behaviour;
pub mod config;
pub mod events;
pub mod physics;
pub mod render;
pub mod scene;

mod engine;

pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineError,
        behaviour::{Behaviour, BehaviourError},
        config::EngineConfig,
        events::{Event, EventBus, EventType, Signal, SignalHub},
        foundation::math::{Mat3, Mat4, Vec3},
        physics::{CollisionShape, PhysicsWorld},
        render::Painter,
        scene::{Camera, Containment, Entity, EntityKind, Frustum, Light, Scene, SceneError},
    };
}
