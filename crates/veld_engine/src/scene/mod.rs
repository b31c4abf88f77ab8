//! Scene graph, view-frustum culling and per-frame orchestration.
//!
//! The scene owns the object/light registries, the camera slot, the
//! physics world and the behaviour table, and drives the three passes
//! an embedding loop calls every frame: `prepare` (once), `update`
//! (fixed-step simulation plus behaviour dispatch) and `render`
//! (culling plus draw-call emission through a [`crate::render::Painter`]).

mod camera;
mod culling;
mod entity;
mod frustum;
mod light;
mod node;
#[allow(clippy::module_inception)]
mod scene;

pub use camera::Camera;
pub use culling::{cull_hierarchy, reset_in_view};
pub use entity::{Entity, EntityKind, DEFAULT_DENSITY};
pub use frustum::{Containment, Frustum, Plane};
pub use light::Light;
pub use node::SpatialNode;
pub use scene::{Scene, SceneError, SceneObject};
