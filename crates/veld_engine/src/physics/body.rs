//! Rigid bodies stored in the physics world arena.

use slotmap::new_key_type;

use super::layers::CollisionLayers;
use super::shape::CollisionShape;
use crate::foundation::math::{Mat3, Vec3};

new_key_type! {
    /// Arena key identifying a body inside a [`super::PhysicsWorld`].
    pub struct BodyKey;
}

/// A rigid body: either dynamic (has mass and velocity) or static
/// (participates in collision geometry only).
///
/// The body refers to its owning entity by object id; entities hold
/// only a [`BodyKey`], so neither side owns the other.
#[derive(Debug, Clone)]
pub struct RigidBody {
    owner: String,
    shape: CollisionShape,
    /// Position of the body center in world space
    pub position: Vec3,
    /// Orientation matrix
    pub orientation: Mat3,
    /// Linear velocity
    pub linear_velocity: Vec3,
    force: Vec3,
    inv_mass: f32,
    enabled: bool,
    layer: u32,
    mask: u32,
}

impl RigidBody {
    /// Create a dynamic body with an explicit mass.
    pub fn dynamic(owner: impl Into<String>, shape: CollisionShape, mass: f32) -> Self {
        Self {
            owner: owner.into(),
            shape,
            position: Vec3::zeros(),
            orientation: Mat3::identity(),
            linear_velocity: Vec3::zeros(),
            force: Vec3::zeros(),
            inv_mass: if mass > 0.0 { 1.0 / mass } else { 0.0 },
            enabled: true,
            layer: CollisionLayers::MOVABLE,
            mask: CollisionLayers::ALL,
        }
    }

    /// Create a dynamic body whose mass is derived from the shape
    /// volume and a material density.
    pub fn with_density(owner: impl Into<String>, shape: CollisionShape, density: f32) -> Self {
        let mass = density * shape.volume();
        Self::dynamic(owner, shape, mass)
    }

    /// Create a static body: collision geometry with no mass or
    /// velocity state. Static bodies never integrate and never receive
    /// impulses.
    pub fn fixed(owner: impl Into<String>, shape: CollisionShape) -> Self {
        let mut body = Self::dynamic(owner, shape, 0.0);
        body.layer = CollisionLayers::ENVIRONMENT;
        body
    }

    /// Object id of the owning entity.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The body's collision shape.
    pub fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    /// Inverse mass; zero for static bodies.
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// True if the body has no mass (static obstacle).
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Set the collision layer and mask for broad-phase filtering.
    pub fn set_layers(&mut self, layer: u32, mask: u32) {
        self.layer = layer;
        self.mask = mask;
    }

    /// Collision layer bit.
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// Collision mask.
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Accumulate a force for the next integration step.
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Pending accumulated force.
    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub(super) fn clear_force(&mut self) {
        self.force = Vec3::zeros();
    }

    /// Enable or disable the body. A disabled body is exempt from
    /// simulation and collision but keeps its state.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the body currently participates in the simulation.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Radius of the broad-phase bounding sphere.
    pub fn bounding_radius(&self) -> f32 {
        self.shape.bounding_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn density_derives_mass_from_volume() {
        let shape = CollisionShape::cuboid(Vec3::new(2.0, 2.0, 2.0));
        let body = RigidBody::with_density("crate", shape, 10.0);
        // 8 m^3 at density 10 -> mass 80 -> inv_mass 1/80.
        assert_relative_eq!(body.inv_mass(), 1.0 / 80.0, epsilon = 1e-6);
    }

    #[test]
    fn fixed_bodies_are_static() {
        let body = RigidBody::fixed("wall", CollisionShape::sphere(1.0));
        assert!(body.is_static());
        assert_eq!(body.layer(), CollisionLayers::ENVIRONMENT);
    }

    #[test]
    fn zero_mass_dynamic_body_degrades_to_static() {
        let body = RigidBody::dynamic("ghost", CollisionShape::sphere(1.0), 0.0);
        assert!(body.is_static());
    }
}
