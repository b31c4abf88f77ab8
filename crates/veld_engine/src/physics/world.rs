//! The physical world: body arena, contact resolution, integration.

use std::collections::BTreeSet;

use slotmap::SlotMap;

use super::body::{BodyKey, RigidBody};
use super::layers::CollisionLayers;
use super::shape::{self, Contact};
use crate::foundation::math::{Mat3, Vec3};

/// Engine-wide contact restitution (bounce). Per-material physical
/// properties are a non-goal; every contact uses these constants.
pub const RESTITUTION: f32 = 0.2;

/// Engine-wide contact friction coefficient.
pub const FRICTION: f32 = 0.5;

/// Penetration allowance below which no positional correction is
/// applied, to avoid resting-contact jitter.
const PENETRATION_SLOP: f32 = 0.01;

/// A contact between two bodies during a step, reported by owning
/// entity id so the scene can route collision notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEvent {
    /// Object id of the first entity (lexicographically smaller)
    pub first: String,
    /// Object id of the second entity
    pub second: String,
}

/// The physical world.
///
/// Owns every rigid body, the gravity vector and the global constraint
/// parameters: ERP (error reduction, the fraction of penetration
/// corrected per step) and CFM (constraint force mixing, a softness
/// term added to the impulse denominator).
pub struct PhysicsWorld {
    bodies: SlotMap<BodyKey, RigidBody>,
    /// Gravitational acceleration applied to every dynamic body
    pub gravity: Vec3,
    erp: f32,
    cfm: f32,
}

impl PhysicsWorld {
    /// Create a world with the given gravity and the default
    /// ERP/CFM constraint parameters.
    pub fn new(gravity: Vec3) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            gravity,
            erp: 0.8,
            cfm: 1e-5,
        }
    }

    /// Override the constraint parameters.
    pub fn set_constraint_params(&mut self, erp: f32, cfm: f32) {
        self.erp = erp;
        self.cfm = cfm;
    }

    /// Insert a body, returning its arena key.
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body. Removing an already-removed key is a no-op.
    pub fn remove_body(&mut self, key: BodyKey) {
        self.bodies.remove(key);
    }

    /// Borrow a body.
    pub fn body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key)
    }

    /// Mutably borrow a body.
    pub fn body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key)
    }

    /// Pose snapshot (position, orientation) for rendering.
    pub fn pose(&self, key: BodyKey) -> Option<(Vec3, Mat3)> {
        self.bodies.get(key).map(|b| (b.position, b.orientation))
    }

    /// Number of bodies in the arena.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance the simulation by one fixed substep.
    ///
    /// Runs the broad phase over body bounding spheres, the
    /// narrow phase over shapes, impulse-based contact resolution, and
    /// semi-implicit Euler integration, in that order. Returns every
    /// contacting pair exactly once, by owner id.
    ///
    /// The step is deterministic: candidate pairs are processed in
    /// owner-id order and nothing reads the wall clock.
    pub fn step(&mut self, dt: f32) -> Vec<ContactEvent> {
        let pairs = self.broad_phase();

        let mut events = BTreeSet::new();
        for (key_a, key_b) in pairs {
            let (pos_a, shape_a) = {
                let body = &self.bodies[key_a];
                (body.position, *body.shape())
            };
            let (pos_b, shape_b) = {
                let body = &self.bodies[key_b];
                (body.position, *body.shape())
            };

            let Some(contact) = shape::contact(&shape_a, pos_a, &shape_b, pos_b) else {
                continue;
            };

            self.resolve_contact(key_a, key_b, &contact);

            let a = self.bodies[key_a].owner();
            let b = self.bodies[key_b].owner();
            let (first, second) = if a <= b { (a, b) } else { (b, a) };
            events.insert((first.to_string(), second.to_string()));
        }

        self.integrate(dt);

        events
            .into_iter()
            .map(|(first, second)| ContactEvent { first, second })
            .collect()
    }

    /// Broad phase: bounding-sphere overlap between enabled bodies
    /// whose collision layers mutually accept each other. Pairs come
    /// out sorted by owner id so the narrow phase is deterministic.
    fn broad_phase(&self) -> Vec<(BodyKey, BodyKey)> {
        let mut keys: Vec<BodyKey> = self
            .bodies
            .iter()
            .filter(|(_, body)| body.is_enabled())
            .map(|(key, _)| key)
            .collect();
        keys.sort_by(|a, b| self.bodies[*a].owner().cmp(self.bodies[*b].owner()));

        let mut pairs = Vec::new();
        for (i, &key_a) in keys.iter().enumerate() {
            for &key_b in &keys[i + 1..] {
                let a = &self.bodies[key_a];
                let b = &self.bodies[key_b];

                if a.is_static() && b.is_static() {
                    continue;
                }
                if !CollisionLayers::should_collide(a.layer(), a.mask(), b.layer(), b.mask()) {
                    continue;
                }

                let radius_sum = a.bounding_radius() + b.bounding_radius();
                if (b.position - a.position).norm_squared() <= radius_sum * radius_sum {
                    pairs.push((key_a, key_b));
                }
            }
        }
        pairs
    }

    /// Resolve one contact with a normal impulse, a friction impulse
    /// clamped by the Coulomb cone, and ERP-scaled positional
    /// correction applied as a velocity bias.
    fn resolve_contact(&mut self, key_a: BodyKey, key_b: BodyKey, contact: &Contact) {
        let inv_a = self.bodies[key_a].inv_mass();
        let inv_b = self.bodies[key_b].inv_mass();
        let total_inv_mass = inv_a + inv_b;
        if total_inv_mass <= 0.0 {
            return;
        }
        let denom = total_inv_mass + self.cfm;

        let va = self.bodies[key_a].linear_velocity;
        let vb = self.bodies[key_b].linear_velocity;
        let relative = vb - va;
        let vel_along_normal = relative.dot(&contact.normal);

        let mut impulse = Vec3::zeros();

        // Normal impulse only while the bodies are approaching.
        if vel_along_normal < 0.0 {
            let j = -(1.0 + RESTITUTION) * vel_along_normal / denom;
            impulse += contact.normal * j;

            let tangent_vel = relative - contact.normal * vel_along_normal;
            let tangent_speed = tangent_vel.norm();
            if tangent_speed > f32::EPSILON {
                let tangent = tangent_vel / tangent_speed;
                let jt = (-tangent_speed / denom).clamp(-FRICTION * j, FRICTION * j);
                impulse += tangent * jt;
            }
        }

        // Baumgarte-style positional correction, scaled by ERP.
        let correction_mag =
            (contact.depth - PENETRATION_SLOP).max(0.0) / total_inv_mass * self.erp;
        impulse += contact.normal * correction_mag;

        let a = &mut self.bodies[key_a];
        a.linear_velocity -= impulse * a.inv_mass();
        let b = &mut self.bodies[key_b];
        b.linear_velocity += impulse * b.inv_mass();
    }

    /// Semi-implicit Euler: velocity first, then position, for every
    /// enabled dynamic body. Accumulated forces are consumed here.
    fn integrate(&mut self, dt: f32) {
        let gravity = self.gravity;
        for (_, body) in &mut self.bodies {
            if !body.is_enabled() || body.is_static() {
                continue;
            }
            let acceleration = gravity + body.force() * body.inv_mass();
            body.linear_velocity += acceleration * dt;
            let velocity = body.linear_velocity;
            body.position += velocity * dt;
            body.clear_force();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::CollisionShape;
    use approx::assert_relative_eq;

    const DT: f32 = 0.01;

    fn falling_box(world: &mut PhysicsWorld, id: &str, y: f32) -> BodyKey {
        let shape = CollisionShape::cuboid(Vec3::new(2.0, 2.0, 2.0));
        let mut body = RigidBody::dynamic(id, shape, 10.0);
        body.position = Vec3::new(0.0, y, 0.0);
        world.add_body(body)
    }

    #[test]
    fn free_fall_matches_kinematics() {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0));
        let key = falling_box(&mut world, "crate", 10.0);

        let steps = 100;
        for _ in 0..steps {
            world.step(DT);
        }

        // Semi-implicit Euler lands on y0 + g * dt^2 * n(n+1)/2 exactly.
        let n = steps as f32;
        let discrete = 10.0 - 9.81 * DT * DT * n * (n + 1.0) / 2.0;
        let y = world.body(key).unwrap().position.y;
        assert_relative_eq!(y, discrete, epsilon = 1e-3);

        // And stays within one step's drift of the analytic solution.
        let t = n * DT;
        let analytic = 10.0 - 0.5 * 9.81 * t * t;
        assert!((y - analytic).abs() < 9.81 * DT * t);
    }

    #[test]
    fn step_sequences_are_deterministic() {
        let run = || {
            let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0));
            let a = falling_box(&mut world, "a", 10.0);
            let b = falling_box(&mut world, "b", 11.5);
            for _ in 0..50 {
                world.step(DT);
            }
            (
                world.body(a).unwrap().position,
                world.body(b).unwrap().position,
            )
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn overlapping_bodies_report_one_event_per_pair() {
        let mut world = PhysicsWorld::new(Vec3::zeros());
        let mut a = RigidBody::dynamic("a", CollisionShape::sphere(1.0), 1.0);
        a.position = Vec3::zeros();
        let mut b = RigidBody::dynamic("b", CollisionShape::sphere(1.0), 1.0);
        b.position = Vec3::new(1.5, 0.0, 0.0);
        world.add_body(a);
        world.add_body(b);

        let events = world.step(DT);
        assert_eq!(
            events,
            vec![ContactEvent {
                first: "a".into(),
                second: "b".into()
            }]
        );
    }

    #[test]
    fn disabled_bodies_do_not_collide_or_move() {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0));
        let key = falling_box(&mut world, "a", 10.0);
        falling_box(&mut world, "b", 10.5);

        world.body_mut(key).unwrap().set_enabled(false);
        let events = world.step(DT);

        assert!(events.is_empty());
        assert_relative_eq!(world.body(key).unwrap().position.y, 10.0);
    }

    #[test]
    fn static_pairs_are_skipped() {
        let mut world = PhysicsWorld::new(Vec3::zeros());
        let mut a = RigidBody::fixed("a", CollisionShape::sphere(1.0));
        a.position = Vec3::zeros();
        let mut b = RigidBody::fixed("b", CollisionShape::sphere(1.0));
        b.position = Vec3::new(0.5, 0.0, 0.0);
        world.add_body(a);
        world.add_body(b);

        assert!(world.step(DT).is_empty());
    }

    #[test]
    fn approaching_bodies_bounce_apart() {
        let mut world = PhysicsWorld::new(Vec3::zeros());
        let mut a = RigidBody::dynamic("a", CollisionShape::sphere(1.0), 1.0);
        a.linear_velocity = Vec3::new(1.0, 0.0, 0.0);
        let mut b = RigidBody::dynamic("b", CollisionShape::sphere(1.0), 1.0);
        b.position = Vec3::new(1.8, 0.0, 0.0);
        b.linear_velocity = Vec3::new(-1.0, 0.0, 0.0);
        let key_a = world.add_body(a);
        let key_b = world.add_body(b);

        world.step(DT);

        // After the impulse the bodies must be separating.
        let va = world.body(key_a).unwrap().linear_velocity;
        let vb = world.body(key_b).unwrap().linear_velocity;
        assert!(vb.x - va.x > 0.0);
    }

    #[test]
    fn layer_filtering_suppresses_contacts() {
        let mut world = PhysicsWorld::new(Vec3::zeros());
        let mut a = RigidBody::dynamic("a", CollisionShape::sphere(1.0), 1.0);
        a.set_layers(CollisionLayers::PLAYER, CollisionLayers::ENEMY);
        let mut b = RigidBody::dynamic("b", CollisionShape::sphere(1.0), 1.0);
        b.position = Vec3::new(0.5, 0.0, 0.0);
        b.set_layers(CollisionLayers::ENVIRONMENT, CollisionLayers::ALL);
        world.add_body(a);
        world.add_body(b);

        assert!(world.step(DT).is_empty());
    }
}
