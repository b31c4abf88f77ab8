//! Scene entities: renderable, collidable or purely visual
//! participants.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::node::SpatialNode;
use crate::assets::{Model, ResourceId, Texture};
use crate::foundation::math::Vec3;
use crate::physics::{BodyKey, CollisionShape, PhysicsWorld, RigidBody};

/// Density used to derive a body mass when the spawn descriptor gives
/// neither a density nor a mass, in kg/m^3.
pub const DEFAULT_DENSITY: f32 = 2000.0;

/// The entity variant, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Rendered only; no collision or dynamics
    Visual,
    /// Rendered and simulated; the physics body drives the transform
    Physical,
    /// Collision geometry without mass or velocity state
    StaticObstacle,
}

impl EntityKind {
    /// Whether this variant owns a body in the physics world.
    pub fn has_body(self) -> bool {
        !matches!(self, Self::Visual)
    }
}

/// Prepared resource handles, filled in once by [`Entity::prepare`].
#[derive(Debug, Clone, Copy)]
pub(super) struct PreparedResources {
    pub model: ResourceId,
    pub texture: Option<ResourceId>,
}

/// One scene participant: a transform node plus shared model and
/// texture resources, an optional physics body, and exclusively owned
/// child entities (sub-meshes of composite models).
///
/// For a `Physical` entity the body's pose is authoritative: position
/// and rotation setters write through to the body, and the node's
/// cached transform is refreshed from the body's pose snapshot after
/// every simulation step. Rendering reads the cached snapshot, never
/// the body mid-step.
#[derive(Debug)]
pub struct Entity {
    node: SpatialNode,
    kind: EntityKind,
    model: Arc<Model>,
    texture: Option<Arc<Texture>>,
    shader: Option<String>,
    density: Option<f32>,
    mass: Option<f32>,
    body: Option<BodyKey>,
    children: HashMap<String, Entity>,
    prepared: Option<PreparedResources>,
}

impl Entity {
    /// Create an entity. The physics body, when the variant calls for
    /// one, is created by [`Entity::prepare`], not here.
    pub fn new(
        id: impl Into<String>,
        kind: EntityKind,
        model: Arc<Model>,
        texture: Option<Arc<Texture>>,
    ) -> Self {
        let mut node = SpatialNode::new(id);
        node.set_static_hint(!matches!(kind, EntityKind::Physical));
        Self {
            node,
            kind,
            model,
            texture,
            shader: None,
            density: None,
            mass: None,
            body: None,
            children: HashMap::new(),
            prepared: None,
        }
    }

    /// Object id.
    pub fn id(&self) -> &str {
        self.node.id()
    }

    /// Entity variant.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Transform node.
    pub fn node(&self) -> &SpatialNode {
        &self.node
    }

    /// The shared model resource.
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// The shared texture resource, if any.
    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    /// Shader resource id, if any.
    pub fn shader(&self) -> Option<&str> {
        self.shader.as_deref()
    }

    /// Attach a shader resource id.
    pub fn set_shader(&mut self, shader: impl Into<String>) {
        self.shader = Some(shader.into());
    }

    /// Set the material density used to derive the body mass. Only
    /// meaningful before [`Entity::prepare`].
    pub fn set_density(&mut self, density: f32) {
        self.density = Some(density);
    }

    /// Set an explicit body mass, overriding any density. Only
    /// meaningful before [`Entity::prepare`].
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = Some(mass);
    }

    /// Key of the physics body, once prepared.
    pub fn body_key(&self) -> Option<BodyKey> {
        self.body
    }

    /// Child entities, keyed by sub-mesh name.
    pub fn children(&self) -> &HashMap<String, Entity> {
        &self.children
    }

    /// Mutable access to the child entities.
    pub fn children_mut(&mut self) -> &mut HashMap<String, Entity> {
        &mut self.children
    }

    /// Look up a child by its sub-mesh name.
    pub fn child(&self, name: &str) -> Option<&Entity> {
        self.children.get(name)
    }

    /// Adopt a child entity, keyed by the last segment of the child's
    /// id path.
    pub fn attach_child(&mut self, child: Entity) {
        let key = child
            .id()
            .rsplit('/')
            .next()
            .unwrap_or_else(|| child.id())
            .to_string();
        self.children.insert(key, child);
    }

    /// Move the entity, writing through to the physics body when one
    /// exists.
    pub fn set_position(&mut self, position: Vec3, physics: &mut PhysicsWorld) {
        self.node.set_position(position);
        if let Some(body) = self.body.and_then(|key| physics.body_mut(key)) {
            body.position = position;
        }
    }

    /// Rotate the entity, writing the recomputed matrix through to the
    /// physics body when one exists.
    pub fn set_rotation(&mut self, rotation: Vec3, physics: &mut PhysicsWorld) {
        self.node.set_rotation(rotation);
        if let Some(body) = self.body.and_then(|key| physics.body_mut(key)) {
            body.orientation = *self.node.rotation_matrix();
        }
    }

    /// Scale the entity. Scale does not affect the collision shape.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.node.set_scale(scale);
    }

    /// Show or hide the entity. Hiding a physical entity disables its
    /// body, exempting it from simulation and collision without
    /// destroying its state; showing it re-enables the body.
    pub fn set_visible(&mut self, visible: bool, physics: &mut PhysicsWorld) {
        self.node.set_visible(visible);
        if let Some(body) = self.body.and_then(|key| physics.body_mut(key)) {
            body.set_enabled(visible);
        }
    }

    /// Whether the entity is drawn this frame: explicitly visible and
    /// not culled.
    pub fn is_effectively_visible(&self) -> bool {
        self.node.is_visible() && self.node.is_in_view()
    }

    /// Record the culling verdict for this frame.
    pub fn set_in_view(&mut self, in_view: bool) {
        self.node.set_in_view(in_view);
    }

    /// Last culling verdict.
    pub fn is_in_view(&self) -> bool {
        self.node.is_in_view()
    }

    /// Center of the bounding sphere in the parent's frame.
    pub fn local_bounding_center(&self) -> Vec3 {
        self.node.position() + self.model.bounding_sphere_center()
    }

    /// Bounding sphere radius, scaled by the largest scale component.
    pub fn bounding_radius(&self) -> f32 {
        self.model.bounding_sphere_radius() * self.node.scale().amax()
    }

    /// Prepare the entity's resources and, for collidable variants,
    /// create its physics body at the node's current pose. Idempotent;
    /// recurses into children.
    pub fn prepare(&mut self, physics: &mut PhysicsWorld) {
        if self.prepared.is_none() {
            self.prepared = Some(PreparedResources {
                model: self.model.prepare(),
                texture: self.texture.as_ref().map(|t| t.prepare()),
            });
        }

        if self.kind.has_body() && self.body.is_none() {
            let shape = CollisionShape::cuboid(self.model.dimensions());
            let mut body = match self.kind {
                EntityKind::Physical => match self.mass {
                    Some(mass) => RigidBody::dynamic(self.id(), shape, mass),
                    None => RigidBody::with_density(
                        self.id(),
                        shape,
                        self.density.unwrap_or(DEFAULT_DENSITY),
                    ),
                },
                EntityKind::StaticObstacle => RigidBody::fixed(self.id(), shape),
                EntityKind::Visual => unreachable!(),
            };
            body.position = self.node.position();
            body.orientation = *self.node.rotation_matrix();
            body.set_enabled(self.node.is_visible());
            self.body = Some(physics.add_body(body));
        }

        for child in self.children.values_mut() {
            child.prepare(physics);
        }
    }

    /// Whether resources have been prepared.
    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    pub(super) fn prepared_resources(&self) -> Option<PreparedResources> {
        self.prepared
    }

    /// Copy the physics body's pose snapshot into the node, making it
    /// what the next render and culling passes see. Recurses into
    /// children.
    pub fn refresh_from_body(&mut self, physics: &PhysicsWorld) {
        if let Some((position, orientation)) = self.body.and_then(|key| physics.pose(key)) {
            self.node.set_position(position);
            self.node.set_orientation_matrix(orientation);
        }
        for child in self.children.values_mut() {
            child.refresh_from_body(physics);
        }
    }

    /// Collect the body keys of this entity and all descendants, for
    /// removal from the physics world on unregister.
    pub(super) fn collect_bodies(&self, out: &mut Vec<BodyKey>) {
        if let Some(key) = self.body {
            out.push(key);
        }
        for child in self.children.values() {
            child.collect_bodies(out);
        }
    }
}
