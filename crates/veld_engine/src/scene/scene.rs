//! The scene: registries, passes and the fixed-step loop.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::camera::Camera;
use super::culling::{cull_hierarchy, reset_in_view};
use super::entity::{Entity, EntityKind};
use super::frustum::Frustum;
use super::light::Light;
use crate::assets::{glob_match, AssetError, EntityDescriptor, MapDescriptor, ResourceLibrary};
use crate::behaviour::{Behaviour, BehaviourError};
use crate::config::{EngineConfig, ViewportConfig};
use crate::events::{Signal, SignalHub};
use crate::foundation::math::{compose_transform, Mat4, Vec3};
use crate::foundation::time::FrameLimiter;
use crate::physics::{PhysicsWorld, SUBSTEPS};
use crate::render::{DrawCall, Painter};

/// Scene-level failure.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Lookup or unregister of an id with no registered object
    #[error("scene object '{0}' not found")]
    ObjectNotFound(String),
    /// Registration under an id that is already taken
    #[error("duplicate object id '{0}'")]
    DuplicateObject(String),
    /// A behaviour failed during the prepare pass; the scene cannot
    /// safely render
    #[error("behaviour for '{id}' failed during prepare: {source}")]
    Prepare {
        /// Object id the behaviour is attached to
        id: String,
        /// The underlying behaviour failure
        source: BehaviourError,
    },
    /// Resource resolution failed during map loading
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Anything registrable with the scene; routing picks the registry
/// from the variant.
#[derive(Debug)]
pub enum SceneObject {
    /// The (single) camera slot
    Camera(Camera),
    /// A light source
    Light(Light),
    /// A top-level entity
    Entity(Entity),
}

/// Container and orchestrator for everything rendered and simulated.
///
/// The embedding loop calls [`Scene::prepare`] once after loading,
/// then alternates [`Scene::update`] and [`Scene::render`].
pub struct Scene {
    objects: HashMap<String, Entity>,
    lights: HashMap<String, Light>,
    camera: Option<Camera>,
    behaviours: HashMap<String, Box<dyn Behaviour>>,
    physics: PhysicsWorld,
    frustum: Frustum,
    signals: SignalHub,
    viewport: ViewportConfig,
    aspect: f32,
    culling_enabled: bool,
    frame_interval: f32,
    limiter: FrameLimiter,
}

impl Scene {
    /// Create an empty scene from the engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        let mut physics = PhysicsWorld::new(Vec3::from(config.physics.gravity));
        physics.set_constraint_params(config.physics.erp, config.physics.cfm);

        let aspect = config.aspect_ratio();
        let frustum = Frustum::new(
            config.viewport.fov,
            aspect,
            config.viewport.near,
            config.viewport.far,
        );

        Self {
            objects: HashMap::new(),
            lights: HashMap::new(),
            camera: None,
            behaviours: HashMap::new(),
            physics,
            frustum,
            signals: SignalHub::new(),
            viewport: config.viewport,
            aspect,
            culling_enabled: config.culling,
            frame_interval: config.frame_interval,
            limiter: FrameLimiter::new(Duration::from_secs_f32(config.frame_interval)),
        }
    }

    /// The physics world.
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Mutable access to the physics world.
    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// The signal hub scene lifecycle signals are emitted on.
    pub fn signals_mut(&mut self) -> &mut SignalHub {
        &mut self.signals
    }

    /// The current frustum.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Enable or disable hierarchical culling.
    pub fn set_culling_enabled(&mut self, enabled: bool) {
        self.culling_enabled = enabled;
    }

    /// The registered camera.
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Mutable access to the registered camera.
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    /// Register an object, routing it to the camera slot, the light
    /// registry or the entity registry by variant.
    pub fn register(&mut self, object: SceneObject) -> Result<(), SceneError> {
        match object {
            SceneObject::Camera(camera) => {
                self.camera = Some(camera);
                Ok(())
            }
            SceneObject::Light(light) => self.register_light(light),
            SceneObject::Entity(entity) => self.register_entity(entity),
        }
    }

    /// Register a top-level entity.
    pub fn register_entity(&mut self, entity: Entity) -> Result<(), SceneError> {
        let id = entity.id().to_string();
        if self.objects.contains_key(&id) {
            return Err(SceneError::DuplicateObject(id));
        }
        log::debug!("registered object '{id}'");
        self.objects.insert(id.clone(), entity);
        self.signals.emit(&Signal::ObjectSpawned(id));
        Ok(())
    }

    /// Register a light.
    pub fn register_light(&mut self, light: Light) -> Result<(), SceneError> {
        let id = light.id().to_string();
        if self.lights.contains_key(&id) {
            return Err(SceneError::DuplicateObject(id));
        }
        self.lights.insert(id, light);
        Ok(())
    }

    /// Replace the camera.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    /// Remove the camera, if one is set.
    pub fn clear_camera(&mut self) -> Option<Camera> {
        self.camera.take()
    }

    /// Unregister a top-level entity, detaching its behaviour and
    /// removing the physics bodies of its whole subtree.
    pub fn unregister_object(&mut self, id: &str) -> Result<Entity, SceneError> {
        let entity = self
            .objects
            .remove(id)
            .ok_or_else(|| SceneError::ObjectNotFound(id.to_string()))?;

        let mut bodies = Vec::new();
        entity.collect_bodies(&mut bodies);
        for key in bodies {
            self.physics.remove_body(key);
        }
        self.behaviours.remove(id);
        log::debug!("unregistered object '{id}'");
        self.signals.emit(&Signal::ObjectRemoved(id.to_string()));
        Ok(entity)
    }

    /// Unregister a light.
    pub fn unregister_light(&mut self, id: &str) -> Result<Light, SceneError> {
        self.lights
            .remove(id)
            .ok_or_else(|| SceneError::ObjectNotFound(id.to_string()))
    }

    /// Look up a top-level entity by id.
    pub fn get_object_by_name(&self, name: &str) -> Option<&Entity> {
        self.objects.get(name)
    }

    /// Mutable lookup of a top-level entity.
    pub fn get_object_by_name_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.objects.get_mut(name)
    }

    /// Show or hide a registered entity, updating its physics body.
    pub fn set_object_visible(&mut self, id: &str, visible: bool) -> Result<(), SceneError> {
        let entity = self
            .objects
            .get_mut(id)
            .ok_or_else(|| SceneError::ObjectNotFound(id.to_string()))?;
        entity.set_visible(visible, &mut self.physics);
        Ok(())
    }

    /// Move a registered entity, writing through to its physics body.
    pub fn set_object_position(&mut self, id: &str, position: Vec3) -> Result<(), SceneError> {
        let entity = self
            .objects
            .get_mut(id)
            .ok_or_else(|| SceneError::ObjectNotFound(id.to_string()))?;
        entity.set_position(position, &mut self.physics);
        Ok(())
    }

    /// Number of registered top-level entities.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Attach a behaviour to a registered entity. The entity must
    /// already be part of the scene.
    pub fn register_behaviour(
        &mut self,
        id: &str,
        behaviour: Box<dyn Behaviour>,
    ) -> Result<(), SceneError> {
        if !self.objects.contains_key(id) {
            return Err(SceneError::ObjectNotFound(id.to_string()));
        }
        self.behaviours.insert(id.to_string(), behaviour);
        Ok(())
    }

    /// Spawn and register every entity in a map descriptor.
    pub fn load(
        &mut self,
        map: &MapDescriptor,
        library: &ResourceLibrary,
    ) -> Result<(), SceneError> {
        for descriptor in &map.entities {
            let entity = self.spawn_entity(descriptor, library)?;
            self.register_entity(entity)?;
        }
        log::info!("loaded {} map entities", map.entities.len());
        Ok(())
    }

    fn spawn_entity(
        &mut self,
        descriptor: &EntityDescriptor,
        library: &ResourceLibrary,
    ) -> Result<Entity, SceneError> {
        let model = library.model(&descriptor.model)?;
        let texture = match &descriptor.texture {
            Some(id) => Some(library.texture(id)?),
            None => None,
        };

        let mut entity = Entity::new(&descriptor.id, descriptor.kind, Arc::clone(&model), texture);
        if let Some(position) = descriptor.position {
            entity.set_position(Vec3::from(position), &mut self.physics);
        }
        if let Some(rotation) = descriptor.rotation {
            entity.set_rotation(Vec3::from(rotation), &mut self.physics);
        }
        if let Some(density) = descriptor.density {
            entity.set_density(density);
        }
        if let Some(mass) = descriptor.mass {
            entity.set_mass(mass);
        }
        if let Some(shader) = &descriptor.shader {
            entity.set_shader(shader);
        }

        // Composite sub-meshes become child entities. Rules are tried
        // in descriptor order, first match wins; unmatched sub-meshes
        // stay plain untextured visual parts.
        for (name, sub_model) in model.sub_models() {
            let rule = descriptor
                .sub_entities
                .iter()
                .find(|rule| glob_match(&rule.pattern, name));
            let kind = rule.map_or(EntityKind::Visual, |rule| rule.kind);
            let texture = match rule.and_then(|rule| rule.texture.as_ref()) {
                Some(id) => Some(library.texture(id)?),
                None => None,
            };
            let child = Entity::new(
                format!("{}/{name}", descriptor.id),
                kind,
                Arc::clone(sub_model),
                texture,
            );
            entity.attach_child(child);
        }

        Ok(entity)
    }

    /// Prepare the scene for rendering: rebuild the frustum from the
    /// viewport parameters, prepare lights, then every entity's
    /// resources and physics body, then each attached behaviour's
    /// prepare hook. A behaviour failure here aborts the pass; a
    /// half-prepared scene cannot safely render.
    pub fn prepare(&mut self) -> Result<(), SceneError> {
        self.frustum.configure(
            self.viewport.fov,
            self.aspect,
            self.viewport.near,
            self.viewport.far,
        );

        for light in self.lights.values_mut() {
            light.prepare();
        }

        let ids: Vec<String> = self.objects.keys().cloned().collect();
        for id in &ids {
            let Some(entity) = self.objects.get_mut(id) else {
                continue;
            };
            entity.prepare(&mut self.physics);
            if let Some(behaviour) = self.behaviours.get_mut(id) {
                behaviour
                    .prepare(entity, &mut self.physics)
                    .map_err(|source| SceneError::Prepare {
                        id: id.clone(),
                        source,
                    })?;
            }
        }

        log::info!("scene prepared: {} objects, {} lights", self.objects.len(), self.lights.len());
        self.signals.emit(&Signal::ScenePrepared);
        Ok(())
    }

    /// Advance one frame: sleep out the remaining frame budget, run
    /// every behaviour's update hook, request a redraw, then run the
    /// fixed physics sub-steps with collision fan-out, and finally
    /// refresh entity poses from their bodies.
    ///
    /// A failing update or collision hook is logged and skipped; the
    /// remaining behaviours and the physics step still run.
    pub fn update(&mut self) {
        self.limiter.wait();

        let ids: Vec<String> = self.behaviours.keys().cloned().collect();
        for id in &ids {
            let Some(behaviour) = self.behaviours.get_mut(id) else {
                continue;
            };
            let Some(entity) = self.objects.get_mut(id) else {
                continue;
            };
            if let Err(err) = behaviour.update(entity, &mut self.physics) {
                log::error!("behaviour update for '{id}' failed: {err}");
            }
        }

        self.signals.emit(&Signal::RedrawRequested);

        let dt = self.frame_interval / SUBSTEPS as f32;
        for _ in 0..SUBSTEPS {
            self.step_physics(dt);
        }

        for entity in self.objects.values_mut() {
            entity.refresh_from_body(&self.physics);
        }
    }

    /// Run a single physics sub-step and fan each resulting contact
    /// out to both involved entities' behaviours and the signal hub.
    pub fn step_physics(&mut self, dt: f32) {
        let events = self.physics.step(dt);
        for event in &events {
            self.notify_collision(&event.first, &event.second);
            self.notify_collision(&event.second, &event.first);
            self.signals.emit(&Signal::Collision {
                first: event.first.clone(),
                second: event.second.clone(),
            });
        }
    }

    fn notify_collision(&mut self, owner: &str, other: &str) {
        // Bodies on sub-entities carry path ids; the behaviour hangs
        // off the top-level object.
        let root = owner.split('/').next().unwrap_or(owner);
        let Some(behaviour) = self.behaviours.get_mut(root) else {
            return;
        };
        let Some(entity) = self.objects.get_mut(root) else {
            return;
        };
        if let Err(err) = behaviour.collision(entity, &mut self.physics, other) {
            log::error!("collision handler for '{root}' failed: {err}");
        }
    }

    /// Render one frame through the painter: camera, lights, culling,
    /// then every effectively-visible entity. Physical entities that
    /// were culled still get their cached pose refreshed so the next
    /// frame's culling sees where they moved.
    pub fn render(&mut self, painter: &mut dyn Painter) {
        painter.clear();

        if let Some(camera) = &self.camera {
            painter.set_view(camera);
            self.frustum.set_view(camera.eye(), camera.target(), camera.up());
        }

        for light in self.lights.values() {
            if light.is_visible() {
                painter.light(light);
            }
        }

        if self.culling_enabled && self.camera.is_some() {
            cull_hierarchy(&self.frustum, self.objects.values_mut());
        } else {
            // Without a culling pass this frame, stale verdicts from an
            // earlier pass would keep suppressing entities.
            reset_in_view(self.objects.values_mut());
        }

        for entity in self.objects.values_mut() {
            draw_entity(&self.physics, painter, entity, &Mat4::identity());
        }

        painter.present();
    }
}

fn draw_entity(
    physics: &PhysicsWorld,
    painter: &mut dyn Painter,
    entity: &mut Entity,
    parent_transform: &Mat4,
) {
    if !entity.is_effectively_visible() {
        if entity.kind() == EntityKind::Physical {
            entity.refresh_from_body(physics);
        }
        return;
    }

    let node = entity.node();
    let world =
        parent_transform * compose_transform(node.position(), node.rotation_matrix(), node.scale());

    if let Some(prepared) = entity.prepared_resources() {
        painter.draw(&DrawCall {
            object_id: entity.id().to_string(),
            model: prepared.model,
            texture: prepared.texture,
            transform: world,
        });
    }

    for child in entity.children_mut().values_mut() {
        draw_entity(physics, painter, child, &world);
    }
}
