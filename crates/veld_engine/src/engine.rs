//! Top-level engine handle.

use thiserror::Error;

use crate::config::{ConfigError, EngineConfig};
use crate::events::{EventBus, MouseButton};
use crate::render::Painter;
use crate::scene::{Scene, SceneError};

/// Engine-level failure, from configuration loading or the scene.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration loading failed
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A scene pass failed
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// The engine: one scene, one event bus, one configuration.
///
/// The engine owns no window and no render loop; the embedding layer
/// opens the window, forwards raw input through the `feed_*` methods,
/// and calls [`Engine::tick`] and [`Engine::render`] from its own
/// loop.
pub struct Engine {
    config: EngineConfig,
    scene: Scene,
    events: EventBus,
}

impl Engine {
    /// Build an engine from an already-loaded configuration.
    pub fn new(config: EngineConfig) -> Self {
        log::info!(
            "engine starting: {}x{}, frame interval {:.3}s",
            config.window.width,
            config.window.height,
            config.frame_interval
        );
        let scene = Scene::new(&config);
        Self {
            config,
            scene,
            events: EventBus::new(),
        }
    }

    /// Build an engine from a TOML configuration file.
    pub fn from_config_file(path: &str) -> Result<Self, EngineError> {
        let config = EngineConfig::load(path)?;
        Ok(Self::new(config))
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The event bus raw input is fed into.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Advance one frame: frame pacing, behaviour updates and the
    /// fixed physics sub-steps.
    pub fn tick(&mut self) -> Result<(), EngineError> {
        self.scene.update();
        Ok(())
    }

    /// Render one frame through the painter.
    pub fn render(&mut self, painter: &mut dyn Painter) -> Result<(), EngineError> {
        self.scene.render(painter);
        Ok(())
    }

    /// Forward a raw keyboard event.
    pub fn feed_keyboard(&mut self, key: u32, special: bool) {
        self.events.feed_keyboard(key, special);
    }

    /// Forward a raw mouse-move event; the bus attaches the delta
    /// from the previous position.
    pub fn feed_mouse_move(&mut self, x: f32, y: f32) {
        self.events.feed_mouse_move(x, y);
    }

    /// Forward a raw mouse button event.
    pub fn feed_mouse_press(&mut self, x: f32, y: f32, button: MouseButton, pressed: bool) {
        self.events.feed_mouse_press(x, y, button, pressed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Geometry, Model};
    use crate::foundation::math::Vec3;
    use crate::scene::{Entity, EntityKind};
    use std::sync::Arc;

    #[test]
    fn missing_config_file_fails_startup() {
        let result = Engine::from_config_file("/nonexistent/veld.toml");
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::FileNotFound(_)))
        ));
    }

    #[test]
    fn tick_advances_the_simulation() {
        let mut engine = Engine::new(EngineConfig::default());

        let geometry = Geometry {
            vertices: vec![Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)],
            ..Geometry::default()
        };
        let mut entity = Entity::new(
            "crate",
            EntityKind::Physical,
            Arc::new(Model::new("cube", geometry)),
            None,
        );
        entity.set_position(Vec3::new(0.0, 10.0, 0.0), engine.scene_mut().physics_mut());

        engine.scene_mut().register_entity(entity).unwrap();
        engine.scene_mut().prepare().unwrap();
        engine.tick().unwrap();

        let y = engine
            .scene()
            .get_object_by_name("crate")
            .unwrap()
            .node()
            .position()
            .y;
        assert!(y < 10.0);
    }
}
