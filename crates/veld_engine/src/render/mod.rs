//! The rendering seam.
//!
//! The engine does not talk to a graphics API; it walks the scene and
//! emits draw calls through the [`Painter`] trait. The embedding
//! application implements `Painter` over its actual backend, and tests
//! implement it as a recorder.

use crate::assets::ResourceId;
use crate::foundation::math::Mat4;
use crate::scene::{Camera, Light};

/// One visible entity, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Object id of the entity being drawn
    pub object_id: String,
    /// Prepared geometry handle
    pub model: ResourceId,
    /// Prepared texture handle, if the entity has one
    pub texture: Option<ResourceId>,
    /// World transform of the entity
    pub transform: Mat4,
}

/// Backend seam invoked once per frame by [`crate::scene::Scene::render`].
///
/// Calls arrive in a fixed order: `clear`, `set_view`, one `light` per
/// visible light, one `draw` per visible entity, `present`.
pub trait Painter {
    /// Clear the framebuffer.
    fn clear(&mut self);

    /// Position the camera for this frame.
    fn set_view(&mut self, camera: &Camera);

    /// Apply one light source.
    fn light(&mut self, light: &Light);

    /// Draw one entity.
    fn draw(&mut self, call: &DrawCall);

    /// Finish the frame (swap buffers).
    fn present(&mut self);
}

/// A painter that records what it was asked to draw. Used by tests and
/// useful for headless diagnostics.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    /// Ids of entities drawn last frame, in draw order
    pub drawn: Vec<String>,
    /// Number of frames presented
    pub frames: u32,
}

impl RecordingPainter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self) {
        self.drawn.clear();
    }

    fn set_view(&mut self, _camera: &Camera) {}

    fn light(&mut self, _light: &Light) {}

    fn draw(&mut self, call: &DrawCall) {
        self.drawn.push(call.object_id.clone());
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}
