//! Light sources.

use super::node::SpatialNode;
use crate::foundation::math::Vec3;

/// A light source registered with the scene.
///
/// The scene does not interpret the color or attenuation values; it
/// hands visible lights to the painter each frame and the backend maps
/// them onto whatever lighting model it implements.
#[derive(Debug, Clone)]
pub struct Light {
    node: SpatialNode,
    /// Ambient color, RGBA
    pub ambient: [f32; 4],
    /// Diffuse color, RGBA
    pub diffuse: [f32; 4],
    /// Specular color, RGBA
    pub specular: [f32; 4],
    /// Constant attenuation factor
    pub constant_attenuation: f32,
    /// Linear attenuation factor
    pub linear_attenuation: f32,
    /// Quadratic attenuation factor
    pub quadratic_attenuation: f32,
    /// Directional lights use their position as a direction
    pub directional: bool,
}

impl Light {
    /// Create a light with the stock white-ish color set.
    pub fn new(id: impl Into<String>) -> Self {
        let mut node = SpatialNode::new(id);
        node.set_visible(false);
        Self {
            node,
            ambient: [0.2, 0.2, 0.2, 0.0],
            diffuse: [0.8, 0.8, 0.8, 0.0],
            specular: [1.0, 1.0, 1.0, 0.0],
            constant_attenuation: 1.0,
            linear_attenuation: 0.0,
            quadratic_attenuation: 0.0,
            directional: false,
        }
    }

    /// Light object id.
    pub fn id(&self) -> &str {
        self.node.id()
    }

    /// World position (or direction, for directional lights).
    pub fn position(&self) -> Vec3 {
        self.node.position()
    }

    /// Move the light.
    pub fn set_position(&mut self, position: Vec3) {
        self.node.set_position(position);
    }

    /// Whether the light currently contributes to the frame.
    pub fn is_visible(&self) -> bool {
        self.node.is_visible()
    }

    /// Turn the light on or off.
    pub fn set_visible(&mut self, visible: bool) {
        self.node.set_visible(visible);
    }

    /// Called by the scene's prepare pass; lights start contributing
    /// once prepared.
    pub fn prepare(&mut self) {
        self.set_visible(true);
    }
}
