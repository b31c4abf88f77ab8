//! The scene camera.

use super::node::SpatialNode;
use crate::foundation::math::Vec3;

/// The viewpoint the scene is rendered from.
///
/// The camera reuses [`SpatialNode`] for its transform; its basis
/// vectors are derived from the node's cached rotation matrix and feed
/// both the painter and the frustum rebuild each frame.
#[derive(Debug, Clone)]
pub struct Camera {
    node: SpatialNode,
}

impl Camera {
    /// Create a camera at the origin looking down -Z.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            node: SpatialNode::new(id),
        }
    }

    /// Camera object id.
    pub fn id(&self) -> &str {
        self.node.id()
    }

    /// Move the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.node.set_position(position);
    }

    /// Rotate the camera, Euler angles in radians.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.node.set_rotation(rotation);
    }

    /// Transform node backing the camera.
    pub fn node(&self) -> &SpatialNode {
        &self.node
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        self.node.position()
    }

    /// The point the camera looks at, one unit along the view
    /// direction.
    pub fn target(&self) -> Vec3 {
        self.eye() + self.node.rotation_matrix() * Vec3::new(0.0, 0.0, -1.0)
    }

    /// Up vector in world space.
    pub fn up(&self) -> Vec3 {
        self.node.rotation_matrix() * Vec3::y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::new("cam");
        assert_relative_eq!(camera.target(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.up(), Vec3::y(), epsilon = 1e-6);
    }

    #[test]
    fn yaw_turns_the_view_direction() {
        let mut camera = Camera::new("cam");
        camera.set_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let forward = camera.target() - camera.eye();
        assert_relative_eq!(forward, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
    }
}
