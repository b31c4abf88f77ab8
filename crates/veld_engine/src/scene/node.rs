//! Transform state shared by every scene participant.

use crate::foundation::math::{euler_xyz_matrix, Mat3, Vec3};

/// Local transform of one node in the scene hierarchy.
///
/// The rotation matrix is recomputed eagerly on every rotation
/// mutation, so reads never observe a matrix that is stale relative to
/// the last-set Euler angles. When a physics body drives the node, the
/// matrix is written directly via [`SpatialNode::set_orientation_matrix`]
/// and becomes authoritative over the Euler angles.
#[derive(Debug, Clone)]
pub struct SpatialNode {
    id: String,
    position: Vec3,
    rotation: Vec3,
    rotation_matrix: Mat3,
    scale: Vec3,
    visible: bool,
    static_hint: bool,
    in_view: bool,
}

impl SpatialNode {
    /// Create a node at the origin with identity rotation and unit
    /// scale.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            rotation_matrix: Mat3::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            visible: true,
            static_hint: true,
            in_view: true,
        }
    }

    /// Node identifier, unique among its siblings.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Local position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the local position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Last-set Euler rotation, radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Set the local Euler rotation and recompute the cached rotation
    /// matrix.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.rotation_matrix = euler_xyz_matrix(rotation);
    }

    /// Rotate about the X axis only, keeping the other angles.
    pub fn rotate_x(&mut self, angle: f32) {
        let mut rotation = self.rotation;
        rotation.x = angle;
        self.set_rotation(rotation);
    }

    /// Rotate about the Y axis only, keeping the other angles.
    pub fn rotate_y(&mut self, angle: f32) {
        let mut rotation = self.rotation;
        rotation.y = angle;
        self.set_rotation(rotation);
    }

    /// Rotate about the Z axis only, keeping the other angles.
    pub fn rotate_z(&mut self, angle: f32) {
        let mut rotation = self.rotation;
        rotation.z = angle;
        self.set_rotation(rotation);
    }

    /// Cached rotation matrix, always consistent with the last
    /// rotation mutation.
    pub fn rotation_matrix(&self) -> &Mat3 {
        &self.rotation_matrix
    }

    /// Overwrite the rotation matrix directly. Used when a physics
    /// body drives the node; the Euler angles are left untouched and
    /// the matrix is authoritative until the next `set_rotation`.
    pub fn set_orientation_matrix(&mut self, matrix: Mat3) {
        self.rotation_matrix = matrix;
    }

    /// Local scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the local scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Whether the node is visible at all (user-controlled).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the node.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Hint that the node never moves; lets the culling pass treat its
    /// world position as stable.
    pub fn set_static_hint(&mut self, is_static: bool) {
        self.static_hint = is_static;
    }

    /// Whether the node is marked as never moving.
    pub fn is_static(&self) -> bool {
        self.static_hint
    }

    /// Last culling verdict. Kept separate from the user-controlled
    /// visibility flag so culling never clobbers an explicit
    /// `set_visible(false)`.
    pub fn is_in_view(&self) -> bool {
        self.in_view
    }

    /// Record the culling verdict for this frame.
    pub fn set_in_view(&mut self, in_view: bool) {
        self.in_view = in_view;
    }

    /// Map a coordinate expressed in the frame directly below the
    /// first ancestor into the frame above the last one, by adding
    /// each ancestor's position in turn. Ancestors are ordered from
    /// the immediate parent outward; an empty chain returns the input
    /// unchanged. The node's own position never contributes.
    pub fn map_to_ancestor(local: Vec3, ancestors: &[&SpatialNode]) -> Vec3 {
        match ancestors.split_first() {
            None => local,
            Some((parent, rest)) => Self::map_to_ancestor(local + parent.position, rest),
        }
    }
}
