//! View-frustum extraction and containment tests.
//!
//! The frustum is rebuilt from the camera basis whenever the camera or
//! the viewport parameters change. Classification follows the
//! point-and-normal plane representation: `distance(p) >= 0` means the
//! point is on the inside half-space of that plane.

use crate::foundation::math::{deg_to_rad, Vec3};

/// Result of testing a volume against the frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Entirely inside all six planes
    Inside,
    /// Straddles at least one plane
    Intersect,
    /// Entirely behind at least one plane
    Outside,
}

/// A plane stored as a normal, a point on the plane and the
/// precomputed plane constant.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    normal: Vec3,
    point: Vec3,
    d: f32,
}

impl Plane {
    fn new() -> Self {
        Self {
            normal: Vec3::y(),
            point: Vec3::zeros(),
            d: 0.0,
        }
    }

    /// Redefine the plane from a normal and a point on it.
    pub fn set_normal_and_point(&mut self, normal: Vec3, point: Vec3) {
        self.normal = normal;
        self.point = point;
        self.d = -normal.dot(&point);
    }

    /// Signed distance of a point to the plane; non-negative on the
    /// normal side.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.d
    }

    /// Plane normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// The stored point on the plane.
    pub fn point(&self) -> Vec3 {
        self.point
    }
}

const NEAR: usize = 0;
const FAR: usize = 1;
const TOP: usize = 2;
const BOTTOM: usize = 3;
const LEFT: usize = 4;
const RIGHT: usize = 5;

/// The six-plane view volume.
#[derive(Debug, Clone)]
pub struct Frustum {
    angle: f32,
    ratio: f32,
    near_distance: f32,
    far_distance: f32,
    near_width: f32,
    near_height: f32,
    far_width: f32,
    far_height: f32,
    planes: [Plane; 6],
}

impl Frustum {
    /// Create a frustum from perspective parameters; takes the same
    /// arguments as a `gluPerspective` call. The planes are not
    /// positioned until the first [`Frustum::set_view`].
    pub fn new(fov_degrees: f32, ratio: f32, near_distance: f32, far_distance: f32) -> Self {
        let mut frustum = Self {
            angle: 0.0,
            ratio: 0.0,
            near_distance: 0.0,
            far_distance: 0.0,
            near_width: 0.0,
            near_height: 0.0,
            far_width: 0.0,
            far_height: 0.0,
            planes: [Plane::new(); 6],
        };
        frustum.configure(fov_degrees, ratio, near_distance, far_distance);
        frustum
    }

    /// Recompute the near/far plane half-extents. Must be called each
    /// time the perspective changes.
    pub fn configure(&mut self, fov_degrees: f32, ratio: f32, near_distance: f32, far_distance: f32) {
        self.angle = fov_degrees;
        self.ratio = ratio;
        self.near_distance = near_distance;
        self.far_distance = far_distance;

        let tang = (0.5 * deg_to_rad(fov_degrees)).tan();
        self.near_height = near_distance * tang;
        self.near_width = ratio * self.near_height;
        self.far_height = far_distance * tang;
        self.far_width = ratio * self.far_height;
    }

    /// Reposition all six planes from the camera basis; takes the same
    /// parameters as a `gluLookAt` call. Must be called each time the
    /// camera's position or orientation changes.
    pub fn set_view(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        let z = (eye - target).normalize();
        let x = up.cross(&z).normalize();
        let y = z.cross(&x);

        let near_center = eye - z * self.near_distance;
        let far_center = eye - z * self.far_distance;

        self.planes[NEAR].set_normal_and_point(-z, near_center);
        self.planes[FAR].set_normal_and_point(z, far_center);

        let aux = ((near_center + y * self.near_height) - eye).normalize();
        self.planes[TOP].set_normal_and_point(aux.cross(&x), near_center + y * self.near_height);

        let aux = ((near_center - y * self.near_height) - eye).normalize();
        self.planes[BOTTOM].set_normal_and_point(x.cross(&aux), near_center - y * self.near_height);

        let aux = ((near_center - x * self.near_width) - eye).normalize();
        self.planes[LEFT].set_normal_and_point(aux.cross(&y), near_center - x * self.near_width);

        let aux = ((near_center + x * self.near_width) - eye).normalize();
        self.planes[RIGHT].set_normal_and_point(y.cross(&aux), near_center + x * self.near_width);
    }

    /// Test a single point.
    pub fn classify_point(&self, point: Vec3) -> Containment {
        for plane in &self.planes {
            if plane.distance(point) < 0.0 {
                return Containment::Outside;
            }
        }
        Containment::Inside
    }

    /// Test a bounding sphere.
    pub fn classify_sphere(&self, center: Vec3, radius: f32) -> Containment {
        let mut state = Containment::Inside;
        for plane in &self.planes {
            let d = plane.distance(center);
            if d < -radius {
                return Containment::Outside;
            } else if d < radius {
                state = Containment::Intersect;
            }
        }
        state
    }

    /// Test an eight-corner box.
    pub fn classify_box(&self, corners: &[Vec3; 8]) -> Containment {
        let mut state = Containment::Inside;
        for plane in &self.planes {
            let mut outside = 0u32;
            let mut inside = 0u32;
            for corner in corners {
                if inside != 0 && outside != 0 {
                    break;
                }
                if plane.distance(*corner) < 0.0 {
                    outside += 1;
                } else {
                    inside += 1;
                }
            }
            if inside == 0 {
                return Containment::Outside;
            } else if outside != 0 {
                state = Containment::Intersect;
            }
        }
        state
    }

    /// Corners of an axis-aligned box, for [`Frustum::classify_box`].
    pub fn box_corners(center: Vec3, half_extents: Vec3) -> [Vec3; 8] {
        let h = half_extents;
        [
            center + Vec3::new(-h.x, -h.y, -h.z),
            center + Vec3::new(h.x, -h.y, -h.z),
            center + Vec3::new(-h.x, h.y, -h.z),
            center + Vec3::new(h.x, h.y, -h.z),
            center + Vec3::new(-h.x, -h.y, h.z),
            center + Vec3::new(h.x, -h.y, h.z),
            center + Vec3::new(-h.x, h.y, h.z),
            center + Vec3::new(h.x, h.y, h.z),
        ]
    }
}
