//! Collision shapes and narrow-phase contact tests.
//!
//! Shapes are stored in model space (a radius or half-extents only);
//! world positions come from the owning body at test time. Box shapes
//! collide as axis-aligned extents, which matches the engine-wide
//! constant contact model — per-shape orientation in the narrow phase
//! is not modelled.

use crate::foundation::math::Vec3;

/// Collision shape types, stored in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// A spherical collision shape
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// A box collision shape
    Box {
        /// Half-extent along each axis
        half_extents: Vec3,
    },
}

impl CollisionShape {
    /// Sphere shape from a radius.
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Box shape from full side lengths, as importers report model
    /// dimensions.
    pub fn cuboid(dimensions: Vec3) -> Self {
        Self::Box {
            half_extents: dimensions * 0.5,
        }
    }

    /// Radius of the bounding sphere used by the broad phase.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere { radius } => *radius,
            Self::Box { half_extents } => half_extents.norm(),
        }
    }

    /// Volume of the shape, used to derive mass from density.
    pub fn volume(&self) -> f32 {
        match self {
            Self::Sphere { radius } => 4.0 / 3.0 * std::f32::consts::PI * radius.powi(3),
            Self::Box { half_extents } => 8.0 * half_extents.x * half_extents.y * half_extents.z,
        }
    }
}

/// A single contact point produced by the narrow phase.
///
/// The normal points from the first shape toward the second; depth is
/// the penetration along that normal.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Contact point in world space
    pub point: Vec3,
    /// Unit normal from the first shape toward the second
    pub normal: Vec3,
    /// Penetration depth along the normal
    pub depth: f32,
}

/// Narrow-phase test between two positioned shapes. Returns the
/// contact if they penetrate, `None` otherwise.
pub fn contact(
    shape_a: &CollisionShape,
    pos_a: Vec3,
    shape_b: &CollisionShape,
    pos_b: Vec3,
) -> Option<Contact> {
    match (shape_a, shape_b) {
        (CollisionShape::Sphere { radius: ra }, CollisionShape::Sphere { radius: rb }) => {
            sphere_sphere(pos_a, *ra, pos_b, *rb)
        }
        (CollisionShape::Sphere { radius }, CollisionShape::Box { half_extents }) => {
            sphere_box(pos_a, *radius, pos_b, *half_extents)
        }
        (CollisionShape::Box { half_extents }, CollisionShape::Sphere { radius }) => {
            sphere_box(pos_b, *radius, pos_a, *half_extents).map(Contact::flipped)
        }
        (
            CollisionShape::Box { half_extents: ha },
            CollisionShape::Box { half_extents: hb },
        ) => box_box(pos_a, *ha, pos_b, *hb),
    }
}

impl Contact {
    fn flipped(self) -> Self {
        Self {
            point: self.point,
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

fn sphere_sphere(ca: Vec3, ra: f32, cb: Vec3, rb: f32) -> Option<Contact> {
    let offset = cb - ca;
    let distance = offset.norm();
    let radius_sum = ra + rb;
    // Grazing contact is not a contact, for every shape pair alike.
    if distance >= radius_sum {
        return None;
    }

    // Coincident centers have no meaningful direction; push along +X.
    let normal = if distance > f32::EPSILON {
        offset / distance
    } else {
        Vec3::x()
    };
    let depth = radius_sum - distance;
    Some(Contact {
        point: ca + normal * (ra - depth * 0.5),
        normal,
        depth,
    })
}

fn sphere_box(sphere_center: Vec3, radius: f32, box_center: Vec3, half: Vec3) -> Option<Contact> {
    let local = sphere_center - box_center;
    let closest = Vec3::new(
        local.x.clamp(-half.x, half.x),
        local.y.clamp(-half.y, half.y),
        local.z.clamp(-half.z, half.z),
    );
    let offset = local - closest;
    let distance = offset.norm();

    if distance >= radius {
        return None;
    }

    if distance > f32::EPSILON {
        // Sphere center outside the box: normal from surface point to center.
        let normal = -offset / distance;
        Some(Contact {
            point: box_center + closest,
            normal,
            depth: radius - distance,
        })
    } else {
        // Center inside the box: exit through the face of least depth.
        let face_depths = [
            (half.x - local.x.abs(), Vec3::x() * local.x.signum()),
            (half.y - local.y.abs(), Vec3::y() * local.y.signum()),
            (half.z - local.z.abs(), Vec3::z() * local.z.signum()),
        ];
        let (face_depth, out_normal) = face_depths
            .into_iter()
            .min_by(|(a, _), (b, _)| a.total_cmp(b))?;
        Some(Contact {
            point: sphere_center,
            normal: -out_normal,
            depth: face_depth + radius,
        })
    }
}

fn box_box(ca: Vec3, ha: Vec3, cb: Vec3, hb: Vec3) -> Option<Contact> {
    let offset = cb - ca;
    let overlap = Vec3::new(
        ha.x + hb.x - offset.x.abs(),
        ha.y + hb.y - offset.y.abs(),
        ha.z + hb.z - offset.z.abs(),
    );
    if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
        return None;
    }

    // Separate along the axis of least penetration.
    let (depth, normal) = if overlap.x <= overlap.y && overlap.x <= overlap.z {
        (overlap.x, Vec3::x() * sign_or_positive(offset.x))
    } else if overlap.y <= overlap.z {
        (overlap.y, Vec3::y() * sign_or_positive(offset.y))
    } else {
        (overlap.z, Vec3::z() * sign_or_positive(offset.z))
    };

    // Contact point at the center of the overlap region.
    let min = Vec3::new(
        (ca.x - ha.x).max(cb.x - hb.x),
        (ca.y - ha.y).max(cb.y - hb.y),
        (ca.z - ha.z).max(cb.z - hb.z),
    );
    let max = Vec3::new(
        (ca.x + ha.x).min(cb.x + hb.x),
        (ca.y + ha.y).min(cb.y + hb.y),
        (ca.z + ha.z).min(cb.z + hb.z),
    );

    Some(Contact {
        point: (min + max) * 0.5,
        normal,
        depth,
    })
}

fn sign_or_positive(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn separated_spheres_do_not_contact() {
        let a = CollisionShape::sphere(1.0);
        let b = CollisionShape::sphere(1.0);
        assert!(contact(&a, Vec3::zeros(), &b, Vec3::new(3.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn overlapping_spheres_contact_along_center_line() {
        let a = CollisionShape::sphere(1.0);
        let b = CollisionShape::sphere(1.0);
        let c = contact(&a, Vec3::zeros(), &b, Vec3::new(1.5, 0.0, 0.0)).unwrap();
        assert_relative_eq!(c.normal, Vec3::x(), epsilon = 1e-6);
        assert_relative_eq!(c.depth, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn sphere_resting_on_box_pushes_up() {
        let sphere = CollisionShape::sphere(1.0);
        let floor = CollisionShape::cuboid(Vec3::new(10.0, 1.0, 10.0));
        // Sphere center 0.9 above the floor top at y = 0.5.
        let c = contact(
            &sphere,
            Vec3::new(0.0, 1.4, 0.0),
            &floor,
            Vec3::new(0.0, 0.0, 0.0),
        )
        .unwrap();
        // Normal points from the sphere toward the box, i.e. down.
        assert_relative_eq!(c.normal, -Vec3::y(), epsilon = 1e-6);
        assert_relative_eq!(c.depth, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn boxes_contact_on_axis_of_least_overlap() {
        let a = CollisionShape::cuboid(Vec3::new(2.0, 2.0, 2.0));
        let b = CollisionShape::cuboid(Vec3::new(2.0, 2.0, 2.0));
        let c = contact(&a, Vec3::zeros(), &b, Vec3::new(1.8, 0.5, 0.0)).unwrap();
        assert_relative_eq!(c.normal, Vec3::x(), epsilon = 1e-6);
        assert_relative_eq!(c.depth, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn touching_spheres_do_not_contact() {
        let a = CollisionShape::sphere(1.0);
        let b = CollisionShape::sphere(1.0);
        assert!(contact(&a, Vec3::zeros(), &b, Vec3::new(2.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn sphere_touching_box_face_does_not_contact() {
        let sphere = CollisionShape::sphere(1.0);
        let floor = CollisionShape::cuboid(Vec3::new(10.0, 1.0, 10.0));
        // Sphere center exactly one radius above the floor top.
        assert!(contact(
            &sphere,
            Vec3::new(0.0, 1.5, 0.0),
            &floor,
            Vec3::new(0.0, 0.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn touching_boxes_do_not_contact() {
        let a = CollisionShape::cuboid(Vec3::new(2.0, 2.0, 2.0));
        let b = CollisionShape::cuboid(Vec3::new(2.0, 2.0, 2.0));
        assert!(contact(&a, Vec3::zeros(), &b, Vec3::new(2.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn box_volume_matches_dimensions() {
        let shape = CollisionShape::cuboid(Vec3::new(2.0, 3.0, 4.0));
        assert_relative_eq!(shape.volume(), 24.0, epsilon = 1e-5);
    }
}
