//! Model and material resources.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

use crate::foundation::math::{Vec2, Vec3};

static NEXT_RESOURCE_ID: AtomicU32 = AtomicU32::new(1);

/// Opaque handle to a prepared GPU-side resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(u32);

impl ResourceId {
    pub(crate) fn allocate() -> Self {
        Self(NEXT_RESOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    pub fn value(self) -> u32 {
        self.0
    }
}

/// Raw geometry buffer as produced by an importer.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Per-vertex normals (may be empty)
    pub normals: Vec<Vec3>,
    /// Per-vertex texture coordinates (may be empty)
    pub uvs: Vec<Vec2>,
    /// Triangle index list
    pub triangles: Vec<[u32; 3]>,
    /// Optional per-triangle material index into the model's
    /// materials table
    pub material_indices: Vec<u32>,
}

/// Material scalars as decoded from a composite asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ambient: [f32; 3],
    /// Diffuse reflectance
    pub diffuse: [f32; 3],
    /// Specular reflectance
    pub specular: [f32; 3],
    /// Emitted light
    pub emission: [f32; 3],
    /// 0 = opaque, 1 = fully transparent
    pub transparency: f32,
}

/// Axis-aligned vertex extents of a geometry buffer.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: Vec3,
    max: Vec3,
}

impl Bounds {
    fn of(vertices: &[Vec3]) -> Self {
        let mut min = Vec3::repeat(f32::INFINITY);
        let mut max = Vec3::repeat(f32::NEG_INFINITY);
        for v in vertices {
            min = min.inf(v);
            max = max.sup(v);
        }
        if vertices.is_empty() {
            min = Vec3::zeros();
            max = Vec3::zeros();
        }
        Self { min, max }
    }
}

/// A shared, read-only mesh resource.
///
/// `prepare` binds GPU resources lazily and is memoized exactly once;
/// repeated calls return the same handle. The memoization is a
/// [`OnceLock`] so a future multi-threaded loader stays race-free.
#[derive(Debug)]
pub struct Model {
    name: String,
    geometry: Geometry,
    materials: Vec<Material>,
    sub_models: BTreeMap<String, Arc<Model>>,
    bounds: Bounds,
    prepared: OnceLock<ResourceId>,
}

impl Model {
    /// Create a plain model from a geometry buffer.
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        let bounds = Bounds::of(&geometry.vertices);
        Self {
            name: name.into(),
            geometry,
            materials: Vec::new(),
            sub_models: BTreeMap::new(),
            bounds,
            prepared: OnceLock::new(),
        }
    }

    /// Create a composite model from named sub-meshes and a shared
    /// materials table. Each sub-mesh becomes a child model of its
    /// own; the composite's bounds span all parts.
    pub fn composite(
        name: impl Into<String>,
        parts: Vec<(String, Geometry)>,
        materials: Vec<Material>,
    ) -> Self {
        let mut all_vertices = Vec::new();
        let mut sub_models = BTreeMap::new();
        for (part_name, geometry) in parts {
            all_vertices.extend_from_slice(&geometry.vertices);
            let part = Model::new(part_name.clone(), geometry);
            sub_models.insert(part_name, Arc::new(part));
        }
        let bounds = Bounds::of(&all_vertices);
        Self {
            name: name.into(),
            geometry: Geometry::default(),
            materials,
            sub_models,
            bounds,
            prepared: OnceLock::new(),
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw geometry buffer.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The materials table.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Named sub-meshes of a composite model; empty for plain models.
    pub fn sub_models(&self) -> &BTreeMap<String, Arc<Model>> {
        &self.sub_models
    }

    /// True if this model is a composite of named sub-meshes.
    pub fn is_composite(&self) -> bool {
        !self.sub_models.is_empty()
    }

    /// Bounding extents along each axis.
    pub fn dimensions(&self) -> Vec3 {
        self.bounds.max - self.bounds.min
    }

    /// Center of the bounding sphere, in model space.
    pub fn bounding_sphere_center(&self) -> Vec3 {
        (self.bounds.min + self.bounds.max) * 0.5
    }

    /// Radius of the bounding sphere.
    pub fn bounding_sphere_radius(&self) -> f32 {
        (self.bounds.max - self.bounds.min).norm() * 0.5
    }

    /// Bind GPU resources and return the reusable handle. Idempotent:
    /// the first call allocates, every later call returns the same id.
    pub fn prepare(&self) -> ResourceId {
        *self.prepared.get_or_init(ResourceId::allocate)
    }

    /// Whether `prepare` has run.
    pub fn is_prepared(&self) -> bool {
        self.prepared.get().is_some()
    }

    /// Release the prepared handle. The next `prepare` allocates a
    /// fresh one.
    pub fn destroy(&mut self) {
        self.prepared.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box_geometry() -> Geometry {
        // Corners of a 2x2x2 box centered at the origin.
        let mut vertices = Vec::new();
        for &x in &[-1.0f32, 1.0] {
            for &y in &[-1.0f32, 1.0] {
                for &z in &[-1.0f32, 1.0] {
                    vertices.push(Vec3::new(x, y, z));
                }
            }
        }
        Geometry {
            vertices,
            ..Geometry::default()
        }
    }

    #[test]
    fn dimensions_come_from_vertex_extents() {
        let model = Model::new("box", unit_box_geometry());
        assert_relative_eq!(model.dimensions(), Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(model.bounding_sphere_center(), Vec3::zeros());
        assert_relative_eq!(model.bounding_sphere_radius(), 3.0f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn prepare_is_memoized() {
        let model = Model::new("box", unit_box_geometry());
        assert!(!model.is_prepared());
        let first = model.prepare();
        let second = model.prepare();
        assert_eq!(first, second);
        assert!(model.is_prepared());
    }

    #[test]
    fn destroy_releases_the_handle() {
        let mut model = Model::new("box", unit_box_geometry());
        let first = model.prepare();
        model.destroy();
        assert!(!model.is_prepared());
        let second = model.prepare();
        assert_ne!(first, second);
    }

    #[test]
    fn composite_collects_sub_models() {
        let model = Model::composite(
            "car",
            vec![
                ("body".into(), unit_box_geometry()),
                ("wheel_L".into(), unit_box_geometry()),
            ],
            Vec::new(),
        );
        assert!(model.is_composite());
        assert_eq!(model.sub_models().len(), 2);
        assert!(model.sub_models().contains_key("wheel_L"));
    }

    #[test]
    fn empty_geometry_has_zero_bounds() {
        let model = Model::new("empty", Geometry::default());
        assert_relative_eq!(model.dimensions(), Vec3::zeros());
    }
}
