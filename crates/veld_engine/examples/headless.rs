//! Headless demo: drops a crate onto a floor slab and prints its
//! trajectory, drawing through the recording painter instead of a
//! real backend.
//!
//! Run with `RUST_LOG=debug` to see the scene lifecycle logs.

use std::sync::Arc;

use veld_engine::assets::{Geometry, Model};
use veld_engine::prelude::*;
use veld_engine::render::RecordingPainter;
use veld_engine::scene::EntityKind;

fn cube(name: &str, half: f32) -> Arc<Model> {
    let geometry = Geometry {
        vertices: vec![Vec3::new(-half, -half, -half), Vec3::new(half, half, half)],
        ..Geometry::default()
    };
    Arc::new(Model::new(name, geometry))
}

fn main() -> Result<(), EngineError> {
    env_logger::init();

    let mut config = EngineConfig::default();
    config.frame_interval = 0.02;
    let mut engine = Engine::new(config);

    let mut camera = Camera::new("camera");
    camera.set_position(Vec3::new(0.0, 2.0, 10.0));
    engine.scene_mut().set_camera(camera);

    let mut floor = Entity::new("floor", EntityKind::StaticObstacle, cube("slab", 5.0), None);
    floor.set_position(Vec3::new(0.0, -5.0, 0.0), engine.scene_mut().physics_mut());
    engine.scene_mut().register_entity(floor)?;

    let mut falling = Entity::new("crate", EntityKind::Physical, cube("crate", 1.0), None);
    falling.set_position(Vec3::new(0.0, 8.0, 0.0), engine.scene_mut().physics_mut());
    engine.scene_mut().register_entity(falling)?;

    engine.scene_mut().prepare()?;

    let mut painter = RecordingPainter::new();
    for frame in 0..100 {
        engine.tick()?;
        engine.render(&mut painter)?;

        if frame % 10 == 0 {
            let y = engine
                .scene()
                .get_object_by_name("crate")
                .map_or(0.0, |e| e.node().position().y);
            println!("frame {frame:3}: crate y = {y:7.3}, drawn: {:?}", painter.drawn);
        }
    }

    Ok(())
}
