use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use log::warn;

use super::common::{add_default_lights, aim_camera, seeded_color};
use super::SceneSetup;
use crate::camera::PerspectiveCamera;
use crate::debug::{DebugPanel, Property};
use crate::error::SceneError;
use crate::math::{Color, Geometry};
use crate::physics::{PhysicsWorld, EARTH_GRAVITY};
use crate::scene::{Material, Node, SceneGraph};
use crate::stage::Stage;

const DROP_HEIGHT: f32 = 4.0;
const SPHERE_RADIUS: f32 = 0.3;

/// Ground plane with spheres falling onto it
pub fn create_physics_scene() -> Result<SceneSetup, SceneError> {
    let mut scene = SceneGraph::new();

    let camera = scene.spawn(Node::camera(PerspectiveCamera::new(65.0, 1.0, 0.1, 100.0)).at(0.0, 3.0, 7.0));
    aim_camera(&mut scene, camera, Vec3::new(0.0, 1.0, 0.0));
    add_default_lights(&mut scene);

    let mut ground = Node::mesh(
        Geometry::Plane { width: 10.0, height: 10.0 },
        Material::standard(Color::from_hex(0x777777)),
    )
    .named("ground");
    ground.transform.rotation.set(-FRAC_PI_2, 0.0, 0.0);
    scene.spawn(ground);

    let mut stage = Stage::new(scene, camera)?;
    stage.physics = PhysicsWorld::new(EARTH_GRAVITY, 0.0);
    for _ in 0..3 {
        drop_sphere(&mut stage);
    }

    let mut panel = DebugPanel::new("Physics");
    panel
        .add(Property::action("drop sphere", drop_sphere))
        .add(Property::action("clear", clear_spheres))
        .add(Property::number(
            "gravity",
            -30.0,
            0.0,
            0.01,
            |stage: &Stage| stage.physics.gravity().y,
            |stage: &mut Stage, value| stage.physics.set_gravity(Vec3::new(0.0, value, 0.0)),
        ))
        .add(Property::number(
            "bounce",
            0.0,
            1.0,
            0.05,
            |stage: &Stage| stage.physics.restitution(),
            |stage: &mut Stage, value| stage.physics.set_restitution(value),
        ));

    Ok(SceneSetup { stage, panel })
}

/// Spawn a sphere above the ground; positions walk a spiral so drops don't stack
fn drop_sphere(stage: &mut Stage) {
    let Stage { scene, physics, .. } = stage;
    let n = physics.len() as u32;
    let angle = n as f32 * 2.4;
    let offset = 0.4 + 0.15 * (n % 10) as f32;
    let position = Vec3::new(angle.cos() * offset, DROP_HEIGHT, angle.sin() * offset);
    let root = scene.root();
    let material = Material::standard(seeded_color(n, 0.7, 0.95));

    if let Err(err) = physics.spawn_sphere(scene, root, position, SPHERE_RADIUS, material) {
        warn!("cannot drop sphere: {err}");
    }
}

fn clear_spheres(stage: &mut Stage) {
    let Stage { scene, physics, .. } = stage;
    for node in physics.clear() {
        // a node removed elsewhere is already gone
        let _ = scene.remove(node);
    }
}
