use glam::Vec3;

use super::common::aim_camera;
use super::SceneSetup;
use crate::animation::{Motion, MotionId};
use crate::camera::PerspectiveCamera;
use crate::debug::{DebugPanel, Property};
use crate::error::SceneError;
use crate::math::{Color, Geometry};
use crate::scene::{Light, Material, Node, SceneGraph};
use crate::stage::Stage;

/// Sun at the origin, a planet orbiting it and a moon orbiting the planet
pub fn create_orbit_scene() -> Result<SceneSetup, SceneError> {
    let mut scene = SceneGraph::new();

    let camera = scene.spawn(Node::camera(PerspectiveCamera::new(60.0, 1.0, 0.1, 100.0)).at(0.0, 4.0, 8.0));
    aim_camera(&mut scene, camera, Vec3::ZERO);

    scene.spawn(Node::light(Light::Ambient { color: Color::WHITE, intensity: 0.2 }).named("ambient"));
    let sun = scene.spawn(Node::mesh(Geometry::sphere(1.0), Material::basic(Color::from_hex(0xffcc33))).named("sun"));
    scene.add(
        sun,
        Node::light(Light::Point { color: Color::WHITE, intensity: 1.5, distance: 20.0 }).named("sun light"),
    )?;

    // planet and moon hang off the pivot; planet spin stays local
    let planet_pivot = scene.spawn(Node::group().named("planet pivot"));
    let planet = scene.add(
        planet_pivot,
        Node::mesh(Geometry::sphere(0.4), Material::standard(Color::from_hex(0x3366ff))).named("planet"),
    )?;
    let moon = scene.add(
        planet_pivot,
        Node::mesh(Geometry::sphere(0.12), Material::standard(Color::from_hex(0xcccccc))).named("moon"),
    )?;

    let mut stage = Stage::new(scene, camera)?;
    let planet_orbit = stage.add_motion(Motion::orbit(planet_pivot, 4.0, 0.5));
    let moon_orbit = stage.add_motion(Motion::orbit(moon, 0.8, 2.0));
    stage.add_motion(Motion::spin(sun, Vec3::new(0.0, 0.2, 0.0)));
    stage.add_motion(Motion::spin(planet, Vec3::new(0.0, 1.0, 0.0)));

    let mut panel = DebugPanel::new("Orbit");
    panel
        .folder("planet")
        .add(orbit_radius("planet radius", planet_orbit, 1.5, 6.0))
        .add(orbit_rate("planet rate", planet_orbit))
        .folder("moon")
        .add(orbit_radius("moon radius", moon_orbit, 0.5, 1.5))
        .add(orbit_rate("moon rate", moon_orbit));

    Ok(SceneSetup { stage, panel })
}

fn orbit_radius(label: &str, orbit: MotionId, min: f32, max: f32) -> Property<Stage> {
    Property::number(
        label,
        min,
        max,
        0.1,
        move |stage: &Stage| match stage.motion(orbit) {
            Some(Motion::Orbit { radius, .. }) => *radius,
            _ => 0.0,
        },
        move |stage: &mut Stage, value| {
            if let Some(Motion::Orbit { radius, .. }) = stage.motion_mut(orbit) {
                *radius = value;
            }
        },
    )
}

fn orbit_rate(label: &str, orbit: MotionId) -> Property<Stage> {
    Property::number(
        label,
        -4.0,
        4.0,
        0.05,
        move |stage: &Stage| match stage.motion(orbit) {
            Some(Motion::Orbit { rate, .. }) => *rate,
            _ => 0.0,
        },
        move |stage: &mut Stage, value| {
            if let Some(Motion::Orbit { rate, .. }) = stage.motion_mut(orbit) {
                *rate = value;
            }
        },
    )
}
