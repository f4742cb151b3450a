use std::path::Path;

use glam::{Vec2, Vec3};
use log::warn;

use super::common::{add_default_lights, aim_camera};
use super::SceneSetup;
use crate::animation::Motion;
use crate::camera::PerspectiveCamera;
use crate::debug::{DebugPanel, Property};
use crate::error::SceneError;
use crate::scene::{Node, SceneGraph};
use crate::stage::Stage;

/// Turntable for a glTF model decoded in the background
pub fn create_model_scene(model: Option<&Path>) -> Result<SceneSetup, SceneError> {
    let mut scene = SceneGraph::new();

    let camera = scene.spawn(Node::camera(PerspectiveCamera::new(50.0, 1.0, 0.1, 100.0)).at(0.0, 1.5, 4.0));
    aim_camera(&mut scene, camera, Vec3::ZERO);
    add_default_lights(&mut scene);
    scene.spawn(Node::axes_helper(1.0).named("axes"));

    let turntable = scene.spawn(Node::group().named("turntable"));

    let mut stage = Stage::new(scene, camera)?;
    stage.add_motion(Motion::Parallax {
        node: camera,
        base: Vec3::new(0.0, 1.5, 4.0),
        amplitude: Vec2::new(0.5, -0.5),
        easing: 5.0,
    });
    let spin = stage.add_motion(Motion::spin(turntable, Vec3::new(0.0, 0.5, 0.0)));
    match model {
        Some(path) => stage.load_model(path, turntable),
        None => warn!("model scene started without --model"),
    }

    let mut panel = DebugPanel::new("Model");
    panel
        .add(Property::number(
            "spin",
            -3.0,
            3.0,
            0.1,
            move |stage: &Stage| match stage.motion(spin) {
                Some(Motion::Spin { rate, .. }) => rate.y,
                _ => 0.0,
            },
            move |stage: &mut Stage, value| {
                if let Some(Motion::Spin { rate, .. }) = stage.motion_mut(spin) {
                    rate.y = value;
                }
            },
        ))
        .add(Property::number(
            "scale",
            0.1,
            5.0,
            0.1,
            move |stage: &Stage| stage.scene.get(turntable).map_or(1.0, |n| n.transform.scale.x),
            move |stage: &mut Stage, value| {
                if let Some(n) = stage.scene.get_mut(turntable) {
                    n.transform.scale = Vec3::splat(value);
                }
            },
        ));

    Ok(SceneSetup { stage, panel })
}
