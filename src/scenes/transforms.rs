use std::f32::consts::FRAC_PI_4;

use glam::Vec3;

use super::common::{color_property, position_property, visible_property, wireframe_property};
use super::SceneSetup;
use crate::camera::PerspectiveCamera;
use crate::debug::DebugPanel;
use crate::error::SceneError;
use crate::math::{Color, EulerOrder, Geometry};
use crate::scene::{Material, Node, SceneGraph};
use crate::stage::Stage;

/// Two cubes inside a rotated group, one stretched cube and the world axes
pub fn create_transforms_scene() -> Result<SceneSetup, SceneError> {
    let mut scene = SceneGraph::new();

    let camera = scene.spawn(Node::camera(PerspectiveCamera::new(100.0, 1.0, 0.1, 100.0)).at(0.5, 0.5, 2.0));
    scene.spawn(Node::axes_helper(1.5).named("axes"));

    let mut group = Node::group().named("group").at(0.0, 1.0, 0.0);
    group.transform.rotation.set(2.0, 1.5, 0.0);
    let group = scene.spawn(group);

    scene.add(
        group,
        Node::mesh(Geometry::cube(1.0), Material::basic(Color::from_hex(0x2b384b)))
            .named("group cube 1")
            .at(1.5, -1.0, -1.0),
    )?;
    scene.add(
        group,
        Node::mesh(Geometry::cube(1.0), Material::basic(Color::from_hex(0xcec058)))
            .named("group cube 2")
            .at(-0.5, -1.0, -1.0),
    )?;

    let mut cube = Node::mesh(Geometry::cube(1.0), Material::basic(Color::from_hex(0x1d2828)))
        .named("cube")
        .at(1.0, -0.7, -0.5);
    cube.transform.scale = Vec3::new(2.0, 0.5, 0.5);
    cube.transform.rotation.set_order(EulerOrder::YXZ).set(FRAC_PI_4, FRAC_PI_4, 0.0);
    let cube = scene.spawn(cube);

    let stage = Stage::new(scene, camera)?;

    let mut panel = DebugPanel::new("Transforms");
    panel
        .folder("cube")
        .add(position_property("x", cube, 0, -3.0, 3.0))
        .add(position_property("y", cube, 1, -3.0, 3.0))
        .add(position_property("z", cube, 2, -3.0, 3.0))
        .add(color_property("color", cube))
        .add(visible_property("visible", cube))
        .add(wireframe_property("wireframe", cube))
        .folder("group")
        .add(visible_property("group visible", group));

    Ok(SceneSetup { stage, panel })
}
