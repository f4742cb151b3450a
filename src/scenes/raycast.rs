use super::common::{add_default_lights, color_property, seeded_color};
use super::SceneSetup;
use crate::animation::Motion;
use crate::camera::PerspectiveCamera;
use crate::debug::{DebugPanel, Property};
use crate::error::SceneError;
use crate::math::{Color, Geometry};
use crate::scene::{Material, Node, SceneGraph};
use crate::stage::Stage;

/// Three bobbing spheres; the one under the pointer lights up
pub fn create_raycast_scene() -> Result<SceneSetup, SceneError> {
    let mut scene = SceneGraph::new();

    let camera = scene.spawn(Node::camera(PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0)).at(0.0, 0.0, 5.0));
    add_default_lights(&mut scene);

    let mut spheres = Vec::with_capacity(3);
    for (i, x) in [-2.0, 0.0, 2.0].into_iter().enumerate() {
        let sphere = scene.spawn(
            Node::mesh(Geometry::sphere(0.5), Material::standard(seeded_color(i as u32, 0.6, 0.8)))
                .named(format!("sphere {}", i + 1))
                .at(x, 0.0, 0.0),
        );
        spheres.push(sphere);
    }

    let mut stage = Stage::new(scene, camera)?;
    for (i, &sphere) in spheres.iter().enumerate() {
        stage.add_motion(Motion::bob(sphere, 0.0, 0.5, 0.3 + 0.1 * i as f32));
    }
    let hover = Motion::hover(&stage.scene, &spheres, Color::from_hex(0xff3366));
    let hover = stage.add_motion(hover);

    let mut panel = DebugPanel::new("Raycast");
    panel.add(Property::color(
        "hover color",
        move |stage: &Stage| match stage.motion(hover) {
            Some(Motion::Hover { hover_color, .. }) => *hover_color,
            _ => Color::WHITE,
        },
        move |stage: &mut Stage, color| {
            if let Some(Motion::Hover { hover_color, .. }) = stage.motion_mut(hover) {
                *hover_color = color;
            }
        },
    ));
    panel.folder("spheres");
    for (i, &sphere) in spheres.iter().enumerate() {
        panel.add(color_property(&format!("sphere {} color", i + 1), sphere));
    }

    Ok(SceneSetup { stage, panel })
}
