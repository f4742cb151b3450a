use glam::Vec3;

use crate::debug::Property;
use crate::math::Color;
use crate::scene::{Light, Node, NodeId, SceneGraph};
use crate::stage::Stage;

/// Soft fill plus one key light, shared by the lit scenes
pub fn add_default_lights(scene: &mut SceneGraph) {
    scene.spawn(Node::light(Light::Ambient { color: Color::WHITE, intensity: 0.35 }).named("ambient"));
    scene.spawn(
        Node::light(Light::Directional { color: Color::WHITE, intensity: 0.9 })
            .named("sun")
            .at(3.0, 4.0, 2.0),
    );
}

/// Golden-ratio hue walk; neighbouring seeds get well separated colors
pub fn seeded_color(seed: u32, saturation: f32, value: f32) -> Color {
    let hue = (seed as f32 * 0.618_034) % 1.0;
    Color::from_array(crate::math::hsv_to_rgb(hue, saturation, value))
}

/// Slider over one axis of a node's position
pub fn position_property(label: &str, node: NodeId, axis: usize, min: f32, max: f32) -> Property<Stage> {
    Property::number(
        label,
        min,
        max,
        0.01,
        move |stage: &Stage| stage.scene.get(node).map_or(0.0, |n| n.transform.position[axis]),
        move |stage: &mut Stage, value| {
            if let Some(n) = stage.scene.get_mut(node) {
                n.transform.position[axis] = value;
            }
        },
    )
}

pub fn color_property(label: &str, node: NodeId) -> Property<Stage> {
    Property::color(
        label,
        move |stage: &Stage| {
            stage
                .scene
                .get(node)
                .and_then(Node::as_mesh)
                .map_or(Color::BLACK, |mesh| mesh.material.color())
        },
        move |stage: &mut Stage, color| {
            if let Some(mesh) = stage.scene.get_mut(node).and_then(Node::as_mesh_mut) {
                mesh.material.set_color(color);
            }
        },
    )
}

pub fn visible_property(label: &str, node: NodeId) -> Property<Stage> {
    Property::toggle(
        label,
        move |stage: &Stage| stage.scene.get(node).is_some_and(|n| n.visible),
        move |stage: &mut Stage, visible| {
            if let Some(n) = stage.scene.get_mut(node) {
                n.visible = visible;
            }
        },
    )
}

pub fn wireframe_property(label: &str, node: NodeId) -> Property<Stage> {
    Property::toggle(
        label,
        move |stage: &Stage| {
            stage
                .scene
                .get(node)
                .and_then(Node::as_mesh)
                .is_some_and(|mesh| mesh.material.wireframe())
        },
        move |stage: &mut Stage, wireframe| {
            if let Some(mesh) = stage.scene.get_mut(node).and_then(Node::as_mesh_mut) {
                mesh.material.set_wireframe(wireframe);
            }
        },
    )
}

/// Point `camera` at `target`, given in the camera parent's space
pub fn aim_camera(scene: &mut SceneGraph, camera: NodeId, target: Vec3) {
    if let Some(node) = scene.get_mut(camera) {
        node.transform.look_at(target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::debug::{DebugPanel, PropertyValue};
    use crate::math::Geometry;
    use crate::scene::Material;

    fn stage_with_cube() -> (Stage, NodeId) {
        let mut scene = SceneGraph::new();
        let camera = scene.spawn(Node::camera(PerspectiveCamera::default()));
        let cube = scene.spawn(Node::mesh(Geometry::cube(1.0), Material::basic(Color::RED)));
        (Stage::new(scene, camera).unwrap(), cube)
    }

    #[test]
    fn seeded_colors_differ() {
        assert_ne!(seeded_color(0, 0.8, 0.9), seeded_color(1, 0.8, 0.9));
    }

    #[test]
    fn node_properties_write_through() {
        let (mut stage, cube) = stage_with_cube();
        let mut panel = DebugPanel::new("test");
        panel
            .add(position_property("y", cube, 1, -3.0, 3.0))
            .add(color_property("color", cube))
            .add(visible_property("visible", cube));

        panel.set(&mut stage, "y", PropertyValue::Number(9.0)).unwrap();
        panel.set(&mut stage, "color", PropertyValue::Color(Color::BLUE)).unwrap();
        panel.set(&mut stage, "visible", PropertyValue::Bool(false)).unwrap();

        let node = stage.scene.get(cube).unwrap();
        approx::assert_relative_eq!(node.transform.position.y, 3.0, epsilon = 1e-4);
        assert_eq!(node.as_mesh().unwrap().material.color(), Color::BLUE);
        assert!(!node.visible);
    }

    #[test]
    fn properties_on_removed_node_read_defaults() {
        let (mut stage, cube) = stage_with_cube();
        stage.scene.remove(cube).unwrap();
        let mut panel = DebugPanel::new("test");
        panel.add(visible_property("visible", cube));
        assert_eq!(panel.get(&stage, "visible").unwrap(), PropertyValue::Bool(false));
    }
}
