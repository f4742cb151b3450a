//! Per-frame node updates.
//!
//! Every motion is a pure function of the frame time, the pointer and the
//! node's current state, so replaying the same ticks gives the same scene.
//! Motions whose node has been removed do nothing.

use std::f32::consts::TAU;
use std::fmt;

use glam::{Vec2, Vec3};

use crate::core::frame::FrameTime;
use crate::math::Color;
use crate::raycaster::Raycaster;
use crate::scene::{NodeId, SceneGraph};

/// Inputs shared by all motions during one tick
#[derive(Debug, Clone, Copy)]
pub struct MotionContext {
    pub time: FrameTime,
    /// Pointer in centered [-0.5, 0.5] coordinates, y up
    pub pointer: Vec2,
    pub camera: NodeId,
}

impl MotionContext {
    pub fn pointer_ndc(&self) -> Vec2 {
        self.pointer * 2.0
    }
}

/// Handle to a motion registered on a `Stage`; stays valid for the stage's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionId(pub(crate) usize);

pub type CustomMotion = Box<dyn FnMut(&mut SceneGraph, &MotionContext)>;

pub enum Motion {
    /// Circle in the parent's XZ plane: angle = phase + rate * elapsed
    Orbit { node: NodeId, radius: f32, rate: f32, phase: f32, height: f32 },
    /// Euler angles advance by `rate` radians per second per axis
    Spin { node: NodeId, rate: Vec3 },
    /// y = base + amplitude * sin(2 pi frequency elapsed)
    Bob { node: NodeId, base: f32, amplitude: f32, frequency: f32 },
    /// Eases toward base + pointer offset
    Parallax { node: NodeId, base: Vec3, amplitude: Vec2, easing: f32 },
    /// Nearest mesh under the pointer takes `hover_color`; the rest keep their own
    Hover { targets: Vec<(NodeId, Color)>, hover_color: Color },
    Custom(CustomMotion),
}

impl Motion {
    pub fn orbit(node: NodeId, radius: f32, rate: f32) -> Self {
        Motion::Orbit { node, radius, rate, phase: 0.0, height: 0.0 }
    }

    pub fn spin(node: NodeId, rate: Vec3) -> Self {
        Motion::Spin { node, rate }
    }

    pub fn bob(node: NodeId, base: f32, amplitude: f32, frequency: f32) -> Self {
        Motion::Bob { node, base, amplitude, frequency }
    }

    /// Hover over `targets`, remembering each mesh's current color as its base
    pub fn hover(scene: &SceneGraph, targets: &[NodeId], hover_color: Color) -> Self {
        let targets = targets
            .iter()
            .filter_map(|&id| {
                let mesh = scene.get(id)?.as_mesh()?;
                Some((id, mesh.material.color()))
            })
            .collect();
        Motion::Hover { targets, hover_color }
    }

    pub fn custom(f: impl FnMut(&mut SceneGraph, &MotionContext) + 'static) -> Self {
        Motion::Custom(Box::new(f))
    }

    pub fn apply(&mut self, scene: &mut SceneGraph, ctx: &MotionContext) {
        let FrameTime { elapsed, delta, .. } = ctx.time;
        match self {
            Motion::Orbit { node, radius, rate, phase, height } => {
                if let Some(node) = scene.get_mut(*node) {
                    let angle = *phase + *rate * elapsed;
                    node.transform.position = Vec3::new(*radius * angle.cos(), *height, *radius * angle.sin());
                }
            }
            Motion::Spin { node, rate } => {
                if let Some(node) = scene.get_mut(*node) {
                    let rotation = &mut node.transform.rotation;
                    rotation.x += rate.x * delta;
                    rotation.y += rate.y * delta;
                    rotation.z += rate.z * delta;
                }
            }
            Motion::Bob { node, base, amplitude, frequency } => {
                if let Some(node) = scene.get_mut(*node) {
                    node.transform.position.y = *base + *amplitude * (TAU * *frequency * elapsed).sin();
                }
            }
            Motion::Parallax { node, base, amplitude, easing } => {
                if let Some(node) = scene.get_mut(*node) {
                    let target = *base + Vec3::new(ctx.pointer.x * amplitude.x, ctx.pointer.y * amplitude.y, 0.0);
                    let position = &mut node.transform.position;
                    *position += (target - *position) * (*easing * delta).min(1.0);
                }
            }
            Motion::Hover { targets, hover_color } => {
                let Ok(camera) = scene.camera(ctx.camera) else { return };
                let caster = Raycaster::from_camera(
                    ctx.pointer_ndc(),
                    &scene.world_matrix(ctx.camera),
                    &camera.projection_matrix(),
                );
                let ids: Vec<NodeId> = targets.iter().map(|(id, _)| *id).collect();
                let hovered = caster.intersect(scene, &ids).first().map(|hit| hit.node);

                for (id, base) in targets.iter() {
                    let color = if Some(*id) == hovered { *hover_color } else { *base };
                    if let Some(mesh) = scene.get_mut(*id).and_then(|n| n.as_mesh_mut()) {
                        mesh.material.set_color(color);
                    }
                }
            }
            Motion::Custom(f) => f(scene, ctx),
        }
    }
}

impl fmt::Debug for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Motion::Orbit { node, radius, rate, .. } => {
                f.debug_struct("Orbit").field("node", node).field("radius", radius).field("rate", rate).finish()
            }
            Motion::Spin { node, rate } => f.debug_struct("Spin").field("node", node).field("rate", rate).finish(),
            Motion::Bob { node, amplitude, frequency, .. } => f
                .debug_struct("Bob")
                .field("node", node)
                .field("amplitude", amplitude)
                .field("frequency", frequency)
                .finish(),
            Motion::Parallax { node, easing, .. } => {
                f.debug_struct("Parallax").field("node", node).field("easing", easing).finish()
            }
            Motion::Hover { targets, .. } => f.debug_struct("Hover").field("targets", &targets.len()).finish(),
            Motion::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::math::Geometry;
    use crate::scene::{Material, Node};
    use approx::assert_relative_eq;

    fn ctx(camera: NodeId, elapsed: f32, delta: f32) -> MotionContext {
        MotionContext { time: FrameTime::new(0, elapsed, delta), pointer: Vec2::ZERO, camera }
    }

    fn setup() -> (SceneGraph, NodeId, NodeId) {
        let mut scene = SceneGraph::new();
        let camera = scene.spawn(Node::camera(PerspectiveCamera::default()).at(0.0, 0.0, 5.0));
        let node = scene.spawn(Node::mesh(Geometry::cube(1.0), Material::basic(Color::WHITE)));
        (scene, camera, node)
    }

    #[test]
    fn orbit_traces_circle() {
        let (mut scene, camera, node) = setup();
        let mut motion = Motion::Orbit { node, radius: 2.0, rate: 0.5, phase: 0.25, height: 1.0 };

        for elapsed in [0.0, 0.7, 3.1, 12.0] {
            motion.apply(&mut scene, &ctx(camera, elapsed, 0.016));
            let p = scene.get(node).unwrap().transform.position;
            let theta = 0.25 + 0.5 * elapsed;
            assert_relative_eq!(p.x, 2.0 * theta.cos(), epsilon = 1e-5);
            assert_relative_eq!(p.z, 2.0 * theta.sin(), epsilon = 1e-5);
            assert_relative_eq!(p.y, 1.0);
        }
    }

    #[test]
    fn spin_scales_with_delta() {
        let (mut scene, camera, node) = setup();
        let mut motion = Motion::spin(node, Vec3::new(0.0, 2.0, 0.0));
        motion.apply(&mut scene, &ctx(camera, 0.5, 0.5));
        motion.apply(&mut scene, &ctx(camera, 0.75, 0.25));
        assert_relative_eq!(scene.get(node).unwrap().transform.rotation.y, 1.5);
    }

    #[test]
    fn bob_follows_sine() {
        let (mut scene, camera, node) = setup();
        let mut motion = Motion::bob(node, 1.0, 0.5, 1.0);
        motion.apply(&mut scene, &ctx(camera, 0.25, 0.0));
        assert_relative_eq!(scene.get(node).unwrap().transform.position.y, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn parallax_eases_toward_pointer() {
        let (mut scene, camera, node) = setup();
        let mut motion = Motion::Parallax { node, base: Vec3::ZERO, amplitude: Vec2::ONE, easing: 5.0 };
        let mut context = ctx(camera, 0.0, 0.1);
        context.pointer = Vec2::new(0.5, 0.0);

        motion.apply(&mut scene, &context);
        assert_relative_eq!(scene.get(node).unwrap().transform.position.x, 0.25);

        // a long frame snaps instead of overshooting
        context.time.delta = 10.0;
        motion.apply(&mut scene, &context);
        assert_relative_eq!(scene.get(node).unwrap().transform.position.x, 0.5);
    }

    #[test]
    fn hover_highlights_mesh_under_pointer() {
        let (mut scene, camera, node) = setup();
        let side = scene.spawn(Node::mesh(Geometry::cube(1.0), Material::basic(Color::WHITE)).at(3.0, 0.0, 0.0));
        let mut motion = Motion::hover(&scene, &[node, side], Color::RED);

        motion.apply(&mut scene, &ctx(camera, 0.0, 0.0));
        assert_eq!(scene.get(node).unwrap().as_mesh().unwrap().material.color(), Color::RED);
        assert_eq!(scene.get(side).unwrap().as_mesh().unwrap().material.color(), Color::WHITE);

        let mut away = ctx(camera, 0.0, 0.0);
        away.pointer = Vec2::new(-0.5, 0.5);
        motion.apply(&mut scene, &away);
        assert_eq!(scene.get(node).unwrap().as_mesh().unwrap().material.color(), Color::WHITE);
    }

    #[test]
    fn removed_node_is_ignored() {
        let (mut scene, camera, node) = setup();
        scene.remove(node).unwrap();
        let mut motion = Motion::orbit(node, 1.0, 1.0);
        motion.apply(&mut scene, &ctx(camera, 1.0, 0.1));
    }

    #[test]
    fn custom_motion_runs_closure() {
        let (mut scene, camera, node) = setup();
        let mut motion = Motion::custom(move |scene, ctx| {
            if let Some(n) = scene.get_mut(node) {
                n.transform.scale = Vec3::splat(1.0 + ctx.time.elapsed);
            }
        });
        motion.apply(&mut scene, &ctx(camera, 1.0, 0.0));
        assert_eq!(scene.get(node).unwrap().transform.scale, Vec3::splat(2.0));
    }
}
