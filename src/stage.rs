//! Everything a scene owns: the graph, the active camera, per-frame motions,
//! physics bodies and models still being decoded.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};

use crate::animation::{Motion, MotionContext, MotionId};
use crate::camera::PerspectiveCamera;
use crate::error::SceneError;
use crate::loaders::{load_gltf_model, ModelData, PendingAsset};
use crate::math::Geometry;
use crate::physics::PhysicsWorld;
use crate::scene::{Material, Node, NodeId, SceneGraph};

#[derive(Debug)]
struct PendingModel {
    asset: PendingAsset<ModelData>,
    parent: NodeId,
}

#[derive(Debug)]
pub struct Stage {
    pub scene: SceneGraph,
    /// Node rendered from; must hold a camera
    pub camera: NodeId,
    motions: Vec<Motion>,
    pub physics: PhysicsWorld,
    pending: Vec<PendingModel>,
}

impl Stage {
    pub fn new(scene: SceneGraph, camera: NodeId) -> Result<Self, SceneError> {
        scene.camera(camera)?;
        Ok(Self {
            scene,
            camera,
            motions: Vec::new(),
            physics: PhysicsWorld::default(),
            pending: Vec::new(),
        })
    }

    pub fn camera(&self) -> Result<&PerspectiveCamera, SceneError> {
        self.scene.camera(self.camera)
    }

    pub fn camera_mut(&mut self) -> Result<&mut PerspectiveCamera, SceneError> {
        self.scene.camera_mut(self.camera)
    }

    /// Register a motion; it runs after those added before it
    pub fn add_motion(&mut self, motion: Motion) -> MotionId {
        self.motions.push(motion);
        MotionId(self.motions.len() - 1)
    }

    pub fn motion(&self, id: MotionId) -> Option<&Motion> {
        self.motions.get(id.0)
    }

    pub fn motion_mut(&mut self, id: MotionId) -> Option<&mut Motion> {
        self.motions.get_mut(id.0)
    }

    /// Start decoding a glTF file; the mesh appears under `parent` once ready
    pub fn load_model(&mut self, path: impl Into<PathBuf>, parent: NodeId) {
        let asset = PendingAsset::spawn(path, |path: &Path| load_gltf_model(path));
        self.pending.push(PendingModel { asset, parent });
    }

    pub fn pending_models(&self) -> usize {
        self.pending.len()
    }

    /// Insert finished models; failures are logged and dropped
    pub fn poll_assets(&mut self) -> Vec<NodeId> {
        let mut inserted = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            let Some(result) = self.pending[index].asset.poll() else {
                index += 1;
                continue;
            };
            let PendingModel { asset, parent } = self.pending.swap_remove(index);

            match result {
                Ok(model) => match self.insert_model(model, parent) {
                    Ok(id) => inserted.push(id),
                    Err(err) => error!("cannot place {:?}: {err}", asset.path()),
                },
                Err(err) => error!("{err}"),
            }
        }
        inserted
    }

    /// Add a decoded model as a lit mesh under `parent`
    pub fn insert_model(&mut self, model: ModelData, parent: NodeId) -> Result<NodeId, SceneError> {
        let triangles = model.mesh.triangle_count();
        let node = Node::mesh(Geometry::Custom(Arc::new(model.mesh)), Material::standard(model.base_color))
            .named(model.name.clone());
        let id = self.scene.add(parent, node)?;
        info!("added model {} ({triangles} triangles, {} animations)", model.name, model.animations.len());
        Ok(id)
    }

    /// Run every motion for this frame
    pub fn update(&mut self, ctx: &MotionContext) {
        for motion in &mut self.motions {
            motion.apply(&mut self.scene, ctx);
        }
    }

    pub fn step_physics(&mut self, dt: f32) {
        self.physics.step(dt);
    }

    /// Push body positions to their nodes
    pub fn sync_physics(&mut self) {
        if !self.physics.is_empty() {
            self.physics.sync(&mut self.scene);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::FrameTime;
    use crate::math::{Color, MeshData};
    use glam::{Vec2, Vec3};

    fn stage() -> Stage {
        let mut scene = SceneGraph::new();
        let camera = scene.spawn(Node::camera(PerspectiveCamera::default()));
        Stage::new(scene, camera).unwrap()
    }

    #[test]
    fn new_rejects_non_camera() {
        let mut scene = SceneGraph::new();
        let group = scene.spawn(Node::group());
        assert!(matches!(Stage::new(scene, group), Err(SceneError::NotACamera(_))));
    }

    #[test]
    fn update_applies_motions_in_order() {
        let mut stage = stage();
        let node = stage.scene.spawn(Node::group());
        let orbit = stage.add_motion(Motion::orbit(node, 2.0, 1.0));
        let lift = stage.add_motion(Motion::custom(move |scene, _| {
            if let Some(n) = scene.get_mut(node) {
                n.transform.position.y += 1.0;
            }
        }));
        assert_ne!(orbit, lift);
        assert!(matches!(stage.motion(orbit), Some(Motion::Orbit { .. })));

        let ctx = MotionContext { time: FrameTime::new(0, 0.0, 0.0), pointer: Vec2::ZERO, camera: stage.camera };
        stage.update(&ctx);
        assert_eq!(stage.scene.get(node).unwrap().transform.position, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn motion_handles_survive_later_additions() {
        let mut stage = stage();
        let node = stage.scene.spawn(Node::group());
        let spin = stage.add_motion(Motion::spin(node, Vec3::Y));
        stage.add_motion(Motion::orbit(node, 3.0, 1.0));
        stage.add_motion(Motion::bob(node, 0.0, 0.5, 2.0));

        if let Some(Motion::Spin { rate, .. }) = stage.motion_mut(spin) {
            *rate = Vec3::X;
        }
        assert!(matches!(stage.motion(spin), Some(Motion::Spin { rate, .. }) if *rate == Vec3::X));
    }

    #[test]
    fn insert_model_adds_custom_mesh() {
        let mut stage = stage();
        let root = stage.scene.root();
        let model = ModelData {
            name: "tri".into(),
            mesh: MeshData::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]),
            base_color: Color::RED,
            animations: Vec::new(),
        };
        let id = stage.insert_model(model, root).unwrap();
        let node = stage.scene.get(id).unwrap();
        assert_eq!(node.name.as_deref(), Some("tri"));
        assert_eq!(node.as_mesh().unwrap().material.color(), Color::RED);
    }

    #[test]
    fn failed_load_is_dropped() {
        let mut stage = stage();
        let root = stage.scene.root();
        stage.load_model("/definitely/not/here.gltf", root);

        // the worker fails fast; poll until it reports
        for _ in 0..500 {
            stage.poll_assets();
            if stage.pending_models() == 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(stage.pending_models(), 0);
        assert_eq!(stage.scene.len(), 2);
    }
}
