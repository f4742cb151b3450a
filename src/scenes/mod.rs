//! Demo scenes. Each builder returns a ready [`Stage`] plus the debug
//! properties that make sense for it.

mod common;
mod model;
mod orbit;
mod physics;
mod raycast;
mod transforms;

use std::path::Path;

use clap::ValueEnum;
use log::info;

use crate::debug::DebugPanel;
use crate::error::SceneError;
use crate::stage::Stage;

pub use common::{add_default_lights, seeded_color};
pub use model::create_model_scene;
pub use orbit::create_orbit_scene;
pub use physics::create_physics_scene;
pub use raycast::create_raycast_scene;
pub use transforms::create_transforms_scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Grouped and rotated cubes with an axes helper
    Transforms,
    /// Sun, planet and moon
    Orbit,
    /// Spheres bouncing on a ground plane
    Physics,
    /// Bobbing spheres highlighted under the pointer
    Raycast,
    /// A glTF file given with --model
    Model,
}

pub struct SceneSetup {
    pub stage: Stage,
    pub panel: DebugPanel<Stage>,
}

pub fn build(kind: SceneKind, model: Option<&Path>) -> Result<SceneSetup, SceneError> {
    info!("building {kind:?} scene");
    match kind {
        SceneKind::Transforms => create_transforms_scene(),
        SceneKind::Orbit => create_orbit_scene(),
        SceneKind::Physics => create_physics_scene(),
        SceneKind::Raycast => create_raycast_scene(),
        SceneKind::Model => create_model_scene(model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scene_builds_with_a_valid_graph() {
        for kind in SceneKind::value_variants() {
            let setup = build(*kind, None).unwrap();
            setup.stage.scene.check_invariants().unwrap();
            assert!(setup.stage.camera().is_ok(), "{kind:?} has no camera");
        }
    }
}
