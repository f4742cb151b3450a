pub mod animation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod debug;
pub mod error;
pub mod loaders;
pub mod math;
pub mod physics;
pub mod raycaster;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod stage;

pub use scenes::{build as build_scene, SceneKind, SceneSetup};
pub use stage::Stage;
