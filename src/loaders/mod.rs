pub mod gltf;
pub mod pending;

pub use self::gltf::{load_gltf_model, AnimationSummary, ModelData};
pub use self::pending::PendingAsset;
