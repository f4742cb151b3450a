mod graph;
mod node;

pub use graph::{Descendants, NodeId, SceneGraph};
pub use node::{Light, Material, Mesh, Node, NodeKind};
