mod aabb;
mod color;
mod geometry;
mod ray;
mod transform;

pub use aabb::AABB;
pub use color::{hsv_to_rgb, Color};
pub use geometry::{Geometry, MeshData};
pub use ray::{intersect_aabb, Ray};
pub use transform::{Euler, EulerOrder, Transform};
