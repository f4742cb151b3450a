use std::sync::Arc;

use crate::camera::PerspectiveCamera;
use crate::math::{Color, Geometry, MeshData, Transform, AABB};

/// Surface description for a mesh
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Unlit flat color
    Basic { color: Color, wireframe: bool },
    /// Diffuse-lit color; roughness and metalness are carried for tooling
    Standard { color: Color, wireframe: bool, roughness: f32, metalness: f32 },
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Material::Basic { color, wireframe: false }
    }

    pub fn standard(color: Color) -> Self {
        Material::Standard { color, wireframe: false, roughness: 1.0, metalness: 0.0 }
    }

    pub fn color(&self) -> Color {
        match self {
            Material::Basic { color, .. } | Material::Standard { color, .. } => *color,
        }
    }

    pub fn set_color(&mut self, value: Color) {
        match self {
            Material::Basic { color, .. } | Material::Standard { color, .. } => *color = value,
        }
    }

    pub fn wireframe(&self) -> bool {
        match self {
            Material::Basic { wireframe, .. } | Material::Standard { wireframe, .. } => *wireframe,
        }
    }

    pub fn set_wireframe(&mut self, value: bool) {
        match self {
            Material::Basic { wireframe, .. } | Material::Standard { wireframe, .. } => *wireframe = value,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Standard { .. })
    }
}

/// Geometry plus material; triangles and local bounds are built once per geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    geometry: Geometry,
    data: Arc<MeshData>,
    bounds: AABB,
    pub material: Material,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        let data = geometry.to_mesh();
        let bounds = data.bounds();
        Self { geometry, data, bounds, material }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn data(&self) -> &MeshData {
        &self.data
    }

    /// Bounds in the mesh's local space
    pub fn bounds(&self) -> AABB {
        self.bounds
    }
}

/// Light sources; directional lights shine from their position toward the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { color: Color, intensity: f32 },
    Directional { color: Color, intensity: f32 },
    Point { color: Color, intensity: f32, distance: f32 },
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient { intensity, .. }
            | Light::Directional { intensity, .. }
            | Light::Point { intensity, .. } => *intensity,
        }
    }

    pub fn set_intensity(&mut self, value: f32) {
        match self {
            Light::Ambient { intensity, .. }
            | Light::Directional { intensity, .. }
            | Light::Point { intensity, .. } => *intensity = value,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Ambient { color, .. } | Light::Directional { color, .. } | Light::Point { color, .. } => *color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Camera(PerspectiveCamera),
    Mesh(Mesh),
    Light(Light),
    /// Red/green/blue lines along +X/+Y/+Z
    AxesHelper { size: f32 },
}

/// Payload stored in the scene graph; links live in the graph itself
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: Option<String>,
    pub transform: Transform,
    pub kind: NodeKind,
    pub visible: bool,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: None,
            transform: Transform::default(),
            kind,
            visible: true,
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    pub fn camera(camera: PerspectiveCamera) -> Self {
        Self::new(NodeKind::Camera(camera))
    }

    pub fn mesh(geometry: Geometry, material: Material) -> Self {
        Self::new(NodeKind::Mesh(Mesh::new(geometry, material)))
    }

    pub fn light(light: Light) -> Self {
        Self::new(NodeKind::Light(light))
    }

    pub fn axes_helper(size: f32) -> Self {
        Self::new(NodeKind::AxesHelper { size })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.set_position(x, y, z);
        self
    }

    pub fn as_camera(&self) -> Option<&PerspectiveCamera> {
        match &self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn as_camera_mut(&mut self) -> Option<&mut PerspectiveCamera> {
        match &mut self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_light_mut(&mut self) -> Option<&mut Light> {
        match &mut self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn mesh_builds_triangles_once() {
        let mesh = Mesh::new(Geometry::sphere(1.0), Material::basic(Color::WHITE));
        let first = mesh.data() as *const MeshData;
        let second = mesh.data() as *const MeshData;
        assert_eq!(first, second);
        assert_eq!(mesh.bounds(), mesh.data().bounds());
        assert_eq!(mesh.geometry(), &Geometry::sphere(1.0));
    }

    #[test]
    fn custom_mesh_shares_loaded_buffers() {
        let loaded = Arc::new(MeshData::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]));
        let mesh = Mesh::new(Geometry::Custom(loaded.clone()), Material::basic(Color::WHITE));
        assert!(std::ptr::eq(mesh.data(), loaded.as_ref()));
        assert_eq!(mesh.data().positions.as_ptr(), loaded.positions.as_ptr());
    }
}
