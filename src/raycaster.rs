use glam::{Mat4, Vec2, Vec3};

use crate::math::{intersect_aabb, Ray};
use crate::scene::{NodeId, SceneGraph};

/// Intersection of a pick ray with a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// Picks meshes under a screen position
#[derive(Debug, Clone, Copy)]
pub struct Raycaster {
    pub ray: Ray,
}

impl Raycaster {
    pub fn new(ray: Ray) -> Self {
        Self { ray }
    }

    /// Ray through `ndc` (x right, y up, both in [-1, 1])
    pub fn from_camera(ndc: Vec2, camera_world: &Mat4, projection: &Mat4) -> Self {
        Self::new(Ray::from_camera(ndc, camera_world, projection))
    }

    /// Hits against the meshes in `targets`, nearest first.
    /// Back faces are ignored; non-mesh and missing nodes are skipped.
    pub fn intersect(&self, scene: &SceneGraph, targets: &[NodeId]) -> Vec<Hit> {
        let mut hits: Vec<Hit> = targets
            .iter()
            .filter_map(|&id| self.intersect_node(scene, id))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn intersect_node(&self, scene: &SceneGraph, id: NodeId) -> Option<Hit> {
        let mesh = scene.get(id)?.as_mesh()?;
        let data = mesh.data();
        let world = scene.world_matrix(id);

        let bounds = mesh.bounds().transformed(&world);
        if intersect_aabb(self.ray.origin, self.ray.direction, bounds.min, bounds.max) < 0.0 {
            return None;
        }

        data.triangles()
            .filter_map(|[a, b, c]| {
                self.ray.intersect_triangle(
                    world.transform_point3(a),
                    world.transform_point3(b),
                    world.transform_point3(c),
                    true,
                )
            })
            .min_by(f32::total_cmp)
            .map(|distance| Hit { node: id, distance, point: self.ray.at(distance) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Color, Geometry};
    use crate::scene::{Material, Node};

    fn cube_at(scene: &mut SceneGraph, z: f32) -> NodeId {
        scene.spawn(Node::mesh(Geometry::cube(1.0), Material::basic(Color::WHITE)).at(0.0, 0.0, z))
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let mut scene = SceneGraph::new();
        let far = cube_at(&mut scene, -5.0);
        let near = cube_at(&mut scene, 0.0);

        let caster = Raycaster::new(Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z));
        let hits = caster.intersect(&scene, &[far, near]);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, near);
        assert!((hits[0].distance - 4.5).abs() < 1e-4);
        assert!((hits[0].point.z - 0.5).abs() < 1e-4);
        assert_eq!(hits[1].node, far);
    }

    #[test]
    fn miss_returns_empty() {
        let mut scene = SceneGraph::new();
        let cube = cube_at(&mut scene, 0.0);
        let caster = Raycaster::new(Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z));
        assert!(caster.intersect(&scene, &[cube]).is_empty());
    }

    #[test]
    fn non_mesh_targets_are_skipped() {
        let mut scene = SceneGraph::new();
        let group = scene.spawn(Node::group());
        let caster = Raycaster::new(Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z));
        assert!(caster.intersect(&scene, &[group]).is_empty());
    }

    #[test]
    fn parent_transform_moves_hit() {
        let mut scene = SceneGraph::new();
        let group = scene.spawn(Node::group().at(2.0, 0.0, 0.0));
        let cube = scene
            .add(group, Node::mesh(Geometry::cube(1.0), Material::basic(Color::WHITE)))
            .unwrap();

        let centered = Raycaster::new(Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z));
        assert!(centered.intersect(&scene, &[cube]).is_empty());

        let offset = Raycaster::new(Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::NEG_Z));
        assert_eq!(offset.intersect(&scene, &[cube]).len(), 1);
    }
}
