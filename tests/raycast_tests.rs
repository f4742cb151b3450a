use glam::{Mat4, Vec2, Vec3};
use scene_loop::camera::PerspectiveCamera;
use scene_loop::math::{intersect_aabb, Color, Geometry, Ray};
use scene_loop::raycaster::Raycaster;
use scene_loop::scene::{Material, Node, NodeId, SceneGraph};

fn cube_at(scene: &mut SceneGraph, position: Vec3) -> NodeId {
    scene.spawn(Node::mesh(Geometry::cube(1.0), Material::basic(Color::WHITE)).at(position.x, position.y, position.z))
}

#[cfg(test)]
mod raycast_tests {
    use super::*;

    #[test]
    fn test_ray_hits_cube_from_outside() {
        let mut scene = SceneGraph::new();
        let cube = cube_at(&mut scene, Vec3::new(5.0, 0.0, 0.0));

        let hits = Raycaster::new(Ray::new(Vec3::new(0.0, 0.1, 0.2), Vec3::X)).intersect(&scene, &[cube]);

        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 4.5).abs() < 0.001, "Hit distance should be ~4.5, got {}", hits[0].distance);
        assert!(hits[0].point.abs_diff_eq(Vec3::new(4.5, 0.1, 0.2), 1e-4));
    }

    #[test]
    fn test_ray_misses_cube() {
        let mut scene = SceneGraph::new();
        let cube = cube_at(&mut scene, Vec3::new(5.0, 5.0, 5.0));

        let hits = Raycaster::new(Ray::new(Vec3::ZERO, Vec3::X)).intersect(&scene, &[cube]);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_ray_pointing_away_from_cube() {
        let mut scene = SceneGraph::new();
        let cube = cube_at(&mut scene, Vec3::new(5.0, 0.0, 0.0));

        let hits = Raycaster::new(Ray::new(Vec3::ZERO, Vec3::NEG_X)).intersect(&scene, &[cube]);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_hits_sorted_nearest_first() {
        let mut scene = SceneGraph::new();
        let far = cube_at(&mut scene, Vec3::new(0.0, 0.0, -8.0));
        let near = cube_at(&mut scene, Vec3::new(0.0, 0.0, -3.0));

        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::NEG_Z);
        let hits = Raycaster::new(ray).intersect(&scene, &[far, near]);

        let order: Vec<NodeId> = hits.iter().map(|h| h.node).collect();
        assert_eq!(order, vec![near, far]);
    }

    #[test]
    fn test_removed_and_non_mesh_targets_are_skipped() {
        let mut scene = SceneGraph::new();
        let group = scene.spawn(Node::group().at(0.0, 0.0, -3.0));
        let removed = cube_at(&mut scene, Vec3::new(0.0, 0.0, -5.0));
        let kept = cube_at(&mut scene, Vec3::new(0.0, 0.0, -7.0));
        scene.remove(removed).unwrap();

        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::NEG_Z);
        let hits = Raycaster::new(ray).intersect(&scene, &[group, removed, kept]);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, kept);
    }

    #[test]
    fn test_parent_transform_moves_target() {
        let mut scene = SceneGraph::new();
        let group = scene.spawn(Node::group().at(0.0, 10.0, 0.0));
        let cube = scene
            .add(group, Node::mesh(Geometry::cube(1.0), Material::basic(Color::WHITE)).at(0.0, 0.0, -4.0))
            .unwrap();

        let level = Raycaster::new(Ray::new(Vec3::new(0.1, 0.25, 0.0), Vec3::NEG_Z)).intersect(&scene, &[cube]);
        let raised = Raycaster::new(Ray::new(Vec3::new(0.1, 10.25, 0.0), Vec3::NEG_Z)).intersect(&scene, &[cube]);

        assert!(level.is_empty());
        assert_eq!(raised.len(), 1);
    }

    #[test]
    fn test_camera_ray_picks_cube_under_pointer() {
        let mut scene = SceneGraph::new();
        let camera_id = scene.spawn(Node::camera(PerspectiveCamera::new(90.0, 1.0, 0.1, 100.0)).at(0.0, 0.0, 5.0));
        let left = cube_at(&mut scene, Vec3::new(-2.0, 0.0, 0.0));
        let right = cube_at(&mut scene, Vec3::new(2.0, 0.0, 0.0));

        let camera_world = scene.world_matrix(camera_id);
        let projection = scene.camera(camera_id).unwrap().projection_matrix();

        // with a 90 degree fov, x = 2 at depth 5 sits at ndc 0.4
        let caster = Raycaster::from_camera(Vec2::new(0.4, 0.01), &camera_world, &projection);
        let hits = caster.intersect(&scene, &[left, right]);
        assert_eq!(hits.first().map(|h| h.node), Some(right));

        let caster = Raycaster::from_camera(Vec2::new(-0.4, 0.01), &camera_world, &projection);
        let hits = caster.intersect(&scene, &[left, right]);
        assert_eq!(hits.first().map(|h| h.node), Some(left));
    }

    #[test]
    fn test_prefilter_on_transformed_mesh_bounds() {
        let bounds = Geometry::cube(2.0).to_mesh().bounds();
        let world = bounds.transformed(&Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0)));

        let t = intersect_aabb(Vec3::ZERO, Vec3::NEG_Z, world.min, world.max);
        assert!((t - 9.0).abs() < 0.001, "Hit distance should be ~9.0, got {t}");

        let t = intersect_aabb(Vec3::new(0.0, 0.0, -10.0), Vec3::NEG_Z, world.min, world.max);
        assert!((t - 1.0).abs() < 0.001, "Should return exit distance when ray starts inside, got {t}");

        let t = intersect_aabb(Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Z, world.min, world.max);
        assert_eq!(t, -1.0, "Ray parallel to and outside the box should miss");
    }
}
