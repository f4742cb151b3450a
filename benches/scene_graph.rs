use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use scene_loop::animation::{Motion, MotionContext};
use scene_loop::camera::PerspectiveCamera;
use scene_loop::core::FrameTime;
use scene_loop::math::{intersect_aabb, Color, Geometry};
use scene_loop::raycaster::Raycaster;
use scene_loop::renderer::{Renderer, SoftwareRenderer};
use scene_loop::scene::{Material, Node, NodeId, SceneGraph};

/// Grid of cubes in front of a camera at z = 10
fn cube_field(side: i32) -> (SceneGraph, NodeId, Vec<NodeId>) {
    let mut scene = SceneGraph::new();
    let camera = scene.spawn(Node::camera(PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0)).at(0.0, 0.0, 10.0));
    let group = scene.spawn(Node::group());
    let mut cubes = Vec::new();
    for x in -side..side {
        for y in -side..side {
            let cube = Node::mesh(Geometry::cube(0.4), Material::basic(Color::WHITE)).at(x as f32, y as f32, 0.0);
            if let Ok(id) = scene.add(group, cube) {
                cubes.push(id);
            }
        }
    }
    (scene, camera, cubes)
}

/// Benchmark: world matrix of a node at the bottom of a deep chain
fn bench_world_matrix_deep_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_matrix_depth");
    for depth in [4usize, 32, 256] {
        let mut scene = SceneGraph::new();
        let mut leaf = scene.root();
        for _ in 0..depth {
            if let Ok(id) = scene.add(leaf, Node::group().at(0.1, 0.0, 0.0)) {
                leaf = id;
            }
        }
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(scene.world_matrix(black_box(leaf))))
        });
    }
    group.finish();
}

/// Benchmark: one motion pass over many orbiting nodes
fn bench_motion_update(c: &mut Criterion) {
    let (mut scene, camera, cubes) = cube_field(16);
    let mut motions: Vec<Motion> = cubes.iter().map(|&id| Motion::orbit(id, 2.0, 0.5)).collect();
    let ctx = MotionContext { time: FrameTime::new(0, 1.25, 0.016), pointer: Vec2::ZERO, camera };

    c.bench_function("motion_update_1024_orbits", |b| {
        b.iter(|| {
            for motion in &mut motions {
                motion.apply(&mut scene, black_box(&ctx));
            }
        })
    });
}

/// Benchmark: pointer raycast against every cube
fn bench_raycast(c: &mut Criterion) {
    let (scene, camera, cubes) = cube_field(8);
    let camera_world = scene.world_matrix(camera);
    let projection = scene.camera(camera).map(|c| c.projection_matrix()).unwrap_or_default();

    c.bench_function("raycast_256_cubes", |b| {
        b.iter(|| {
            let caster = Raycaster::from_camera(black_box(Vec2::new(0.05, 0.02)), &camera_world, &projection);
            black_box(caster.intersect(&scene, &cubes))
        })
    });
}

/// Benchmark: AABB prefilter alone
fn bench_aabb_prefilter(c: &mut Criterion) {
    let min = Vec3::new(-1.0, -1.0, -6.0);
    let max = Vec3::new(1.0, 1.0, -4.0);

    c.bench_function("aabb_prefilter_hit", |b| {
        b.iter(|| black_box(intersect_aabb(black_box(Vec3::ZERO), black_box(Vec3::NEG_Z), min, max)))
    });
}

/// Benchmark: full software render at a few sizes
fn bench_software_render(c: &mut Criterion) {
    let (scene, camera, _) = cube_field(8);
    let mut group = c.benchmark_group("software_render");
    group.sample_size(20);
    for (width, height) in [(320u32, 240u32), (800, 600)] {
        let mut renderer = SoftwareRenderer::new(width, height);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{width}x{height}")), &(), |b, _| {
            b.iter(|| black_box(renderer.render(&scene, camera)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_world_matrix_deep_chain,
    bench_motion_update,
    bench_raycast,
    bench_aabb_prefilter,
    bench_software_render,
);
criterion_main!(benches);
