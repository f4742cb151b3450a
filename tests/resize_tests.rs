use scene_loop::camera::PerspectiveCamera;
use scene_loop::core::{AppContext, InputEvent, Viewport};
use scene_loop::renderer::{Renderer, SoftwareRenderer};
use scene_loop::scene::{Node, SceneGraph};
use scene_loop::Stage;

fn context(width: u32, height: u32, ratio: f32) -> AppContext<SoftwareRenderer> {
    let mut scene = SceneGraph::new();
    let camera = scene.spawn(Node::camera(PerspectiveCamera::new(100.0, 1.0, 0.1, 100.0)));
    let stage = Stage::new(scene, camera).unwrap();
    AppContext::new(stage, SoftwareRenderer::new(1, 1), Viewport::new(width, height, ratio))
}

#[cfg(test)]
mod resize_tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_800x600_to_1024x768_keeps_aspect() {
        let mut ctx = context(800, 600, 1.0);
        assert_relative_eq!(ctx.viewport.aspect(), 1.333, epsilon = 1e-3);

        ctx.resize(1024, 768, 1.0);

        assert_eq!((ctx.viewport.width, ctx.viewport.height), (1024, 768));
        assert_relative_eq!(ctx.viewport.aspect(), 1.333, epsilon = 1e-3);
        assert_relative_eq!(ctx.stage.camera().unwrap().aspect, 1024.0 / 768.0);
        assert_eq!(ctx.renderer.size(), (1024, 768));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut once = context(800, 600, 1.0);
        once.resize(1280, 720, 1.5);

        let mut twice = context(800, 600, 1.0);
        assert!(twice.resize(1280, 720, 1.5));
        assert!(!twice.resize(1280, 720, 1.5));

        let camera_once = once.stage.camera().unwrap();
        let camera_twice = twice.stage.camera().unwrap();
        assert_eq!(camera_once.aspect, camera_twice.aspect);
        assert_eq!(camera_once.projection_matrix(), camera_twice.projection_matrix());
        assert_eq!(once.renderer.size(), twice.renderer.size());
        assert_eq!(once.renderer.pixel_ratio(), twice.renderer.pixel_ratio());
        assert_eq!(once.renderer.canvas().dimensions(), (1920, 1080));
        assert_eq!(once.viewport, twice.viewport);
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let mut ctx = context(100, 100, 1.0);
        ctx.resize(100, 100, 3.0);
        assert_eq!(ctx.renderer.pixel_ratio(), 2.0);
        assert_eq!(ctx.renderer.drawing_buffer_size(), (200, 200));
    }

    #[test]
    fn test_minimized_window_is_ignored() {
        let mut ctx = context(640, 480, 1.0);
        let projection = ctx.stage.camera().unwrap().projection_matrix();

        ctx.handle_input(InputEvent::Resize { width: 0, height: 0, scale_factor: 1.0 });

        assert_eq!(ctx.viewport, Viewport::new(640, 480, 1.0));
        assert_eq!(ctx.stage.camera().unwrap().projection_matrix(), projection);
    }
}
