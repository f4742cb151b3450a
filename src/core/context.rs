use log::{debug, warn};

use super::frame::FrameTime;
use super::input::{InputAction, InputEvent, Key, PointerState};
use super::viewport::Viewport;
use crate::animation::MotionContext;
use crate::error::RenderError;
use crate::renderer::{RenderInfo, Renderer};
use crate::stage::Stage;

/// Zoom factor change per scroll line
const ZOOM_PER_LINE: f32 = 0.1;

/// Everything a frame needs, passed explicitly to the driver
#[derive(Debug)]
pub struct AppContext<R: Renderer> {
    pub viewport: Viewport,
    pub stage: Stage,
    pub renderer: R,
    pub pointer: PointerState,
    last_render: RenderInfo,
}

impl<R: Renderer> AppContext<R> {
    /// Wire stage and renderer to `viewport`, applying it once
    pub fn new(stage: Stage, renderer: R, viewport: Viewport) -> Self {
        let mut ctx = Self {
            pointer: PointerState::new(viewport.width, viewport.height),
            viewport,
            stage,
            renderer,
            last_render: RenderInfo::default(),
        };
        ctx.apply_viewport();
        ctx
    }

    /// Resize handler. Zero sizes are ignored; repeating a call is a no-op.
    /// Returns true if the viewport changed.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) -> bool {
        if width == 0 || height == 0 {
            debug!("ignoring resize to {width}x{height}");
            return false;
        }
        let changed = self.viewport.resize(width, height, device_pixel_ratio);
        self.apply_viewport();
        if changed {
            debug!(
                "viewport {}x{} @{} (aspect {:.3})",
                self.viewport.width,
                self.viewport.height,
                self.viewport.pixel_ratio,
                self.viewport.aspect()
            );
        }
        changed
    }

    fn apply_viewport(&mut self) {
        let aspect = self.viewport.aspect();
        match self.stage.camera_mut() {
            Ok(camera) => camera.set_aspect(aspect),
            Err(err) => warn!("resize without camera: {err}"),
        }
        self.renderer.set_size(self.viewport.width, self.viewport.height);
        self.renderer.set_pixel_ratio(self.viewport.pixel_ratio);
        self.pointer.set_size(self.viewport.width, self.viewport.height);
    }

    pub fn motion_context(&self, time: FrameTime) -> MotionContext {
        MotionContext { time, pointer: self.pointer.normalized(), camera: self.stage.camera }
    }

    pub fn render(&mut self) -> Result<RenderInfo, RenderError> {
        let info = self.renderer.render(&self.stage.scene, self.stage.camera)?;
        self.last_render = info;
        Ok(info)
    }

    /// Statistics from the most recent successful render
    pub fn last_render(&self) -> RenderInfo {
        self.last_render
    }

    /// Apply an input event to runtime state; returns what the host should do
    pub fn handle_input(&mut self, event: InputEvent) -> InputAction {
        match event {
            InputEvent::Resize { width, height, scale_factor } => {
                self.resize(width, height, scale_factor);
                InputAction::None
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer.move_to(x, y);
                InputAction::None
            }
            InputEvent::Scroll { delta_y } => {
                match self.stage.camera_mut() {
                    Ok(camera) => {
                        let zoom = camera.zoom * (1.0 - delta_y * ZOOM_PER_LINE);
                        camera.set_zoom(zoom);
                    }
                    Err(err) => warn!("scroll without camera: {err}"),
                }
                InputAction::None
            }
            InputEvent::DoubleClick => InputAction::ToggleFullscreen,
            InputEvent::Key { key, pressed: true } => match key {
                Key::Escape => InputAction::Exit,
                Key::H => InputAction::TogglePanel,
                Key::Space => InputAction::TogglePause,
            },
            InputEvent::Key { pressed: false, .. } | InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. } => {
                InputAction::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{PerspectiveCamera, MAX_ZOOM, MIN_ZOOM};
    use crate::renderer::SoftwareRenderer;
    use crate::scene::{Node, SceneGraph};
    use approx::assert_relative_eq;

    fn context() -> AppContext<SoftwareRenderer> {
        let mut scene = SceneGraph::new();
        let camera = scene.spawn(Node::camera(PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0)));
        let stage = Stage::new(scene, camera).unwrap();
        AppContext::new(stage, SoftwareRenderer::new(1, 1), Viewport::new(800, 600, 1.0))
    }

    #[test]
    fn new_applies_viewport() {
        let ctx = context();
        assert_relative_eq!(ctx.stage.camera().unwrap().aspect, 800.0 / 600.0);
        assert_eq!(ctx.renderer.size(), (800, 600));
    }

    #[test]
    fn resize_updates_camera_and_renderer() {
        let mut ctx = context();
        assert!(ctx.resize(1024, 512, 3.0));
        assert_relative_eq!(ctx.stage.camera().unwrap().aspect, 2.0);
        assert_eq!(ctx.renderer.size(), (1024, 512));
        assert_eq!(ctx.renderer.pixel_ratio(), 2.0);
        assert_eq!(ctx.renderer.drawing_buffer_size(), (2048, 1024));
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut ctx = context();
        assert!(!ctx.resize(0, 0, 1.0));
        assert_eq!(ctx.renderer.size(), (800, 600));
    }

    #[test]
    fn scroll_zoom_is_clamped() {
        let mut ctx = context();
        ctx.handle_input(InputEvent::Scroll { delta_y: -2.0 });
        assert_relative_eq!(ctx.stage.camera().unwrap().zoom, 1.2);

        for _ in 0..100 {
            ctx.handle_input(InputEvent::Scroll { delta_y: -5.0 });
        }
        assert_eq!(ctx.stage.camera().unwrap().zoom, MAX_ZOOM);

        for _ in 0..100 {
            ctx.handle_input(InputEvent::Scroll { delta_y: 5.0 });
        }
        assert_eq!(ctx.stage.camera().unwrap().zoom, MIN_ZOOM);
    }

    #[test]
    fn keys_map_to_actions() {
        let mut ctx = context();
        let press = |key| InputEvent::Key { key, pressed: true };
        assert_eq!(ctx.handle_input(press(Key::Escape)), InputAction::Exit);
        assert_eq!(ctx.handle_input(press(Key::H)), InputAction::TogglePanel);
        assert_eq!(ctx.handle_input(press(Key::Space)), InputAction::TogglePause);
        assert_eq!(ctx.handle_input(InputEvent::Key { key: Key::Space, pressed: false }), InputAction::None);
        assert_eq!(ctx.handle_input(InputEvent::DoubleClick), InputAction::ToggleFullscreen);
    }

    #[test]
    fn pointer_move_feeds_motion_context() {
        let mut ctx = context();
        ctx.handle_input(InputEvent::PointerMove { x: 800.0, y: 0.0 });
        let motion = ctx.motion_context(FrameTime::new(0, 0.0, 0.0));
        assert_eq!(motion.pointer, glam::Vec2::new(0.5, 0.5));
    }
}
