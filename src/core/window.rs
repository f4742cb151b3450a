use std::sync::Arc;

use log::info;
use winit::window::{Fullscreen, Window};

use super::scheduler::FrameScheduler;

/// Window dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Shared handle to the app window; frames are scheduled through `request_redraw`
#[derive(Debug, Clone)]
pub struct AppWindow {
    inner: Arc<Window>,
}

impl AppWindow {
    pub fn new(window: Arc<Window>) -> Self {
        Self { inner: window }
    }

    pub fn inner(&self) -> &Arc<Window> {
        &self.inner
    }

    /// Inner size converted to logical pixels
    pub fn dimensions(&self) -> WindowDimensions {
        let logical = self.inner.inner_size().to_logical::<u32>(self.scale_factor());
        WindowDimensions::new(logical.width, logical.height)
    }

    pub fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    /// Enter borderless fullscreen, or leave it if already there
    pub fn toggle_fullscreen(&self) {
        let next = next_fullscreen(self.inner.fullscreen());
        info!("fullscreen {}", if next.is_some() { "on" } else { "off" });
        self.inner.set_fullscreen(next);
    }
}

impl FrameScheduler for AppWindow {
    fn request_next_frame(&mut self) {
        self.inner.request_redraw();
    }
}

fn next_fullscreen(current: Option<Fullscreen>) -> Option<Fullscreen> {
    match current {
        Some(_) => None,
        None => Some(Fullscreen::Borderless(None)),
    }
}
