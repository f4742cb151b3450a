use std::time::{Duration, Instant};

use glam::Vec2;

/// Two presses closer than this count as a double click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Keys the runtime reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    H,
    Space,
}

/// Platform-neutral input, fed to [`AppContext::handle_input`](super::context::AppContext::handle_input)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position in logical pixels from the top-left corner
    PointerMove { x: f32, y: f32 },
    PointerDown { button: PointerButton },
    PointerUp { button: PointerButton },
    DoubleClick,
    /// Positive is scrolling toward the user
    Scroll { delta_y: f32 },
    Resize { width: u32, height: u32, scale_factor: f32 },
    Key { key: Key, pressed: bool },
}

/// What the host should do in response to an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputAction {
    #[default]
    None,
    ToggleFullscreen,
    TogglePanel,
    TogglePause,
    Exit,
}

/// Last known pointer position relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Logical pixels from the top-left corner
    pub position: Vec2,
    width: f32,
    height: f32,
}

impl PointerState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec2::new(width as f32 * 0.5, height as f32 * 0.5),
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }

    /// Centered coordinates in [-0.5, 0.5], y up
    pub fn normalized(&self) -> Vec2 {
        Vec2::new(
            self.position.x / self.width - 0.5,
            -(self.position.y / self.height - 0.5),
        )
    }

    /// Normalized device coordinates in [-1, 1], y up
    pub fn ndc(&self) -> Vec2 {
        self.normalized() * 2.0
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Synthesizes double clicks from press timestamps
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickTracker {
    last_press: Option<Instant>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press; true if it completes a double click.
    /// A completed double click starts a fresh sequence.
    pub fn press(&mut self, now: Instant) -> bool {
        match self.last_press {
            Some(previous) if now.saturating_duration_since(previous) <= DOUBLE_CLICK_WINDOW => {
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pointer_center_is_origin() {
        let pointer = PointerState::new(800, 600);
        assert_eq!(pointer.normalized(), Vec2::ZERO);
        assert_eq!(pointer.ndc(), Vec2::ZERO);
    }

    #[test]
    fn pointer_corners_flip_y() {
        let mut pointer = PointerState::new(800, 600);
        pointer.move_to(0.0, 0.0);
        assert_eq!(pointer.normalized(), Vec2::new(-0.5, 0.5));
        assert_eq!(pointer.ndc(), Vec2::new(-1.0, 1.0));

        pointer.move_to(800.0, 600.0);
        assert_eq!(pointer.ndc(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn pointer_follows_resize() {
        let mut pointer = PointerState::new(800, 600);
        pointer.move_to(400.0, 300.0);
        pointer.set_size(1600, 600);
        assert_relative_eq!(pointer.normalized().x, -0.25);
    }

    #[test]
    fn double_click_within_window() {
        let start = Instant::now();
        let mut tracker = ClickTracker::new();
        assert!(!tracker.press(start));
        assert!(tracker.press(start + Duration::from_millis(200)));
        // third press begins a new sequence
        assert!(!tracker.press(start + Duration::from_millis(250)));
    }

    #[test]
    fn slow_clicks_are_single() {
        let start = Instant::now();
        let mut tracker = ClickTracker::new();
        assert!(!tracker.press(start));
        assert!(!tracker.press(start + Duration::from_millis(400)));
        assert!(tracker.press(start + Duration::from_millis(500)));
    }
}
