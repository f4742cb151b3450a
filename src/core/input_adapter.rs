use std::time::Instant;

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::input::{ClickTracker, InputEvent, Key, PointerButton};

/// Pixels per scroll "line" for touchpads reporting pixel deltas
const PIXELS_PER_LINE: f32 = 100.0;

/// Adapter that bridges winit window events to [`InputEvent`]s.
/// Positions and sizes are converted to logical pixels.
#[derive(Debug, Clone)]
pub struct WinitInput {
    scale_factor: f64,
    clicks: ClickTracker,
}

impl WinitInput {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor: if scale_factor > 0.0 { scale_factor } else { 1.0 },
            clicks: ClickTracker::new(),
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Translate one window event. A primary press may also complete a double click.
    pub fn map(&mut self, event: &WindowEvent, now: Instant) -> Vec<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor);
                vec![InputEvent::PointerMove { x: logical.x, y: logical.y }]
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = Self::map_button(*button) else {
                    return Vec::new();
                };
                match state {
                    ElementState::Pressed => {
                        let mut events = vec![InputEvent::PointerDown { button }];
                        if button == PointerButton::Primary && self.clicks.press(now) {
                            events.push(InputEvent::DoubleClick);
                        }
                        events
                    }
                    ElementState::Released => vec![InputEvent::PointerUp { button }],
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y,
                    MouseScrollDelta::PixelDelta(position) => -(position.y as f32) / PIXELS_PER_LINE,
                };
                vec![InputEvent::Scroll { delta_y }]
            }
            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<u32>(self.scale_factor);
                vec![InputEvent::Resize {
                    width: logical.width,
                    height: logical.height,
                    scale_factor: self.scale_factor as f32,
                }]
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                // a Resized event follows with the new physical size
                Vec::new()
            }
            WindowEvent::KeyboardInput { event, .. } => {
                Self::map_key_event(event.physical_key, event.state, event.repeat).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Held keys auto-repeat; only the first press toggles anything
    fn map_key_event(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = key else { return None };
        if repeat {
            return None;
        }
        Self::map_key(code).map(|key| InputEvent::Key { key, pressed: state == ElementState::Pressed })
    }

    fn map_key(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Escape => Some(Key::Escape),
            KeyCode::KeyH => Some(Key::H),
            KeyCode::Space => Some(Key::Space),
            _ => None,
        }
    }

    fn map_button(button: MouseButton) -> Option<PointerButton> {
        match button {
            MouseButton::Left => Some(PointerButton::Primary),
            MouseButton::Right => Some(PointerButton::Secondary),
            MouseButton::Middle => Some(PointerButton::Middle),
            _ => None,
        }
    }
}

impl Default for WinitInput {
    fn default() -> Self {
        Self::new(1.0)
    }
}
