/// Default device pixel ratio cap; higher densities cost fill rate for little gain
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Viewport - logical drawing region plus the pixel density it renders at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels
    pub width: u32,
    /// Height in logical pixels
    pub height: u32,
    /// Effective pixel ratio, already capped
    pub pixel_ratio: f32,
    /// Upper bound applied to the device pixel ratio
    pub max_pixel_ratio: f32,
}

impl Viewport {
    /// Create viewport; zero dimensions are raised to 1
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self::with_max_pixel_ratio(width, height, device_pixel_ratio, MAX_PIXEL_RATIO)
    }

    pub fn with_max_pixel_ratio(width: u32, height: u32, device_pixel_ratio: f32, max_pixel_ratio: f32) -> Self {
        let max_pixel_ratio = sanitize_ratio(max_pixel_ratio);
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio: capped_ratio(device_pixel_ratio, max_pixel_ratio),
            max_pixel_ratio,
        }
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Physical size of the backing buffer
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }

    /// Apply a resize notification. Zero sizes (minimized windows) are ignored.
    /// Returns true if any field changed.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }

        let next = Self {
            width,
            height,
            pixel_ratio: capped_ratio(device_pixel_ratio, self.max_pixel_ratio),
            max_pixel_ratio: self.max_pixel_ratio,
        };
        let changed = next != *self;
        *self = next;
        changed
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600, 1.0)
    }
}

fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

fn capped_ratio(device_pixel_ratio: f32, max_pixel_ratio: f32) -> f32 {
    sanitize_ratio(device_pixel_ratio).min(max_pixel_ratio).max(f32::EPSILON)
}
