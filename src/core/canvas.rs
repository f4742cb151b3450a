use glam::Vec3;

pub type Rgba = [u8; 4];

/// CPU framebuffer - RGBA8 color plus a depth buffer.
/// Screen coordinates put the origin at the top-left; depth is NDC z in [-1, 1],
/// smaller is closer.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixels: Vec<Rgba>,
    depth: Vec<f32>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create new canvas with dimensions, cleared to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let count = (width as usize) * (height as usize);
        Self {
            pixels: vec![[0; 4]; count],
            depth: vec![f32::INFINITY; count],
            width,
            height,
        }
    }

    /// Reallocate for a new size; contents are discarded
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    /// Fill color and reset depth
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
        self.depth.fill(f32::INFINITY);
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Tightly packed RGBA bytes, ready for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    /// Set single pixel without depth testing
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x as i64, y as i64) {
            self.pixels[i] = color;
        }
    }

    /// Write a fragment if it is nearer than what is stored
    fn plot(&mut self, x: i64, y: i64, z: f32, color: Rgba) -> bool {
        match self.index(x, y) {
            Some(i) if z < self.depth[i] => {
                self.depth[i] = z;
                self.pixels[i] = color;
                true
            }
            _ => false,
        }
    }

    /// Depth-tested line using Bresenham's algorithm; z is interpolated linearly.
    /// The segment is clipped to the canvas first, so the walk never leaves it.
    pub fn draw_line(&mut self, from: Vec3, to: Vec3, color: Rgba) -> usize {
        let Some((from, to)) = self.clip_line(from, to) else {
            return 0;
        };
        let (mut x, mut y) = (from.x.round() as i64, from.y.round() as i64);
        let (x2, y2) = (to.x.round() as i64, to.y.round() as i64);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        let steps = dx.max(-dy).max(1) as f32;
        let mut step = 0.0;
        let mut written = 0;

        for _ in 0..=(dx - dy) {
            let z = from.z + (to.z - from.z) * (step / steps);
            // lines win depth ties against the faces they outline
            if self.plot(x, y, z - 1e-4, color) {
                written += 1;
            }

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1.0;
        }
        written
    }

    /// Liang-Barsky clip of a screen-space segment against the pixel grid
    fn clip_line(&self, from: Vec3, to: Vec3) -> Option<(Vec3, Vec3)> {
        if !from.is_finite() || !to.is_finite() {
            return None;
        }
        let max_x = self.width as f32 - 1.0;
        let max_y = self.height as f32 - 1.0;
        let d = to - from;
        let (mut t0, mut t1) = (0.0_f32, 1.0_f32);

        for (p, q) in [(-d.x, from.x), (d.x, max_x - from.x), (-d.y, from.y), (d.y, max_y - from.y)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        Some((from + d * t0, from + d * t1))
    }

    /// Depth-tested solid triangle; returns covered fragment count
    pub fn fill_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Rgba) -> usize {
        let area = edge(a, b, c);
        if area.abs() < f32::EPSILON {
            return 0;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as i64;
        let max_x = a.x.max(b.x).max(c.x).ceil().min(self.width as f32 - 1.0) as i64;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as i64;
        let max_y = a.y.max(b.y).max(c.y).ceil().min(self.height as f32 - 1.0) as i64;

        let mut written = 0;
        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let p = Vec3::new(px as f32 + 0.5, py as f32 + 0.5, 0.0);
                let w0 = edge(b, c, p) / area;
                let w1 = edge(c, a, p) / area;
                let w2 = edge(a, b, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let z = w0 * a.z + w1 * b.z + w2 * c.z;
                if self.plot(px, py, z, color) {
                    written += 1;
                }
            }
        }
        written
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

/// Twice the signed area of (a, b, p) in screen space
fn edge(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
