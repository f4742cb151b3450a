/// Frame metadata handed to every motion during a driver tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Zero-based tick counter since the driver started
    pub number: u64,
    /// Seconds since the driver started
    pub elapsed: f32,
    /// Seconds since the previous tick
    pub delta: f32,
}

impl FrameTime {
    pub fn new(number: u64, elapsed: f32, delta: f32) -> Self {
        Self { number, elapsed, delta }
    }
}
