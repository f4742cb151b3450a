/// Source of presentation ticks. The driver asks for exactly one more frame
/// at the end of every tick; not asking is how a loop stops.
pub trait FrameScheduler {
    fn request_next_frame(&mut self);
}

/// Headless scheduler - records requests so tests can pump frames by hand
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, if any
    pub fn take_request(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total requests ever made
    pub fn request_count(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_next_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}
