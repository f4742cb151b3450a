use std::time::Instant;

use log::debug;

use super::clock::Clock;
use super::context::AppContext;
use super::frame::FrameTime;
use super::scheduler::FrameScheduler;
use super::timer::{Accumulator, FpsCounter};
use crate::error::RenderError;
use crate::renderer::Renderer;

pub const DEFAULT_PHYSICS_HZ: f32 = 60.0;
pub const DEFAULT_MAX_PHYSICS_STEPS: u8 = 4;

/// Per-frame loop: clock, motions, physics sub-steps, render, reschedule
#[derive(Debug, Clone)]
pub struct FrameDriver {
    clock: Clock,
    physics: Accumulator,
    fps: FpsCounter,
    frame: u64,
    running: bool,
    paused: bool,
    /// Seconds spent paused, hidden from elapsed time
    paused_for: f32,
}

impl FrameDriver {
    pub fn new(physics_hz: f32, max_physics_steps: u8) -> Self {
        Self {
            clock: Clock::new(),
            physics: Accumulator::new(physics_hz, max_physics_steps),
            fps: FpsCounter::new(1.0),
            frame: 0,
            running: false,
            paused: false,
            paused_for: 0.0,
        }
    }

    /// Reset time to zero and request the first frame
    pub fn start(&mut self, now: Instant, scheduler: &mut impl FrameScheduler) {
        self.clock.reset_at(now);
        self.physics.reset();
        self.frame = 0;
        self.paused_for = 0.0;
        self.running = true;
        scheduler.request_next_frame();
    }

    /// Cancel the loop; the next tick does nothing and schedules nothing
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// While paused, frames still render but time stands still for motions and physics
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Frames ticked since `start`
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    /// Run one frame at `now`. A render error is returned after the next
    /// frame has been requested, so one bad frame does not end the loop.
    pub fn tick_at<R: Renderer>(
        &mut self,
        now: Instant,
        ctx: &mut AppContext<R>,
        scheduler: &mut impl FrameScheduler,
    ) -> Result<Option<FrameTime>, RenderError> {
        if !self.running {
            return Ok(None);
        }

        let (elapsed, wall_delta) = self.clock.tick_at(now);
        let delta = if self.paused {
            self.paused_for += wall_delta;
            0.0
        } else {
            wall_delta
        };
        let time = FrameTime::new(self.frame, elapsed - self.paused_for, delta);

        ctx.stage.poll_assets();
        let motion_ctx = ctx.motion_context(time);
        ctx.stage.update(&motion_ctx);

        for dt in self.physics.tick(delta) {
            ctx.stage.step_physics(dt);
        }
        ctx.stage.sync_physics();

        let rendered = ctx.render();

        self.frame += 1;
        if let Some(fps) = self.fps.tick(wall_delta) {
            debug!("{fps:.0} fps, {:?}", ctx.last_render());
        }
        scheduler.request_next_frame();

        rendered.map(|_| Some(time))
    }

    /// Tick using the current instant
    pub fn tick<R: Renderer>(
        &mut self,
        ctx: &mut AppContext<R>,
        scheduler: &mut impl FrameScheduler,
    ) -> Result<Option<FrameTime>, RenderError> {
        self.tick_at(Instant::now(), ctx, scheduler)
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(DEFAULT_PHYSICS_HZ, DEFAULT_MAX_PHYSICS_STEPS)
    }
}
