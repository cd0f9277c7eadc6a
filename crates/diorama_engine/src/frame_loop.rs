//! # Frame Loop
//!
//! One state, running: every tick renders the current scene from the
//! current camera and then asks the scheduler for the next tick. There is
//! no fixed timestep and no frame skipping.

use std::time::{Duration, Instant};

use crate::foundation::time::Timer;
use crate::render::{BackendResult, FrameStats, PerspectiveCamera, RenderBackend};
use crate::scene::Scene;

/// Source of frame callbacks, like a display's refresh signal
pub trait FrameScheduler {
    /// Ask for one more frame
    fn request_frame(&mut self);
    
    /// Wait for the next requested frame and return its timestamp in
    /// milliseconds; `None` when no frame is coming
    fn next_frame(&mut self) -> Option<f64>;
}

/// Paces frames at a fixed refresh rate
#[derive(Debug)]
pub struct VsyncScheduler {
    interval: Duration,
    timer: Timer,
    deadline: Instant,
    requested: bool,
    max_frames: Option<u64>,
}

impl VsyncScheduler {
    /// Scheduler ticking at `refresh_hz`
    pub fn new(refresh_hz: f64) -> Self {
        let interval = Duration::from_secs_f64(1.0 / refresh_hz.max(1.0));
        Self {
            interval,
            timer: Timer::new(),
            deadline: Instant::now(),
            requested: false,
            max_frames: None,
        }
    }
    
    /// Stop delivering frames after `max_frames`
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }
    
    /// Frames delivered so far
    pub fn frames_delivered(&self) -> u64 {
        self.timer.frame_count()
    }
    
    /// Average delivered frame rate
    pub fn average_fps(&self) -> f32 {
        self.timer.average_fps()
    }
}

impl FrameScheduler for VsyncScheduler {
    fn request_frame(&mut self) {
        self.requested = true;
    }
    
    fn next_frame(&mut self) -> Option<f64> {
        if !self.requested || self.max_frames.is_some_and(|max| self.timer.frame_count() >= max) {
            return None;
        }
        
        let now = Instant::now();
        if self.deadline > now {
            std::thread::sleep(self.deadline - now);
        }
        self.deadline = self.deadline.max(now) + self.interval;
        self.requested = false;
        self.timer.update();
        Some(self.timer.elapsed_millis())
    }
}

/// Render-then-reschedule driver
#[derive(Debug, Default)]
pub struct FrameLoop {
    frames: u64,
    last_time: Option<f64>,
}

impl FrameLoop {
    /// Create a loop that has not ticked yet
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Render one frame and request the next
    pub fn tick(
        &mut self,
        time: f64,
        backend: &mut dyn RenderBackend,
        scene: &Scene,
        camera: &PerspectiveCamera,
        scheduler: &mut dyn FrameScheduler,
    ) -> BackendResult<FrameStats> {
        let stats = backend.render(scene, camera)?;
        self.frames += 1;
        self.last_time = Some(time);
        scheduler.request_frame();
        Ok(stats)
    }
    
    /// Ticks completed
    pub fn frames(&self) -> u64 {
        self.frames
    }
    
    /// Timestamp of the most recent tick in milliseconds
    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }
}
