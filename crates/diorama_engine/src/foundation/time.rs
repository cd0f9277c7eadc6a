//! Time management utilities

use std::time::{Duration, Instant};

/// High-precision timer for frame timing
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            frame_count: 0,
        }
    }
    
    /// Count one delivered frame
    pub fn update(&mut self) {
        self.frame_count += 1;
    }
    
    /// Time since the timer was created
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
    
    /// Time since the timer was created, in milliseconds
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
    
    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
    
    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        let total = self.elapsed().as_secs_f32();
        if total > 0.0 {
            self.frame_count as f32 / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_counts_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.elapsed_millis() >= 0.0);
    }
}
