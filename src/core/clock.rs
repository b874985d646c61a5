//=========================================================================
// Clock Service
//=========================================================================
//
// Frame timing: delta time since the previous frame and a measured FPS.
//
// Architecture:
//   clock layer → tick(now) → delta + fps window → queried by states
//
// FPS is averaged over roughly one second so the value is readable.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use log::debug;

//=== Constants ===========================================================

const FPS_WINDOW: Duration = Duration::from_secs(1);

//=== ClockService ========================================================

/// Per-frame timing service.
#[derive(Debug)]
pub struct ClockService {
    last_tick: Instant,
    delta: Duration,
    frame_count: u64,

    //--- FPS Window -------------------------------------------------------
    window_start: Instant,
    window_frames: u32,
    fps: f32,
}

impl ClockService {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock whose first delta is measured from `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_tick: start,
            delta: Duration::ZERO,
            frame_count: 0,
            window_start: start,
            window_frames: 0,
            fps: 0.0,
        }
    }

    //--- Update -----------------------------------------------------------

    /// Advances the clock to now.
    pub fn update(&mut self) {
        self.tick(Instant::now());
    }

    /// Advances the clock to `now`.
    ///
    /// A `now` earlier than the previous tick yields a zero delta.
    pub fn tick(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.frame_count += 1;
        self.window_frames += 1;

        let window = now.saturating_duration_since(self.window_start);
        if window >= FPS_WINDOW {
            self.fps = self.window_frames as f32 / window.as_secs_f32();
            debug!(target: "clock", "FPS: {:.1}", self.fps);
            self.window_start = now;
            self.window_frames = 0;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Time between the two most recent ticks.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// [`delta`](Self::delta) in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Frames per second measured over the last complete window.
    ///
    /// Zero until the first window completes.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total ticks since creation.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for ClockService {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_time_since_previous_tick() {
        let start = Instant::now();
        let mut clock = ClockService::starting_at(start);

        clock.tick(start + Duration::from_millis(16));
        assert_eq!(clock.delta(), Duration::from_millis(16));

        clock.tick(start + Duration::from_millis(50));
        assert_eq!(clock.delta(), Duration::from_millis(34));
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn fps_is_zero_until_window_completes() {
        let start = Instant::now();
        let mut clock = ClockService::starting_at(start);

        clock.tick(start + Duration::from_millis(500));

        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn fps_averages_over_window() {
        let start = Instant::now();
        let mut clock = ClockService::starting_at(start);

        for frame in 1..=60u64 {
            clock.tick(start + Duration::from_micros(frame * 1_000_000 / 60));
        }

        assert!((clock.fps() - 60.0).abs() < 0.5, "fps was {}", clock.fps());
    }

    #[test]
    fn backwards_time_gives_zero_delta() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = ClockService::starting_at(start);

        clock.tick(start - Duration::from_millis(10));

        assert_eq!(clock.delta(), Duration::ZERO);
    }
}
