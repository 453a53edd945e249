use std::cell::Cell;

use web_time::Instant;

/// Monotonic tick counter the frame loop measures time with.
pub trait FrameClock {
    /// Current counter value. Must never decrease.
    fn ticks(&self) -> u64;
    /// Ticks per second.
    fn frequency(&self) -> u64;
}

/// Wall-clock counter in nanoseconds since creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn ticks(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn frequency(&self) -> u64 {
        1_000_000_000
    }
}

/// Clock that advances by a fixed step every time it is read.
///
/// Used for deterministic replays: a loop driven by
/// `FixedStepClock::new(60, 1)` sees exactly 1/60 s per frame no matter how
/// long frames really take.
#[derive(Debug)]
pub struct FixedStepClock {
    frequency: u64,
    step: u64,
    now: Cell<u64>,
}

impl FixedStepClock {
    /// `step` ticks pass per read at `frequency` ticks per second.
    #[must_use]
    pub fn new(frequency: u64, step: u64) -> Self {
        Self {
            frequency: frequency.max(1),
            step,
            now: Cell::new(0),
        }
    }
}

impl FrameClock for FixedStepClock {
    fn ticks(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now.saturating_add(self.step));
        now
    }

    fn frequency(&self) -> u64 {
        self.frequency
    }
}

/// Per-frame delta and elapsed time with a smoothed FPS estimate.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Counter value when timing started.
    start: u64,
    /// Counter value at the previous advance.
    last: u64,
    /// Seconds between the two most recent advances.
    delta: f32,
    /// Seconds since timing started.
    elapsed: f32,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Elapsed seconds at the last FPS report.
    last_report: f32,
}

impl FrameTiming {
    /// Start timing from the clock's current value, so the first delta is
    /// measured from here and not from the clock's epoch.
    pub fn new(clock: &impl FrameClock) -> Self {
        let start = clock.ticks();
        Self {
            start,
            last: start,
            delta: 0.0,
            elapsed: 0.0,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
            last_report: 0.0,
        }
    }

    /// Read the clock and return the seconds since the previous advance.
    pub fn advance(&mut self, clock: &impl FrameClock) -> f32 {
        let now = clock.ticks().max(self.last);
        let frequency = clock.frequency().max(1) as f64;

        self.delta = ((now - self.last) as f64 / frequency) as f32;
        self.elapsed = ((now - self.start) as f64 / frequency) as f32;
        self.last = now;

        if self.delta > 0.0 {
            let instant_fps = 1.0 / self.delta;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        self.delta
    }

    /// Seconds between the two most recent advances.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Seconds since timing started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// True at most once per `interval` seconds; used to rate-limit FPS
    /// logging.
    pub fn report_due(&mut self, interval: f32) -> bool {
        if self.elapsed - self.last_report >= interval {
            self.last_report = self.elapsed;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_delta_is_measured_from_construction() {
        let clock = FixedStepClock::new(60, 1);
        let _ = clock.ticks(); // simulate time passing before the loop
        let _ = clock.ticks();

        let mut timing = FrameTiming::new(&clock);
        let delta = timing.advance(&clock);
        assert!((delta - 1.0 / 60.0).abs() < 1e-7);
        assert!((timing.elapsed() - 1.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn elapsed_accumulates_from_start() {
        let clock = FixedStepClock::new(1000, 250);
        let mut timing = FrameTiming::new(&clock);
        for _ in 0..4 {
            let _ = timing.advance(&clock);
        }
        assert_eq!(timing.delta(), 0.25);
        assert_eq!(timing.elapsed(), 1.0);
    }

    #[test]
    fn stalled_clock_gives_zero_delta() {
        let clock = FixedStepClock::new(60, 0);
        let mut timing = FrameTiming::new(&clock);
        assert_eq!(timing.advance(&clock), 0.0);
        assert_eq!(timing.fps(), 60.0);
    }

    #[test]
    fn fps_converges_towards_frame_rate() {
        let clock = FixedStepClock::new(120, 1);
        let mut timing = FrameTiming::new(&clock);
        for _ in 0..500 {
            let _ = timing.advance(&clock);
        }
        assert!((timing.fps() - 120.0).abs() < 1.0);
    }

    #[test]
    fn report_is_rate_limited() {
        let clock = FixedStepClock::new(10, 1);
        let mut timing = FrameTiming::new(&clock);
        let mut reports = 0;
        for _ in 0..30 {
            let _ = timing.advance(&clock);
            if timing.report_due(1.0) {
                reports += 1;
            }
        }
        assert_eq!(reports, 3);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.ticks();
        let b = clock.ticks();
        assert!(b >= a);
        assert_eq!(clock.frequency(), 1_000_000_000);
    }
}
