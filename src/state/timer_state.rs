//! Countdown timer state and its transitions

use std::time::{Duration, Instant};

use crate::config::Layout;

/// Default countdown length, one 25 minute pomodoro
pub const DEFAULT_DURATION_SECONDS: u64 = 1500;

/// Columns kept free beside the bar on top of the padding
const BAR_GUTTER: u16 = 4;

/// Coarse lifecycle of a countdown, derived from [`TimerState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Complete,
}

/// Timer state for a single countdown run.
///
/// Progress is counted in ticks while the remaining-time readout is derived
/// from wall-clock timestamps, so the two may drift apart under scheduling
/// jitter. Completion is always decided by the tick count.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    seconds_elapsed: u64,
    duration_seconds: u64,
    running: bool,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    remaining: Duration,
    percent: f64,
    render_width: u16,
    width_capped: bool,
}

impl TimerState {
    /// Create an idle timer for the given duration
    pub fn new(duration_seconds: u64) -> Self {
        Self {
            seconds_elapsed: 0,
            duration_seconds,
            running: false,
            start_time: None,
            end_time: None,
            remaining: Duration::from_secs(duration_seconds),
            percent: 0.0,
            render_width: 0,
            width_capped: false,
        }
    }

    /// Start a fresh countdown. Restarting a running countdown resets it.
    pub fn start(&mut self, duration_seconds: u64, now: Instant) {
        debug_assert!(duration_seconds > 0, "countdown duration must be positive");

        let duration = Duration::from_secs(duration_seconds);
        self.duration_seconds = duration_seconds;
        self.seconds_elapsed = 0;
        self.percent = 0.0;
        self.running = true;
        self.start_time = Some(now);
        // An end beyond what Instant can hold falls back to counting ticks
        self.end_time = now.checked_add(duration);
        self.remaining = duration;
    }

    /// Count one elapsed second. Ignored unless the countdown is running.
    pub fn advance_one_tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }

        self.seconds_elapsed += 1;
        self.remaining = match self.end_time {
            Some(end_time) => round_to_second(end_time.saturating_duration_since(now)),
            None => Duration::from_secs(self.duration_seconds.saturating_sub(self.seconds_elapsed)),
        };

        let percent = self.seconds_elapsed as f64 / self.duration_seconds as f64;
        if percent >= 1.0 {
            self.percent = 1.0;
            self.running = false;
        } else {
            self.percent = percent;
        }
    }

    /// Fit the progress bar into a viewport of the given width.
    ///
    /// Wide viewports pin the bar to `layout.max_width` and suppress the
    /// remaining-time readout.
    pub fn resize(&mut self, viewport_width: u16, layout: &Layout) {
        let reserved = layout.padding.saturating_mul(2).saturating_add(BAR_GUTTER);
        let width = viewport_width.saturating_sub(reserved);

        if width > layout.max_width {
            self.render_width = layout.max_width;
            self.remaining = Duration::ZERO;
            self.width_capped = true;
        } else {
            self.render_width = width;
            self.width_capped = false;
        }
    }

    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::Running
        } else if self.is_complete() {
            Phase::Complete
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 1.0
    }

    pub fn seconds_elapsed(&self) -> u64 {
        self.seconds_elapsed
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    /// Fraction of the countdown elapsed, always within `[0, 1]`
    pub fn percent_complete(&self) -> f64 {
        self.percent
    }

    /// Remaining time as of the last tick, rounded to whole seconds
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    pub fn render_width(&self) -> u16 {
        self.render_width
    }

    /// Whether the last resize hit the maximum bar width
    pub fn is_width_capped(&self) -> bool {
        self.width_capped
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECONDS)
    }
}

/// Round half away from zero to whole seconds
fn round_to_second(duration: Duration) -> Duration {
    let mut secs = duration.as_secs();
    if duration.subsec_nanos() >= 500_000_000 {
        secs += 1;
    }
    Duration::from_secs(secs)
}
