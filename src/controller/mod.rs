//! Event loop controller
//!
//! Folds one [`Event`] at a time into the owned [`TimerState`] and answers
//! with at most one [`Command`] for the host to carry out.
//!
//! | Phase | Event | Result |
//! |---|---|---|
//! | Idle | start key | start the countdown, schedule a tick |
//! | any | quit key | quit, state untouched |
//! | Running | tick | advance; print the notice on completion, else schedule the next tick |
//! | any | resize | refit the bar |
//! | otherwise | | nothing |

pub mod command;
pub mod event;

use std::time::Instant;

use tracing::{debug, info};

use crate::{
    config::Layout,
    render::{compose_frame, Theme},
    state::{Phase, TimerState},
};

pub use command::{Command, COMPLETION_NOTICE, TICK_INTERVAL};
pub use event::{Event, KeyAction};

/// Owns the timer and reduces events into it
#[derive(Debug, Clone)]
pub struct Controller {
    timer: TimerState,
    duration_seconds: u64,
    layout: Layout,
}

impl Controller {
    /// Create a controller with an idle timer
    pub fn new(duration_seconds: u64, layout: Layout) -> Self {
        Self {
            timer: TimerState::new(duration_seconds),
            duration_seconds,
            layout,
        }
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Reduce one event using the current time for any start
    pub fn update(&mut self, event: Event) -> Option<Command> {
        self.update_at(event, Instant::now())
    }

    /// Reduce one event; `now` stamps a countdown started by this event
    pub fn update_at(&mut self, event: Event, now: Instant) -> Option<Command> {
        match event {
            Event::Key(key) => match KeyAction::from_key(&key)? {
                KeyAction::Quit => {
                    info!("Quit requested in phase {:?}", self.timer.phase());
                    Some(Command::Quit)
                }
                KeyAction::Start => self.start(now),
            },
            Event::Resize { width, height } => {
                self.timer.resize(width, &self.layout);
                debug!(
                    "Viewport resized to {}x{}, bar width {}{}",
                    width,
                    height,
                    self.timer.render_width(),
                    if self.timer.is_width_capped() { " (capped)" } else { "" }
                );
                None
            }
            Event::Tick(at) => self.tick(at),
            Event::Other => None,
        }
    }

    /// Render the frame for the current state
    pub fn view(&self, theme: &Theme) -> String {
        compose_frame(&self.timer, &self.layout, theme)
    }

    fn start(&mut self, now: Instant) -> Option<Command> {
        if self.timer.phase() != Phase::Idle {
            debug!("Ignoring start in phase {:?}", self.timer.phase());
            return None;
        }

        self.timer.start(self.duration_seconds, now);
        info!("Countdown started for {}s", self.duration_seconds);
        Some(Command::ScheduleTick(TICK_INTERVAL))
    }

    fn tick(&mut self, at: Instant) -> Option<Command> {
        if !self.timer.is_running() {
            debug!("Ignoring stale tick in phase {:?}", self.timer.phase());
            return None;
        }

        self.timer.advance_one_tick(at);
        debug!(
            "Tick {}/{}, remaining {:?}",
            self.timer.seconds_elapsed(),
            self.timer.duration_seconds(),
            self.timer.remaining()
        );

        if self.timer.is_complete() {
            info!("Countdown complete after {} ticks", self.timer.seconds_elapsed());
            Some(Command::Println(COMPLETION_NOTICE.to_string()))
        } else {
            Some(Command::ScheduleTick(TICK_INTERVAL))
        }
    }
}
