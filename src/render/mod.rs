//! Frame composition
//!
//! Turns a [`TimerState`] into the text of one screen frame. The progress bar
//! and text styling are injected through [`ProgressRenderer`] and
//! [`TextStyle`] so the frame itself stays a pure function of state.

pub mod progress;

use std::time::Duration;

use crate::{config::Layout, state::TimerState};

pub use progress::{GradientBar, MutedHelp, PlainBar, Unstyled};

/// Static key help shown under the bar
pub const HELP_TEXT: &str = "Press ctrl+c or q to quit, Press ctrl+s or s to start. ";

/// Draws a progress bar `width` columns wide, filled to `percent` in `[0, 1]`
pub trait ProgressRenderer {
    fn render_progress(&self, percent: f64, width: u16) -> String;
}

/// Styles secondary text such as the help line
pub trait TextStyle {
    fn help(&self, text: &str) -> String;
}

/// The formatters used for one program run
pub struct Theme {
    pub bar: Box<dyn ProgressRenderer + Send + Sync>,
    pub text: Box<dyn TextStyle + Send + Sync>,
}

impl Theme {
    /// Gradient bar and muted help text
    pub fn colored() -> Self {
        Self {
            bar: Box::new(GradientBar::default()),
            text: Box::new(MutedHelp::default()),
        }
    }

    /// No escape sequences at all
    pub fn plain() -> Self {
        Self {
            bar: Box::new(PlainBar),
            text: Box::new(Unstyled),
        }
    }
}

/// Compose the full frame for the current timer state
pub fn compose_frame(timer: &TimerState, layout: &Layout, theme: &Theme) -> String {
    let pad = " ".repeat(layout.padding as usize);
    let pad_middle = " ".repeat(layout.padding_middle as usize);

    // A capped bar leaves only the padding where the readout would go
    let readout = if timer.is_width_capped() {
        String::new()
    } else {
        format_remaining(timer.remaining())
    };
    let bar = theme
        .bar
        .render_progress(timer.percent_complete(), timer.render_width());

    format!(
        "\n{pad_middle}\n\n{pad_middle}{readout}\n\n{pad}{bar}\n\n{pad}{help}\n\n",
        help = theme.text.help(HELP_TEXT),
    )
}

/// Compact duration text: `25m0s`, `1h2m3s`, `42s`, `0s`
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
