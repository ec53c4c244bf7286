//! Progress bar and text formatters

use std::fmt::Write;

use crossterm::style::{Color, Stylize};

use super::{ProgressRenderer, TextStyle};

const FULL: char = '█';
const EMPTY: char = '░';

/// Width of the trailing percentage label, e.g. `  42%`
const LABEL_WIDTH: usize = 5;

/// How a bar of a given width splits into filled cells, empty cells and label
#[derive(Debug, Clone, PartialEq, Eq)]
struct Geometry {
    filled: usize,
    empty: usize,
    label: Option<String>,
}

impl Geometry {
    fn new(percent: f64, width: u16) -> Self {
        let percent = percent.clamp(0.0, 1.0);
        let width = width as usize;

        // Too narrow for a label: spend every column on the bar
        let (bar_width, label) = if width > LABEL_WIDTH {
            let whole = (percent * 100.0).floor() as u32;
            (width - LABEL_WIDTH, Some(format!(" {:>3}%", whole)))
        } else {
            (width, None)
        };

        let filled = ((bar_width as f64) * percent).round() as usize;
        let filled = filled.min(bar_width);
        Self {
            filled,
            empty: bar_width - filled,
            label,
        }
    }
}

/// Unstyled block bar
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBar;

impl ProgressRenderer for PlainBar {
    fn render_progress(&self, percent: f64, width: u16) -> String {
        let geometry = Geometry::new(percent, width);
        let mut out = String::with_capacity(width as usize * FULL.len_utf8());
        out.extend(std::iter::repeat(FULL).take(geometry.filled));
        out.extend(std::iter::repeat(EMPTY).take(geometry.empty));
        if let Some(label) = geometry.label {
            out.push_str(&label);
        }
        out
    }
}

/// Block bar whose filled span is shaded along a color gradient.
///
/// The gradient is scaled to the filled span, so a partially filled bar
/// still runs through the full range of colors.
#[derive(Debug, Clone, Copy)]
pub struct GradientBar {
    pub from: (u8, u8, u8),
    pub to: (u8, u8, u8),
    pub empty: (u8, u8, u8),
}

impl Default for GradientBar {
    fn default() -> Self {
        Self {
            from: (0xFF, 0x7C, 0xCB),
            to: (0xFD, 0xFF, 0x8C),
            empty: (0x60, 0x60, 0x60),
        }
    }
}

impl GradientBar {
    fn color_at(&self, index: usize, span: usize) -> Color {
        let t = if span > 1 {
            index as f64 / (span - 1) as f64
        } else {
            0.0
        };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::Rgb {
            r: mix(self.from.0, self.to.0),
            g: mix(self.from.1, self.to.1),
            b: mix(self.from.2, self.to.2),
        }
    }
}

impl ProgressRenderer for GradientBar {
    fn render_progress(&self, percent: f64, width: u16) -> String {
        let geometry = Geometry::new(percent, width);
        let mut out = String::new();

        for i in 0..geometry.filled {
            let _ = write!(out, "{}", FULL.with(self.color_at(i, geometry.filled)));
        }
        if geometry.empty > 0 {
            let (r, g, b) = self.empty;
            let empty: String = std::iter::repeat(EMPTY).take(geometry.empty).collect();
            let _ = write!(out, "{}", empty.with(Color::Rgb { r, g, b }));
        }
        if let Some(label) = geometry.label {
            out.push_str(&label);
        }
        out
    }
}

/// Dim grey help text
#[derive(Debug, Clone, Copy)]
pub struct MutedHelp {
    pub color: (u8, u8, u8),
}

impl Default for MutedHelp {
    fn default() -> Self {
        Self {
            color: (0x62, 0x62, 0x62),
        }
    }
}

impl TextStyle for MutedHelp {
    fn help(&self, text: &str) -> String {
        let (r, g, b) = self.color;
        text.with(Color::Rgb { r, g, b }).to_string()
    }
}

/// Leaves text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Unstyled;

impl TextStyle for Unstyled {
    fn help(&self, text: &str) -> String {
        text.to_string()
    }
}
