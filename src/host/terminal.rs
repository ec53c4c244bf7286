//! Terminal session and inline frame output

use std::io::{self, Write};

use anyhow::Context;
use crossterm::{
    cursor::{Hide, MoveToColumn, MoveUp, Show},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

/// Raw mode and hidden cursor for as long as the value lives
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        // From here on the guard restores raw mode even if hiding the cursor fails
        let session = Self { _private: () };
        execute!(io::stdout(), Hide).context("failed to hide cursor")?;
        debug!("Terminal session started");
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show);
        let _ = terminal::disable_raw_mode();
        debug!("Terminal session restored");
    }
}

/// Redraws a frame in place below whatever was printed before it.
///
/// Each draw moves back to the top of the previous frame, clears to the end
/// of the screen and writes the new frame. Lines printed with
/// [`InlineRenderer::print_line`] stay above the frame.
///
/// Lines wider than the viewport wrap onto extra rows; the row count is
/// taken from the width given to [`InlineRenderer::set_width`]. Until a
/// width is known every line counts as one row.
pub struct InlineRenderer<W: Write> {
    out: W,
    last_frame: String,
    rows_drawn: u16,
    width: u16,
}

impl<W: Write> InlineRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_frame: String::new(),
            rows_drawn: 0,
            width: 0,
        }
    }

    /// Track the viewport width used to count wrapped rows
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
        // The terminal rewraps the frame already on screen
        if self.rows_drawn > 0 {
            self.rows_drawn = frame_rows(&self.last_frame, width);
        }
    }

    /// Replace the frame on screen. Unchanged frames are skipped.
    pub fn draw(&mut self, frame: &str) -> io::Result<()> {
        if frame == self.last_frame && self.rows_drawn > 0 {
            return Ok(());
        }
        self.erase()?;
        self.write_frame(frame)?;
        self.out.flush()
    }

    /// Print a permanent line above the frame, then restore the frame
    pub fn print_line(&mut self, line: &str) -> io::Result<()> {
        self.erase()?;
        queue!(self.out, Print(line), Print("\r\n"))?;
        let frame = std::mem::take(&mut self.last_frame);
        self.write_frame(&frame)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn erase(&mut self) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0))?;
        if self.rows_drawn > 0 {
            queue!(self.out, MoveUp(self.rows_drawn))?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        self.rows_drawn = 0;
        Ok(())
    }

    fn write_frame(&mut self, frame: &str) -> io::Result<()> {
        // Raw mode does not translate \n, so every line ends with \r\n
        for line in frame.split_inclusive('\n') {
            match line.strip_suffix('\n') {
                Some(text) => queue!(self.out, Print(text), Print("\r\n"))?,
                None => queue!(self.out, Print(line))?,
            }
        }
        self.rows_drawn = frame_rows(frame, self.width);
        self.last_frame = frame.to_string();
        Ok(())
    }
}

/// Rows between the top of `frame` and the cursor after writing it
fn frame_rows(frame: &str, width: u16) -> u16 {
    let rows: usize = frame
        .split_inclusive('\n')
        .map(|line| match line.strip_suffix('\n') {
            Some(text) => line_rows(text, width),
            // the cursor stays on the last row of an unterminated line
            None => line_rows(line, width) - 1,
        })
        .sum();
    rows.min(u16::MAX as usize) as u16
}

fn line_rows(text: &str, width: u16) -> usize {
    let columns = visible_width(text);
    if width == 0 || columns == 0 {
        1
    } else {
        columns.div_ceil(width as usize)
    }
}

/// Display columns of `text`, ignoring CSI escape sequences
fn visible_width(text: &str) -> usize {
    let mut columns = 0;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            columns += c.width().unwrap_or(0);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(renderer: InlineRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn first_draw_writes_frame_with_crlf() {
        let mut renderer = InlineRenderer::new(Vec::new());
        renderer.draw("\nhello\n\n").unwrap();
        let out = output(renderer);
        assert!(out.contains("\r\nhello\r\n\r\n"));
        assert!(!out.contains("\x1b[3A"));
    }

    #[test]
    fn redraw_moves_up_over_previous_frame() {
        let mut renderer = InlineRenderer::new(Vec::new());
        renderer.draw("a\nb\nc\n").unwrap();
        renderer.draw("a\nb\nd\n").unwrap();
        let out = output(renderer);
        assert_eq!(out.matches("\x1b[3A").count(), 1);
        assert!(out.ends_with("a\r\nb\r\nd\r\n"));
    }

    #[test]
    fn identical_frames_are_skipped() {
        let mut renderer = InlineRenderer::new(Vec::new());
        renderer.draw("x\n").unwrap();
        let mut once = InlineRenderer::new(Vec::new());
        once.draw("x\n").unwrap();

        renderer.draw("x\n").unwrap();
        assert_eq!(output(renderer), output(once));
    }

    #[test]
    fn printed_line_lands_above_the_frame() {
        let mut renderer = InlineRenderer::new(Vec::new());
        renderer.draw("bar\n").unwrap();
        renderer.print_line("done!").unwrap();
        let out = output(renderer);
        let notice = out.rfind("done!\r\n").unwrap();
        let frame = out.rfind("bar\r\n").unwrap();
        assert!(notice < frame);
        assert_eq!(out.matches("bar\r\n").count(), 2);
    }

    #[test]
    fn wrapped_lines_count_as_rows() {
        let mut renderer = InlineRenderer::new(Vec::new());
        renderer.set_width(10);
        renderer.draw(&format!("{}\nx\n", "h".repeat(25))).unwrap();
        renderer.draw("y\n").unwrap();
        let out = output(renderer);
        // 25 columns take three rows at width 10, plus one for "x"
        assert!(out.contains("\x1b[4A"));
    }

    #[test]
    fn help_line_wraps_on_a_narrow_terminal() {
        let help = format!("   {}", crate::render::HELP_TEXT);
        assert_eq!(frame_rows(&format!("{}\n", help), 50), 2);
        assert_eq!(frame_rows(&format!("{}\n", help), 80), 1);
    }

    #[test]
    fn escape_sequences_take_no_columns() {
        let mut renderer = InlineRenderer::new(Vec::new());
        renderer.set_width(10);
        renderer
            .draw(&format!("\x1b[38;2;255;124;203m{}\x1b[0m\n", "█".repeat(10)))
            .unwrap();
        renderer.draw("z\n").unwrap();
        let out = output(renderer);
        assert!(out.contains("\x1b[1A"));
        assert!(!out.contains("\x1b[2A"));
    }

    #[test]
    fn narrowing_rewraps_the_previous_frame() {
        let mut renderer = InlineRenderer::new(Vec::new());
        renderer.set_width(80);
        renderer.draw(&format!("{}\n", "w".repeat(25))).unwrap();
        renderer.set_width(10);
        renderer.draw("y\n").unwrap();
        assert!(output(renderer).contains("\x1b[3A"));
    }

    #[test]
    fn line_exactly_as_wide_as_the_viewport_is_one_row() {
        assert_eq!(frame_rows(&format!("{}\n", "x".repeat(10)), 10), 1);
        assert_eq!(frame_rows("\n\n", 10), 2);
        assert_eq!(frame_rows("abc", 10), 0);
    }
}
