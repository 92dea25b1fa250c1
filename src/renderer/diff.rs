//! Differential renderer for fullscreen mode.
//!
//! Compares the laid out lines to the previous frame and only rewrites rows
//! that changed. A palette change (color scheme toggle) repaints everything.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each row: skip it if unchanged, otherwise clear it and print its spans
//! 3. Flush the writer once
//! 4. Store the lines as previous for the next comparison

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{
    Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};
use crossterm::queue;

use super::layout::{Line, Span, Tone};
use crate::theme::Palette;
use crate::types::Attr;

/// Row-level differential renderer.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous: Vec<Line>,
    palette: Option<Palette>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame so the next render repaints every row.
    pub fn invalidate(&mut self) {
        self.previous.clear();
        self.palette = None;
    }

    /// Render `lines` into the first `height` rows.
    ///
    /// Returns true if any row was written.
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        lines: &[Line],
        palette: &Palette,
        height: u16,
    ) -> io::Result<bool> {
        let full = self.palette.as_ref() != Some(palette);
        let mut has_changes = false;

        queue!(out, BeginSynchronizedUpdate)?;
        if full {
            queue!(
                out,
                SetBackgroundColor(palette.background.to_crossterm()),
                Clear(ClearType::All)
            )?;
            has_changes = true;
        }

        let rows = usize::from(height);
        let row_count = lines.len().max(self.previous.len()).min(rows);
        for y in 0..row_count {
            let line = lines.get(y);
            if !full && line == self.previous.get(y) {
                continue;
            }
            has_changes = true;
            // row_count is bounded by a u16 height
            queue!(
                out,
                MoveTo(0, y as u16),
                SetBackgroundColor(palette.background.to_crossterm()),
                Clear(ClearType::CurrentLine)
            )?;
            if let Some(line) = line {
                write_line(out, line, palette)?;
            }
        }

        queue!(out, SetAttribute(Attribute::Reset), EndSynchronizedUpdate)?;
        out.flush()?;

        self.previous = lines.iter().take(rows).cloned().collect();
        self.palette = Some(*palette);
        Ok(has_changes)
    }
}

fn write_line<W: Write>(out: &mut W, line: &Line, palette: &Palette) -> io::Result<()> {
    if line.indent > 0 {
        queue!(out, Print(" ".repeat(line.indent)))?;
    }
    for span in &line.spans {
        write_span(out, span, palette)?;
    }
    Ok(())
}

fn write_span<W: Write>(out: &mut W, span: &Span, palette: &Palette) -> io::Result<()> {
    let fg = match span.tone {
        Tone::Normal => palette.foreground,
        Tone::Accent => palette.accent,
        Tone::Muted => palette.muted,
    };
    queue!(
        out,
        SetForegroundColor(fg.to_crossterm()),
        SetBackgroundColor(palette.background.to_crossterm())
    )?;
    for (flag, attribute) in [
        (Attr::BOLD, Attribute::Bold),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::INVERSE, Attribute::Reverse),
    ] {
        if span.attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    queue!(out, Print(&span.text))?;
    if !span.attrs.is_empty() {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}
