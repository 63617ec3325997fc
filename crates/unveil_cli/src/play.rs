//! Line-by-line typewriter output on stdout.

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use unveil_runtime::RevealEvent;

/// Writes reveal events to a stream
///
/// On a terminal the current line is redrawn in place after every unit,
/// followed by the cursor glyph. Plain output only writes finished lines.
pub struct PlayWriter<W: Write> {
    out: W,
    glyph: String,
    styled: bool,
    text: String,
}

impl<W: Write> PlayWriter<W> {
    pub fn new(out: W, glyph: impl Into<String>, styled: bool) -> Self {
        Self {
            out,
            glyph: glyph.into(),
            styled,
            text: String::new(),
        }
    }

    /// Show the cursor on the first line before anything is revealed
    pub fn start(&mut self) -> io::Result<()> {
        if self.styled {
            self.redraw()?;
        }
        self.out.flush()
    }

    pub fn handle(&mut self, event: &RevealEvent) -> io::Result<()> {
        match event {
            RevealEvent::Revealed { cursor, state } => {
                self.text.clear();
                self.text.push_str(state.get(cursor.line).unwrap_or_default());
                if self.styled {
                    self.redraw()?;
                }
            }
            RevealEvent::LineStarted { .. } => {
                self.finish_line()?;
                if self.styled {
                    self.redraw()?;
                }
            }
            RevealEvent::Completed | RevealEvent::Cancelled => self.finish_line()?,
        }
        self.out.flush()
    }

    fn redraw(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            MoveToColumn(0),
            Print(&self.text),
            Print(&self.glyph),
            Clear(ClearType::UntilNewLine)
        )
    }

    fn finish_line(&mut self) -> io::Result<()> {
        if self.styled {
            queue!(
                self.out,
                MoveToColumn(0),
                Print(&self.text),
                Clear(ClearType::UntilNewLine)
            )?;
        } else {
            self.out.write_all(self.text.as_bytes())?;
        }
        writeln!(self.out)?;
        self.text.clear();
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}
