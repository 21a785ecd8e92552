/// Presentation layer: full-frame redraw of the board.
///
/// Each frame:
///   1. Clear the screen (style picked from the host platform)
///   2. Title banner
///   3. Grid rows, one glyph + space per cell
///   4. Pending notification, delivered once
///   5. Congratulations banner once nothing is left to catch
///
/// All commands are batched with `queue!` and flushed once at the end.
/// Lines end in `\r\n` because the terminal is in raw mode.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::sim::world::{WorldState, GRID_SIZE};
use crate::ui::banner;

const EOL: &str = "\r\n";

/// How the screen is wiped between frames.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClearStyle {
    /// Windows console: clear the visible buffer.
    Console,
    /// Unix terminals: also drop scrollback, like `clear`.
    Terminal,
}

impl ClearStyle {
    /// Pick from the `OS` environment variable.
    pub fn detect() -> Self {
        Self::from_os_var(std::env::var("OS").ok().as_deref())
    }

    pub fn from_os_var(os: Option<&str>) -> Self {
        match os {
            Some("Windows_NT") => ClearStyle::Console,
            _ => ClearStyle::Terminal,
        }
    }
}

pub struct Renderer<W: Write> {
    writer: W,
    clear: ClearStyle,
}

impl Renderer<BufWriter<io::Stdout>> {
    pub fn stdout() -> Self {
        Renderer::new(BufWriter::with_capacity(8192, io::stdout()), ClearStyle::detect())
    }
}

impl<W: Write> Renderer<W> {
    pub fn new(writer: W, clear: ClearStyle) -> Self {
        Renderer { writer, clear }
    }

    /// Draw one frame. Consumes the pending notification.
    pub fn render(&mut self, world: &mut WorldState) -> io::Result<()> {
        self.clear_screen()?;

        for line in banner::TITLE {
            queue!(self.writer, Print(line), Print(EOL))?;
        }

        let mut row_buf = String::with_capacity(GRID_SIZE * 8);
        for row in &world.grid {
            row_buf.clear();
            for cell in row {
                row_buf.push(cell.glyph());
                row_buf.push(' ');
            }
            queue!(self.writer, Print(&row_buf), Print(EOL))?;
        }

        if let Some(msg) = world.take_notification() {
            queue!(self.writer, Print(EOL), Print(msg), Print(EOL))?;
        }

        if world.all_caught() {
            for line in banner::CONGRATS {
                queue!(self.writer, Print(line), Print(EOL))?;
            }
        }

        self.writer.flush()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        if self.clear == ClearStyle::Terminal {
            queue!(self.writer, Clear(ClearType::Purge))?;
        }
        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}
