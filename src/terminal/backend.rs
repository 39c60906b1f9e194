use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::{
    Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
    LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, queue};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use super::Terminal;

/// A real terminal driven through crossterm. Output is queued on `out` and
/// only reaches the device on [`Terminal::flush`].
pub struct CrosstermTerminal<W: Write> {
    out: W,
}

impl CrosstermTerminal<io::Stderr> {
    /// Paint on stderr so stdout stays free for the chosen value.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn queue_style(&mut self, style: Style) -> io::Result<()> {
        if let Some(fg) = style.fg {
            queue!(self.out, SetForegroundColor(to_crossterm_color(fg)))?;
        }
        if let Some(bg) = style.bg {
            queue!(self.out, SetBackgroundColor(to_crossterm_color(bg)))?;
        }
        let modifiers = style.add_modifier;
        for (modifier, attribute) in [
            (Modifier::BOLD, Attribute::Bold),
            (Modifier::DIM, Attribute::Dim),
            (Modifier::ITALIC, Attribute::Italic),
            (Modifier::UNDERLINED, Attribute::Underlined),
            (Modifier::REVERSED, Attribute::Reverse),
        ] {
            if modifiers.contains(modifier) {
                queue!(self.out, SetAttribute(attribute))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, DisableLineWrap, Hide)
    }

    /// Raw mode is switched off even when the output is gone.
    fn leave_raw_mode(&mut self) -> io::Result<()> {
        let restored = execute!(self.out, Show, EnableLineWrap, LeaveAlternateScreen);
        disable_raw_mode()?;
        restored
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                return Ok(key);
            }
        }
    }

    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
        {
            return Ok(Some(key));
        }
        Ok(None)
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn write_row(&mut self, row: u16, spans: &[Span<'_>]) -> io::Result<()> {
        queue!(self.out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        for span in spans {
            self.queue_style(span.style)?;
            queue!(
                self.out,
                Print(span.content.as_ref()),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

fn to_crossterm_color(color: Color) -> CtColor {
    #[allow(unreachable_patterns)]
    match color {
        Color::Reset => CtColor::Reset,
        Color::Black => CtColor::Black,
        Color::Red => CtColor::DarkRed,
        Color::Green => CtColor::DarkGreen,
        Color::Yellow => CtColor::DarkYellow,
        Color::Blue => CtColor::DarkBlue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::Gray => CtColor::Grey,
        Color::DarkGray => CtColor::DarkGrey,
        Color::LightRed => CtColor::Red,
        Color::LightGreen => CtColor::Green,
        Color::LightYellow => CtColor::Yellow,
        Color::LightBlue => CtColor::Blue,
        Color::LightMagenta => CtColor::Magenta,
        Color::LightCyan => CtColor::Cyan,
        Color::White => CtColor::White,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
        Color::Indexed(i) => CtColor::AnsiValue(i),
        _ => CtColor::Reset,
    }
}
