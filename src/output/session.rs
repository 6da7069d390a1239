//! The output session shared by every renderer of a run.

use std::io::IsTerminal;

use termcolor::{ColorChoice, StandardStream, WriteColor};
use tracing::debug;

/// Owns the output stream and what is known about the terminal behind it.
///
/// Acquired once at startup and borrowed by the renderer. Dropping it resets
/// colours and flushes, whichever way the run ends.
pub struct TerminalSession<W: WriteColor = StandardStream> {
    out: W,
    width: Option<usize>,
}

impl TerminalSession<StandardStream> {
    /// Session on stdout, sized to the terminal if there is one.
    pub fn stdout(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let width = terminal_width();
        debug!(?width, use_color, "output session started");
        Self::new(StandardStream::stdout(choice), width)
    }
}

impl<W: WriteColor> TerminalSession<W> {
    pub fn new(out: W, width: Option<usize>) -> Self {
        Self { out, width }
    }

    /// Columns available for alignment; `None` when output is not a terminal.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: WriteColor> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let _ = self.out.reset();
        let _ = self.out.flush();
    }
}

/// Width of the terminal on stdout.
///
/// Asks the tty first and falls back to `$COLUMNS`. Returns `None` if stdout
/// is not a terminal.
pub fn terminal_width() -> Option<usize> {
    if !std::io::stdout().is_terminal() {
        return None;
    }
    ioctl_width().or_else(|| {
        std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.trim().parse().ok())
            .filter(|&c: &usize| c > 0)
    })
}

fn ioctl_width() -> Option<usize> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
    if result == 0 && ws.ws_col > 0 {
        Some(usize::from(ws.ws_col))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use termcolor::{Buffer, Color, ColorSpec};

    #[test]
    fn test_session_exposes_writer() {
        let mut session = TerminalSession::new(Buffer::no_color(), Some(40));
        write!(session.out(), "hello").unwrap();
        assert_eq!(session.get_ref().as_slice(), b"hello");
        assert_eq!(session.width(), Some(40));
    }

    #[test]
    fn test_drop_resets_color() {
        let mut buf = Buffer::ansi();
        {
            let mut session = TerminalSession::new(&mut buf, None);
            session
                .out()
                .set_color(ColorSpec::new().set_fg(Some(Color::Blue)))
                .unwrap();
            write!(session.out(), "x").unwrap();
        }
        let text = String::from_utf8_lossy(buf.as_slice()).into_owned();
        assert!(text.ends_with("\x1b[0m"), "{:?}", text);
    }
}
