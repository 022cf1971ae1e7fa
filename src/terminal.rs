/// Terminal ownership for the length of a game.
///
/// Entering turns on raw mode, the alternate screen, a hidden cursor and mouse
/// capture.  Dropping the session undoes all of it, including when entering
/// fails halfway, so the shell is never left in raw mode.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal, ExecutableCommand,
};

type RawModeSwitch = fn() -> io::Result<()>;

pub struct TerminalSession<W: Write> {
    out: W,
    disable_raw: RawModeSwitch,
}

impl<W: Write> TerminalSession<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        Self::enter_with(out, terminal::enable_raw_mode, terminal::disable_raw_mode)
    }

    /// Like `enter`, with the raw-mode switches supplied by the caller.
    pub fn enter_with(
        out: W,
        enable_raw: RawModeSwitch,
        disable_raw: RawModeSwitch,
    ) -> io::Result<Self> {
        enable_raw()?;
        // From here on an early return drops the session and restores
        let mut session = TerminalSession { out, disable_raw };
        session.out.execute(terminal::EnterAlternateScreen)?;
        session.out.execute(cursor::Hide)?;
        session.out.execute(EnableMouseCapture)?;
        Ok(session)
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let _ = self.out.execute(DisableMouseCapture);
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        if let Err(e) = (self.disable_raw)() {
            log::warn!("could not leave raw mode: {}", e);
        }
    }
}
