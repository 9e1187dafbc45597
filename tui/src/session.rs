use std::io::{self, Stdout};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, warn};

/// Raw mode plus the alternate screen for as long as the session lives.
///
/// Dropping the session always hands the terminal back in the state it
/// was found in, whichever way the game loop ends.
#[derive(Debug)]
pub struct TerminalSession {
    out: Stdout,
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let mut session = Self {
            out: io::stdout(),
            active: false,
        };
        session.resume()?;
        Ok(session)
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }

    /// Takes the terminal back after [`suspend`](Self::suspend).
    pub fn resume(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(self.out, EnterAlternateScreen, Hide)?;
        debug!("Terminal session active");
        Ok(())
    }

    /// Restores the terminal settings the session started from.
    pub fn suspend(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        debug!("Terminal session released");
        Ok(())
    }

    /// Applies raw mode again after the process was stopped and continued
    /// from outside, since the shell may have reset the terminal meanwhile.
    pub fn refresh(&mut self) -> io::Result<()> {
        if !self.active {
            return self.resume();
        }
        // crossterm skips enabling raw mode it believes is already on.
        terminal::disable_raw_mode()?;
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.suspend() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}
