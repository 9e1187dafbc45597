//! OS signals the game loop reacts to. They only ever affect the terminal
//! and the picture on it, never the game.

use std::io;

#[cfg(unix)]
mod imp {
    use std::io;

    use signal_hook::consts::{SIGCONT, SIGTSTP};
    use tokio::signal::unix::{Signal, SignalKind, signal};
    use tracing::debug;

    use crate::input::Input;
    use minesweeper_engine::Command;

    #[derive(Debug)]
    pub struct Signals {
        stop: Signal,
        cont: Signal,
        terminate: Signal,
        hangup: Signal,
    }

    impl Signals {
        pub fn install() -> io::Result<Self> {
            Ok(Self {
                stop: signal(SignalKind::from_raw(SIGTSTP))?,
                cont: signal(SignalKind::from_raw(SIGCONT))?,
                terminate: signal(SignalKind::terminate())?,
                hangup: signal(SignalKind::hangup())?,
            })
        }

        pub async fn recv(&mut self) -> Input {
            let input = tokio::select! {
                Some(()) = self.stop.recv() => Input::Suspend,
                Some(()) = self.cont.recv() => Input::Resume,
                Some(()) = self.terminate.recv() => Input::Command(Command::Quit),
                Some(()) = self.hangup.recv() => Input::Command(Command::Quit),
                else => Input::Command(Command::Quit),
            };
            debug!("Signal mapped to {:?}", input);
            input
        }
    }

    /// Stops the process the way an unhandled `SIGTSTP` would. Returns
    /// once the process is continued.
    pub fn stop_process() -> io::Result<()> {
        signal_hook::low_level::emulate_default_handler(SIGTSTP)
    }
}

#[cfg(not(unix))]
mod imp {
    use std::io;

    use crate::input::Input;

    #[derive(Debug)]
    pub struct Signals;

    impl Signals {
        pub fn install() -> io::Result<Self> {
            Ok(Self)
        }

        pub async fn recv(&mut self) -> Input {
            std::future::pending().await
        }
    }

    pub fn stop_process() -> io::Result<()> {
        Ok(())
    }
}

pub use imp::Signals;

/// Suspends the process until it is continued. A no-op where job control
/// does not exist.
pub fn stop_process() -> io::Result<()> {
    imp::stop_process()
}
