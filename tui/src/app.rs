use crossterm::event::EventStream;
use futures_util::StreamExt;
use minesweeper_engine::{Command, Flow, Game, Snapshot};
use tracing::{debug, info};

use crate::{
    Result,
    input::{Input, map_event},
    render::Renderer,
    session::TerminalSession,
    signals::{self, Signals},
};

/// Feeds one command to the game and picks the note shown with the next
/// frame.
pub fn apply(game: &mut Game, renderer: &mut Renderer, command: Command) -> Flow {
    renderer.set_note(match command {
        Command::Restart => Some("Restarted"),
        _ => None,
    });
    game.handle(command)
}

/// Runs the game until the player quits, redrawing after every input.
/// Returns the final state so the caller can report it once the terminal
/// is back to normal.
pub async fn run(mut game: Game) -> Result<Snapshot> {
    let mut signals = Signals::install()?;
    let mut events = EventStream::new();
    let mut session = TerminalSession::enter()?;
    let mut renderer = Renderer::new();
    renderer.draw(session.out(), &game.snapshot())?;

    loop {
        let input = tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => map_event(&event),
                Some(Err(e)) => return Err(e.into()),
                None => Some(Input::Command(Command::Quit)),
            },
            input = signals.recv() => Some(input),
        };
        let Some(input) = input else {
            continue;
        };

        match input {
            Input::Command(command) => {
                if apply(&mut game, &mut renderer, command) == Flow::Quit {
                    break;
                }
            }
            Input::Suspend => {
                debug!("Suspending");
                session.suspend()?;
                signals::stop_process()?;
                session.resume()?;
                debug!("Resumed");
            }
            Input::Resume => session.refresh()?,
            Input::Redraw => {}
        }

        renderer.draw(session.out(), &game.snapshot())?;
    }

    let snapshot = game.snapshot();
    info!(
        "Leaving game: {:?}, {} of {} safe cells open",
        snapshot.status, snapshot.revealed, snapshot.safe_cells
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use minesweeper_engine::{Field, GameStatus, Pos};

    use super::*;

    #[test]
    fn restart_sets_a_note_that_the_next_command_clears() {
        let field = Field::with_mines(3, 3, &[Pos::new(2, 2)]).unwrap();
        let mut game = Game::from_field(field, 0);
        let mut renderer = Renderer::new();

        assert_eq!(apply(&mut game, &mut renderer, Command::Restart), Flow::Continue);
        let mut frame = Vec::new();
        renderer.draw(&mut frame, &game.snapshot()).unwrap();
        assert!(String::from_utf8_lossy(&frame).contains("Restarted"));

        apply(&mut game, &mut renderer, Command::Flag);
        let mut frame = Vec::new();
        renderer.draw(&mut frame, &game.snapshot()).unwrap();
        assert!(!String::from_utf8_lossy(&frame).contains("Restarted"));
    }

    #[test]
    fn quit_ends_the_loop_without_touching_the_board() {
        let field = Field::with_mines(3, 3, &[Pos::new(2, 2)]).unwrap();
        let mut game = Game::from_field(field, 0);
        let mut renderer = Renderer::new();
        let before = game.snapshot();

        assert_eq!(apply(&mut game, &mut renderer, Command::Quit), Flow::Quit);
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.status(), GameStatus::Playing);
    }
}
