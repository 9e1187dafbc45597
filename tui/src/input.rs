use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use minesweeper_engine::{Command, Direction};

/// Something the game loop has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// Hand the terminal back and stop the process until it is resumed.
    Suspend,
    /// The process was continued; terminal modes may have been reset.
    Resume,
    /// Only the picture needs refreshing, e.g. after a resize.
    Redraw,
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        Input::Command(command)
    }
}

/// Maps a terminal event to an input. Mouse and focus events are ignored.
pub fn map_event(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(..) => Some(Input::Redraw),
        _ => None,
    }
}

/// Maps a key press to an input. Keys without a binding map to `None`.
///
/// Raw mode turns Ctrl+C and Ctrl+Z into ordinary keys, so they are
/// handled here instead of by the default signal actions.
pub fn map_key(key: &KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit.into()),
            KeyCode::Char('z') => Some(Input::Suspend),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Up => move_cursor(Direction::Up),
        KeyCode::Down => move_cursor(Direction::Down),
        KeyCode::Left => move_cursor(Direction::Left),
        KeyCode::Right => move_cursor(Direction::Right),
        KeyCode::Enter => Command::Reveal,
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => move_cursor(Direction::Up),
            'a' => move_cursor(Direction::Left),
            's' => move_cursor(Direction::Down),
            'd' => move_cursor(Direction::Right),
            ' ' => Command::Reveal,
            'f' => Command::Flag,
            'r' => Command::Restart,
            'q' => Command::Quit,
            _ => return None,
        },
        _ => return None,
    };

    Some(command.into())
}

fn move_cursor(direction: Direction) -> Command {
    Command::MoveCursor { direction }
}
