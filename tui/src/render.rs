use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use minesweeper_engine::{CellSnapshot, GameStatus, Pos, Snapshot};

pub const HELP: &str = "w/a/s/d move  space open  f flag  r restart  q quit";

pub fn glyph(cell: &CellSnapshot) -> char {
    if cell.revealed {
        match (cell.is_mine, cell.adjacent) {
            (true, _) => '+',
            (false, 0) => ' ',
            (false, n) => char::from(b'0' + n),
        }
    } else if cell.flagged {
        '!'
    } else {
        '_'
    }
}

fn color(cell: &CellSnapshot) -> Option<Color> {
    if !cell.revealed {
        return cell.flagged.then_some(Color::Yellow);
    }
    if cell.is_mine {
        return Some(Color::Red);
    }
    match cell.adjacent {
        1 => Some(Color::Blue),
        2 => Some(Color::Green),
        3 => Some(Color::Red),
        4 => Some(Color::DarkBlue),
        5 => Some(Color::DarkRed),
        6 => Some(Color::Cyan),
        7 => Some(Color::Magenta),
        8 => Some(Color::Grey),
        _ => None,
    }
}

pub fn status_line(snapshot: &Snapshot, note: Option<&str>) -> String {
    match snapshot.status {
        GameStatus::Won => "You win! r to play again, q to quit".to_string(),
        GameStatus::Lost => "You lose. r to play again, q to quit".to_string(),
        GameStatus::Playing => {
            let counters = format!(
                "Mines left: {}  Open: {}/{}",
                snapshot.mines_left(),
                snapshot.revealed,
                snapshot.safe_cells
            );
            format!("{}  {}", note.unwrap_or("Playing"), counters)
        }
    }
}

/// Last line printed once the terminal is restored.
pub fn exit_message(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Won => "You win",
        GameStatus::Lost => "You lose",
        GameStatus::Playing => "Quit",
    }
}

/// Draws whole frames; the board is small enough that diffing is not
/// worth it.
#[derive(Debug, Default)]
pub struct Renderer {
    note: Option<&'static str>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short message shown next to the counters until replaced.
    pub fn set_note(&mut self, note: Option<&'static str>) {
        self.note = note;
    }

    pub fn draw<W: Write>(&self, out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
        let border = " = ".repeat(snapshot.width);
        queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print(&border))?;

        for (y, row) in snapshot.cells.iter().enumerate() {
            queue!(out, MoveTo(0, line(y + 1)))?;
            for (x, cell) in row.iter().enumerate() {
                let (open, close) = if snapshot.cursor == Pos::new(x, y) {
                    ('[', ']')
                } else {
                    (' ', ' ')
                };
                queue!(out, Print(open))?;
                match color(cell) {
                    Some(color) => queue!(
                        out,
                        SetForegroundColor(color),
                        Print(glyph(cell)),
                        ResetColor
                    )?,
                    None => queue!(out, Print(glyph(cell)))?,
                }
                queue!(out, Print(close))?;
            }
        }

        let below = snapshot.height + 1;
        queue!(
            out,
            MoveTo(0, line(below)),
            Print(&border),
            MoveTo(0, line(below + 1)),
            Print(status_line(snapshot, self.note)),
            MoveTo(0, line(below + 2)),
            Print(HELP)
        )?;
        out.flush()
    }
}

fn line(row: usize) -> u16 {
    u16::try_from(row).unwrap_or(u16::MAX)
}
