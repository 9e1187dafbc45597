use serde::{Deserialize, Serialize};

use crate::models::{CellSnapshot, Direction, GameStatus, Pos};

/// A single player action, already decoded from whatever input device
/// produced it.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "action")]
pub enum Command {
    #[serde(rename = "move")]
    MoveCursor { direction: Direction },
    #[serde(rename = "reveal")]
    Reveal,
    #[serde(rename = "flag")]
    Flag,
    #[serde(rename = "restart")]
    Restart,
    #[serde(rename = "quit")]
    Quit,
}

/// Read-only view of a game, handed to renderers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub cursor: Pos,
    pub status: GameStatus,
    pub mines: usize,
    pub safe_cells: usize,
    pub revealed: usize,
    pub flags: usize,
    pub cells: Vec<Vec<CellSnapshot>>,
}

impl Snapshot {
    pub fn cell(&self, pos: Pos) -> Option<&CellSnapshot> {
        self.cells.get(pos.y)?.get(pos.x)
    }

    pub fn mines_left(&self) -> isize {
        self.mines as isize - self.flags as isize
    }
}
