use minesweeper_common::models::Pos;

use crate::data::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HitMine,
    Opened { count: usize },
    AlreadyOpen,
}

/// Opens the cell at `pos`.
///
/// A mine is uncovered and reported as [`Outcome::HitMine`]. Any other
/// covered cell starts a flood fill: every opened cell with no adjacent
/// mines also opens its neighbours, so an empty region is uncovered
/// together with its ring of numbered cells. Flags never stop a cell from
/// opening.
pub fn reveal(field: &mut Field, pos: Pos) -> Outcome {
    if let Some(cell) = field.cell_mut(pos) {
        if cell.revealed {
            return Outcome::AlreadyOpen;
        }
        if cell.is_mine {
            cell.revealed = true;
            return Outcome::HitMine;
        }
    }

    Outcome::Opened {
        count: flood_fill(field, pos),
    }
}

fn flood_fill(field: &mut Field, start: Pos) -> usize {
    let mut opened = 0;
    let mut pending = vec![start];

    while let Some(pos) = pending.pop() {
        let Some(cell) = field.cell_mut(pos) else {
            continue;
        };
        if cell.revealed || cell.is_mine {
            continue;
        }

        cell.revealed = true;
        cell.flagged = false;
        opened += 1;

        if cell.adjacent == 0 {
            pending.extend(field.neighbors_of(pos));
        }
    }

    opened
}

/// Flips the flag on a covered cell and returns the new flag state.
/// Opened cells cannot be flagged.
pub fn toggle_flag(field: &mut Field, pos: Pos) -> Option<bool> {
    let cell = field.cell_mut(pos).filter(|cell| !cell.revealed)?;
    cell.flagged = !cell.flagged;
    Some(cell.flagged)
}
