use std::mem;

use minesweeper_common::models::{CellSnapshot, Direction, Pos};

use crate::error::{GameError, Result};

const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub revealed: bool,
    pub is_mine: bool,
    pub flagged: bool,
    pub adjacent: u8,
}

impl From<&Cell> for CellSnapshot {
    fn from(value: &Cell) -> Self {
        Self {
            revealed: value.revealed,
            is_mine: value.is_mine,
            flagged: value.flagged,
            adjacent: value.adjacent,
        }
    }
}

/// A fixed-size grid of cells stored row-major, plus the player's cursor.
///
/// The cursor is always inside the field, and `cells.len()` always equals
/// `width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: usize,
    height: usize,
    cursor: Pos,
    cells: Vec<Cell>,
}

impl Field {
    /// Creates a field of covered, mine-free cells with the cursor in the
    /// top left corner. A zero-sized field is rejected.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::EmptyField { width, height });
        }

        let area = width
            .checked_mul(height)
            .filter(|&area| area <= isize::MAX as usize / mem::size_of::<Cell>())
            .ok_or(GameError::FieldTooLarge { width, height })?;

        Ok(Self {
            width,
            height,
            cursor: Pos::default(),
            cells: vec![Cell::default(); area],
        })
    }

    /// Creates a field with mines at exactly the given positions and the
    /// neighbour counts already cached.
    pub fn with_mines(width: usize, height: usize, mines: &[Pos]) -> Result<Self> {
        let mut field = Self::new(width, height)?;
        for &pos in mines {
            let cell = field.cell_mut(pos).ok_or(GameError::MineOutOfBounds {
                x: pos.x,
                y: pos.y,
                width,
                height,
            })?;
            cell.is_mine = true;
        }
        field.cache_all_neighbor_counts();
        Ok(field)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    /// Puts the cursor on `pos`. Returns `false` and leaves the cursor
    /// alone if `pos` is outside the field.
    pub fn set_cursor(&mut self, pos: Pos) -> bool {
        if self.index_of(pos).is_none() {
            return false;
        }
        self.cursor = pos;
        true
    }

    /// Moves the cursor one step, wrapping around at the edges.
    pub fn move_cursor(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.cursor = Pos {
            x: wrap(self.cursor.x, dx, self.width),
            y: wrap(self.cursor.y, dy, self.height),
        };
    }

    pub fn is_in_bounds(&self, x: isize, y: isize) -> bool {
        (0..self.width as isize).contains(&x) && (0..self.height as isize).contains(&y)
    }

    fn index_of(&self, pos: Pos) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height).then(|| pos.x + pos.y * self.width)
    }

    pub(crate) fn pos_of(&self, index: usize) -> Pos {
        Pos::new(index % self.width, index / self.width)
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.index_of(pos).map(|i| &mut self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width;
        (0..self.cells.len()).map(move |i| Pos::new(i % width, i / width))
    }

    /// The in-bounds cells of the 8-neighbourhood around `pos`. Corners
    /// have three neighbours and edges five.
    pub fn neighbors_of(&self, pos: Pos) -> impl Iterator<Item = Pos> + use<> {
        let (width, height) = (self.width, self.height);
        NEIGHBOUR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let x = pos.x.checked_add_signed(dx).filter(|&x| x < width)?;
            let y = pos.y.checked_add_signed(dy).filter(|&y| y < height)?;
            Some(Pos { x, y })
        })
    }

    pub fn count_adjacent_mines(&self, pos: Pos) -> u8 {
        self.neighbors_of(pos)
            .filter(|&n| self.cell(n).is_some_and(|cell| cell.is_mine))
            .count() as u8
    }

    /// Refreshes the cached neighbour count of every cell. Must run after
    /// any change to mine positions.
    pub fn cache_all_neighbor_counts(&mut self) {
        for pos in self.positions() {
            let count = self.count_adjacent_mines(pos);
            if let Some(cell) = self.cell_mut(pos) {
                cell.adjacent = count;
            }
        }
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_mine).count()
    }

    pub fn flag_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.flagged && !cell.revealed)
            .count()
    }

    /// Uncovers every mine. Returns how many were still covered.
    pub fn reveal_all_mines(&mut self) -> usize {
        let mut uncovered = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            if !cell.revealed {
                cell.revealed = true;
                uncovered += 1;
            }
        }
        uncovered
    }

    /// Covers and clears every cell. Size and cursor stay.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn rows(&self) -> Vec<Vec<CellSnapshot>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(CellSnapshot::from).collect())
            .collect()
    }
}

fn wrap(value: usize, delta: isize, len: usize) -> usize {
    (value as isize + delta).rem_euclid(len as isize) as usize
}
