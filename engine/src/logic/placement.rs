use minesweeper_common::models::Pos;
use rand::Rng;
use tracing::{debug, warn};

use crate::data::{Cell, Field};

pub const MAX_DENSITY: u32 = 100;

/// Where a first-click mine ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    Moved(Pos),
    /// No other covered cell was mine-free, so the mine was dropped.
    Removed,
}

/// `ceil(area * density / 100)`, with `density` clamped to 100.
pub fn target_mine_count(area: usize, density: u32) -> usize {
    let density = density.min(MAX_DENSITY) as usize;
    (area * density).div_ceil(100)
}

/// A cell that may still receive a mine: covered and mine-free.
fn is_free(cell: &Cell) -> bool {
    !cell.is_mine && !cell.revealed
}

/// Picks a uniformly random free cell that is not `exclude`.
///
/// The caller must make sure such a cell exists, otherwise this never
/// returns.
fn sample_free_cell<R: Rng + ?Sized>(field: &Field, rng: &mut R, exclude: Option<Pos>) -> Pos {
    loop {
        let pos = field.pos_of(rng.random_range(0..field.area()));
        let free = field.cell(pos).is_some_and(is_free);
        if free && exclude != Some(pos) {
            return pos;
        }
    }
}

/// Scatters mines over `field` until it holds `ceil(area * density / 100)`
/// of them, then caches every neighbour count. Returns the number of safe
/// cells, which is the win threshold.
///
/// Cells are drawn by rejection sampling. That needs `N·(H_N − H_{N−k})`
/// draws on average for `k` mines on `N` cells, which grows quickly as the
/// density approaches 100; keep densities well below that on big fields.
pub fn place_mines<R: Rng + ?Sized>(field: &mut Field, density: u32, rng: &mut R) -> usize {
    if density > MAX_DENSITY {
        warn!("Mine density {}% clamped to {}%", density, MAX_DENSITY);
    }

    let target = target_mine_count(field.area(), density);
    let mut mines = field.mine_count();
    while mines < target {
        let pos = sample_free_cell(field, rng, None);
        if let Some(cell) = field.cell_mut(pos) {
            cell.is_mine = true;
            mines += 1;
        }
    }

    field.cache_all_neighbor_counts();
    debug!(
        "Placed {} mines on a {}x{} field",
        mines,
        field.width(),
        field.height()
    );

    field.area() - mines
}

/// Takes the mine off `from` and puts it on another random covered,
/// mine-free cell, then refreshes the neighbour counts. `from` must hold a
/// mine. Open cells never receive it.
pub fn relocate_mine<R: Rng + ?Sized>(field: &mut Field, from: Pos, rng: &mut R) -> Relocation {
    if let Some(cell) = field.cell_mut(from) {
        cell.is_mine = false;
    }

    // `from` is free now but may not receive the mine back.
    let free = field
        .positions()
        .filter(|&pos| pos != from && field.cell(pos).is_some_and(is_free))
        .count();
    let relocation = if free > 0 {
        let to = sample_free_cell(field, rng, Some(from));
        if let Some(cell) = field.cell_mut(to) {
            cell.is_mine = true;
        }
        Relocation::Moved(to)
    } else {
        Relocation::Removed
    };

    field.cache_all_neighbor_counts();
    relocation
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn assert_counts_consistent(field: &Field) {
        for pos in field.positions() {
            let expected = field
                .neighbors_of(pos)
                .filter(|&n| field.cell(n).unwrap().is_mine)
                .count() as u8;
            assert_eq!(field.cell(pos).unwrap().adjacent, expected, "at {:?}", pos);
        }
    }

    #[test]
    fn target_rounds_up_and_clamps() {
        assert_eq!(target_mine_count(100, 0), 0);
        assert_eq!(target_mine_count(10, 1), 1);
        assert_eq!(target_mine_count(192, 34), 66);
        assert_eq!(target_mine_count(10, 100), 10);
        assert_eq!(target_mine_count(10, 250), 10);
    }

    #[test]
    fn placement_hits_the_target_and_caches_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        for density in [0, 5, 34, 60, 95, 100, 180] {
            let mut field = Field::new(18, 20).unwrap();
            let safe = place_mines(&mut field, density, &mut rng);
            let mines = target_mine_count(360, density);
            assert_eq!(field.mine_count(), mines);
            assert_eq!(safe + mines, field.area());
            assert_counts_consistent(&field);
        }
    }

    #[test]
    fn relocation_moves_exactly_one_mine_elsewhere() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = Field::new(6, 6).unwrap();
        place_mines(&mut field, 50, &mut rng);
        let before = field.mine_count();
        let from = field
            .positions()
            .find(|&p| field.cell(p).unwrap().is_mine)
            .unwrap();

        let Relocation::Moved(to) = relocate_mine(&mut field, from, &mut rng) else {
            panic!("there was room to move the mine");
        };

        assert_ne!(to, from);
        assert!(!field.cell(from).unwrap().is_mine);
        assert!(field.cell(to).unwrap().is_mine);
        assert_eq!(field.mine_count(), before);
        assert_counts_consistent(&field);
    }

    #[test]
    fn relocation_on_a_full_field_drops_the_mine() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = Field::new(2, 2).unwrap();
        assert_eq!(place_mines(&mut field, 100, &mut rng), 0);

        let from = Pos::new(1, 0);
        assert_eq!(relocate_mine(&mut field, from, &mut rng), Relocation::Removed);
        assert_eq!(field.mine_count(), 3);
        assert_eq!(field.cell(from).unwrap().adjacent, 3);
        assert_counts_consistent(&field);
    }

    #[test]
    fn relocation_with_one_free_cell_uses_it() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = Field::with_mines(
            2,
            2,
            &[Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1)],
        )
        .unwrap();

        assert_eq!(
            relocate_mine(&mut field, Pos::new(0, 0), &mut rng),
            Relocation::Moved(Pos::new(1, 1))
        );
    }

    #[test]
    fn relocation_skips_open_cells() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut field = Field::with_mines(3, 1, &[Pos::new(0, 0)]).unwrap();
            field.cell_mut(Pos::new(2, 0)).unwrap().revealed = true;

            assert_eq!(
                relocate_mine(&mut field, Pos::new(0, 0), &mut rng),
                Relocation::Moved(Pos::new(1, 0))
            );
            assert!(!field.cell(Pos::new(2, 0)).unwrap().is_mine);
        }
    }

    #[test]
    fn relocation_drops_the_mine_when_only_open_cells_are_mine_free() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = Field::with_mines(3, 1, &[Pos::new(0, 0)]).unwrap();
        field.cell_mut(Pos::new(1, 0)).unwrap().revealed = true;
        field.cell_mut(Pos::new(2, 0)).unwrap().revealed = true;

        assert_eq!(
            relocate_mine(&mut field, Pos::new(0, 0), &mut rng),
            Relocation::Removed
        );
        assert_eq!(field.mine_count(), 0);
    }
}
