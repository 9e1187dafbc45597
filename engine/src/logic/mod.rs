use minesweeper_common::{
    models::{Direction, GameParams, GameStatus, Pos},
    protocol::{Command, Snapshot},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, instrument, warn};

use crate::{data::Field, error::Result};

pub mod placement;
pub mod reveal;

pub use placement::{Relocation, place_mines, relocate_mine, target_mine_count};
pub use reveal::{Outcome, reveal, toggle_flag};

/// Whether the loop driving a [`Game`] should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One player's game: the field plus everything needed to judge it.
///
/// `revealed` and `safe_cells` are kept up to date by every action rather
/// than recounted from the field.
#[derive(Debug)]
pub struct Game {
    field: Field,
    params: GameParams,
    status: GameStatus,
    revealed: usize,
    safe_cells: usize,
    first_click_consumed: bool,
    rng: StdRng,
}

impl Game {
    /// Starts a game with mines placed from an OS-seeded generator.
    pub fn new(params: GameParams) -> Result<Self> {
        Self::with_rng(params, StdRng::from_rng(&mut rand::rng()))
    }

    /// Starts a game whose mine layouts, including those of later
    /// restarts, are fixed by `seed`.
    pub fn with_seed(params: GameParams, seed: u64) -> Result<Self> {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    #[instrument(level = "trace", skip(rng))]
    fn with_rng(params: GameParams, mut rng: StdRng) -> Result<Self> {
        let mut field = Field::new(params.width, params.height)?;
        let safe_cells = place_mines(&mut field, params.density, &mut rng);
        info!(
            "Creating new game: {}x{} with {} mines",
            params.width,
            params.height,
            field.area() - safe_cells
        );

        Ok(Self {
            field,
            params,
            status: GameStatus::Playing,
            revealed: 0,
            safe_cells,
            first_click_consumed: false,
            rng,
        })
    }

    /// Plays on a prepared field. First-click safety still applies, and
    /// `seed` drives any mine it has to move as well as later restarts,
    /// which use the density of the prepared layout rounded up.
    pub fn from_field(field: Field, seed: u64) -> Self {
        let mines = field.mine_count();
        let params = GameParams {
            width: field.width(),
            height: field.height(),
            density: (mines * 100).div_ceil(field.area()) as u32,
        };
        let revealed = field
            .cells()
            .filter(|cell| cell.revealed && !cell.is_mine)
            .count();

        Self {
            safe_cells: field.area() - mines,
            field,
            params,
            status: GameStatus::Playing,
            revealed,
            first_click_consumed: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn params(&self) -> GameParams {
        self.params
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn cursor(&self) -> Pos {
        self.field.cursor()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn safe_cell_count(&self) -> usize {
        self.safe_cells
    }

    pub fn mine_count(&self) -> usize {
        self.field.area() - self.safe_cells
    }

    pub fn first_click_consumed(&self) -> bool {
        self.first_click_consumed
    }

    /// Applies one command. Only [`Command::Quit`] ends the loop; a won or
    /// lost game keeps accepting restarts.
    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::MoveCursor { direction } => {
                self.move_cursor(direction);
            }
            Command::Reveal => {
                self.reveal_at_cursor();
            }
            Command::Flag => {
                self.toggle_flag_at_cursor();
            }
            Command::Restart => self.restart(),
            Command::Quit => {
                info!(
                    "Player quit with {} of {} safe cells open",
                    self.revealed, self.safe_cells
                );
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Returns `false` when the game is over and the cursor stayed put.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        if self.status.is_over() {
            return false;
        }
        self.field.move_cursor(direction);
        true
    }

    /// Moves the cursor straight to `pos`, if it is on the field.
    pub fn set_cursor(&mut self, pos: Pos) -> bool {
        !self.status.is_over() && self.field.set_cursor(pos)
    }

    pub fn reveal_at_cursor(&mut self) -> Option<Outcome> {
        self.reveal(self.field.cursor())
    }

    pub fn toggle_flag_at_cursor(&mut self) -> Option<bool> {
        self.toggle_flag(self.field.cursor())
    }

    /// Reveals `pos`. Returns `None` when the game is already over.
    ///
    /// On the first reveal of a game a mine under `pos` is moved elsewhere
    /// before anything opens, so that reveal can never lose.
    #[instrument(level = "trace", skip(self), fields(x = pos.x, y = pos.y))]
    pub fn reveal(&mut self, pos: Pos) -> Option<Outcome> {
        if self.status.is_over() {
            debug!(
                "Ignoring reveal action on finished game at ({}, {})",
                pos.x, pos.y
            );
            return None;
        }

        if !self.first_click_consumed {
            self.first_click_consumed = true;
            self.make_first_click_safe(pos);
        }

        let outcome = reveal(&mut self.field, pos);
        match outcome {
            Outcome::HitMine => {
                warn!("Player hit mine at ({}, {}) - game over!", pos.x, pos.y);
                self.status = GameStatus::Lost;
                let shown = self.field.reveal_all_mines();
                info!("Game ended with loss, revealed {} more mines", shown);
            }
            Outcome::Opened { count } => {
                self.revealed += count;
                debug!(
                    "Revealed {} cells from ({}, {}), {} of {} safe cells open",
                    count, pos.x, pos.y, self.revealed, self.safe_cells
                );
                if count > 0 && self.has_won() {
                    self.status = GameStatus::Won;
                    self.field.reveal_all_mines();
                    info!("Game won! All safe cells revealed.");
                }
            }
            Outcome::AlreadyOpen => {
                debug!("Cell ({}, {}) is already open", pos.x, pos.y);
            }
        }

        Some(outcome)
    }

    fn make_first_click_safe(&mut self, pos: Pos) {
        if !self.field.cell(pos).is_some_and(|cell| cell.is_mine) {
            return;
        }

        match relocate_mine(&mut self.field, pos, &mut self.rng) {
            Relocation::Moved(to) => {
                debug!(
                    "First click on a mine, moved it from ({}, {}) to ({}, {})",
                    pos.x, pos.y, to.x, to.y
                );
            }
            Relocation::Removed => {
                self.safe_cells += 1;
                info!(
                    "First click on a mine with no free cell left, removed it at ({}, {})",
                    pos.x, pos.y
                );
            }
        }
    }

    fn has_won(&self) -> bool {
        self.revealed == self.safe_cells
    }

    /// Flips the flag at `pos`. Returns the new flag state, or `None` if
    /// the cell is open or the game is over.
    #[instrument(level = "trace", skip(self), fields(x = pos.x, y = pos.y))]
    pub fn toggle_flag(&mut self, pos: Pos) -> Option<bool> {
        if self.status.is_over() {
            debug!(
                "Ignoring flag action on finished game at ({}, {})",
                pos.x, pos.y
            );
            return None;
        }

        let flagged = toggle_flag(&mut self.field, pos);
        match flagged {
            Some(true) => debug!("Cell ({}, {}) flagged", pos.x, pos.y),
            Some(false) => debug!("Cell ({}, {}) unflagged", pos.x, pos.y),
            None => debug!("Ignoring flag action on revealed cell ({}, {})", pos.x, pos.y),
        }
        flagged
    }

    /// Lays out a fresh field of the same size and density, from any state.
    /// The cursor stays where it was.
    #[instrument(level = "trace", skip(self))]
    pub fn restart(&mut self) {
        info!(
            "Restarting game: {}x{} at {}% mines",
            self.params.width, self.params.height, self.params.density
        );
        self.field.reset();
        self.safe_cells = place_mines(&mut self.field, self.params.density, &mut self.rng);
        self.revealed = 0;
        self.first_click_consumed = false;
        self.status = GameStatus::Playing;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.field.width(),
            height: self.field.height(),
            cursor: self.field.cursor(),
            status: self.status,
            mines: self.mine_count(),
            safe_cells: self.safe_cells,
            revealed: self.revealed,
            flags: self.field.flag_count(),
            cells: self.field.rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_mine_game() -> Game {
        Game::from_field(Field::with_mines(5, 5, &[Pos::new(2, 2)]).unwrap(), 1)
    }

    #[test]
    fn zero_sized_params_are_rejected() {
        let params = GameParams {
            width: 0,
            ..GameParams::default()
        };
        assert!(Game::with_seed(params, 0).is_err());
    }

    #[test]
    fn counters_start_consistent() {
        let game = Game::with_seed(GameParams::default(), 69).unwrap();
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.revealed_count(), 0);
        assert_eq!(game.mine_count(), game.field().mine_count());
        assert_eq!(game.mine_count() + game.safe_cell_count(), 12 * 16);
        assert!(!game.first_click_consumed());
    }

    #[test]
    fn cascade_from_corner_wins_single_mine_field() {
        let mut game = single_mine_game();

        assert_eq!(
            game.reveal(Pos::new(0, 0)),
            Some(Outcome::Opened { count: 24 })
        );
        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.field().cell(Pos::new(2, 2)).unwrap().revealed);
    }

    #[test]
    fn win_needs_every_safe_cell() {
        let mut game = single_mine_game();

        // Open the eight numbered cells around the mine one by one.
        for pos in game.field().neighbors_of(Pos::new(2, 2)).collect::<Vec<_>>() {
            game.reveal(pos);
        }
        assert_eq!(game.revealed_count(), 8);
        assert_eq!(game.status(), GameStatus::Playing);

        game.reveal(Pos::new(0, 0));
        assert_eq!(game.revealed_count(), 24);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn second_mine_hit_loses_and_shows_all_mines() {
        let field = Field::with_mines(4, 4, &[Pos::new(0, 0), Pos::new(3, 3)]).unwrap();
        let mut game = Game::from_field(field, 2);

        assert_eq!(
            game.reveal(Pos::new(1, 0)),
            Some(Outcome::Opened { count: 1 })
        );
        assert_eq!(game.reveal(Pos::new(0, 0)), Some(Outcome::HitMine));
        assert_eq!(game.status(), GameStatus::Lost);
        assert!(game.field().cell(Pos::new(3, 3)).unwrap().revealed);
    }

    #[test]
    fn first_click_on_a_mine_moves_it() {
        let field = Field::with_mines(4, 4, &[Pos::new(0, 0)]).unwrap();
        let mut game = Game::from_field(field, 9);

        let outcome = game.reveal(Pos::new(0, 0));
        assert!(matches!(outcome, Some(Outcome::Opened { .. })));
        assert_ne!(game.status(), GameStatus::Lost);
        assert!(!game.field().cell(Pos::new(0, 0)).unwrap().is_mine);
        assert_eq!(game.field().mine_count(), 1);
        assert_eq!(game.mine_count(), 1);
    }

    #[test]
    fn finished_game_ignores_everything_but_restart_and_quit() {
        let mut game = single_mine_game();
        game.reveal(Pos::new(0, 0));
        let before = game.snapshot();

        assert_eq!(game.reveal(Pos::new(2, 2)), None);
        assert_eq!(game.toggle_flag(Pos::new(2, 2)), None);
        assert!(!game.move_cursor(Direction::Down));
        assert_eq!(game.snapshot(), before);

        assert_eq!(game.handle(Command::Restart), Flow::Continue);
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.handle(Command::Quit), Flow::Quit);
    }

    #[test]
    fn restart_resets_counters_and_keeps_cursor() {
        let mut game = Game::with_seed(GameParams::default(), 4).unwrap();
        game.set_cursor(Pos::new(3, 5));
        game.reveal_at_cursor();
        game.toggle_flag(Pos::new(0, 0));

        game.restart();

        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.revealed_count(), 0);
        assert!(!game.first_click_consumed());
        assert_eq!(game.cursor(), Pos::new(3, 5));
        assert!(game.field().cells().all(|cell| !cell.revealed && !cell.flagged));
        assert_eq!(game.mine_count() + game.safe_cell_count(), 12 * 16);
    }

    #[test]
    fn snapshot_reflects_cursor_flags_and_counters() {
        let mut game = single_mine_game();
        game.handle(Command::MoveCursor {
            direction: Direction::Right,
        });
        game.handle(Command::Flag);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.cursor, Pos::new(1, 0));
        assert_eq!(snapshot.flags, 1);
        assert_eq!(snapshot.mines, 1);
        assert_eq!(snapshot.safe_cells, 24);
        assert!(snapshot.cell(Pos::new(1, 0)).unwrap().flagged);
    }
}
