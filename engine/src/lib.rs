//! Minefield engine for a terminal minesweeper.
//!
//! The engine owns everything that has rules attached to it: the [`Field`]
//! of cells, mine placement with first-click safety, the flood-fill reveal
//! and the [`Game`] state machine that ties them together. Front ends drive
//! a [`Game`] with [`Command`]s and draw the [`Snapshot`] it hands back.
//!
//! ```
//! use minesweeper_engine::{Command, Flow, Game, GameParams, GameStatus};
//!
//! let mut game = Game::with_seed(GameParams::default(), 69)?;
//! assert_eq!(game.handle(Command::Reveal), Flow::Continue);
//! // The first reveal of a game is never fatal.
//! assert_ne!(game.status(), GameStatus::Lost);
//! # Ok::<(), minesweeper_engine::GameError>(())
//! ```

pub mod data;
pub mod error;
pub mod logic;

pub use data::{Cell, Field};
pub use error::{GameError, Result};
pub use logic::{Flow, Game, Outcome};

// Re-export common types for convenience
pub use minesweeper_common::{models::*, protocol::*};
