use thiserror::Error;

/// Reasons a field cannot be built. Once a [`Game`](crate::Game) exists,
/// nothing it does can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("field must be at least 1x1, got {width}x{height}")]
    EmptyField { width: usize, height: usize },
    #[error("a {width}x{height} field does not fit in memory")]
    FieldTooLarge { width: usize, height: usize },
    #[error("mine at ({x}, {y}) lies outside a {width}x{height} field")]
    MineOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
