use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    #[serde(rename = "up")]
    Up,
    #[serde(rename = "down")]
    Down,
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "right")]
    Right,
}

impl Direction {
    /// Unit step as `(dx, dy)`; `y` grows downwards.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Field size and mine density for a game.
///
/// `density` is a percentage of the field area. Values above 100 are
/// accepted here and clamped when mines are placed.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct GameParams {
    pub width: usize,
    pub height: usize,
    pub density: u32,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            width: 12,
            height: 16,
            density: 34,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "playing")]
    Playing,
    #[serde(rename = "won")]
    Won,
    #[serde(rename = "lost")]
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// What a front end may know about a single cell.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct CellSnapshot {
    pub revealed: bool,
    pub is_mine: bool,
    pub flagged: bool,
    pub adjacent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_fill_missing_keys_with_defaults() {
        let params: GameParams = serde_json::from_str(r#"{ "width": 30 }"#).unwrap();
        assert_eq!(
            params,
            GameParams {
                width: 30,
                ..GameParams::default()
            }
        );
    }

    #[test]
    fn direction_deltas_point_the_right_way() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
    }

    #[test]
    fn only_playing_is_not_over() {
        assert!(!GameStatus::Playing.is_over());
        assert!(GameStatus::Won.is_over());
        assert!(GameStatus::Lost.is_over());
    }
}
