use std::{env, fmt::Display, fs, path::PathBuf, str::FromStr};

use minesweeper_engine::GameParams;
use tracing::{Level, debug, warn};

use crate::Result;

pub const CONFIG_FILE_VAR: &str = "MINESWEEPER_CONFIG";
pub const WIDTH_VAR: &str = "MINESWEEPER_WIDTH";
pub const HEIGHT_VAR: &str = "MINESWEEPER_HEIGHT";
pub const DENSITY_VAR: &str = "MINESWEEPER_DENSITY";
pub const SEED_VAR: &str = "MINESWEEPER_SEED";
pub const LOG_FILE_VAR: &str = "MINESWEEPER_LOG_FILE";
pub const LOG_LEVEL_VAR: &str = "MINESWEEPER_LOG_LEVEL";

/// Where and how much to log. Read before anything else so that the rest
/// of start-up is already traced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: Level,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            file: lookup(LOG_FILE_VAR)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            // No subscriber exists yet, so a bad level cannot be reported.
            level: lookup(LOG_LEVEL_VAR)
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(Level::INFO),
        }
    }
}

/// Game settings: defaults, then the JSON file named by
/// `MINESWEEPER_CONFIG`, then individual environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub params: GameParams,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut params = match lookup(CONFIG_FILE_VAR) {
            Some(path) => {
                debug!("Reading game parameters from {}", path);
                let text = fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read config file {}: {}", path, e))?;
                serde_json::from_str::<GameParams>(&text)
                    .map_err(|e| format!("invalid config file {}: {}", path, e))?
            }
            None => GameParams::default(),
        };

        params.width = parse_var(&lookup, WIDTH_VAR, params.width);
        params.height = parse_var(&lookup, HEIGHT_VAR, params.height);
        params.density = parse_var(&lookup, DENSITY_VAR, params.density);

        let seed = lookup(SEED_VAR).and_then(|raw| match raw.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!("Ignoring {}={:?}, not a number", SEED_VAR, raw);
                None
            }
        });

        Ok(Self { params, seed })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, current: T) -> T
where
    T: FromStr + Display,
{
    let Some(raw) = lookup(key) else {
        return current;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("Ignoring {}={:?}, keeping {}", key, raw, current);
        current
    })
}
