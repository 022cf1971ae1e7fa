use std::path::PathBuf;
use std::time::Duration;

use crate::entities::Playfield;

pub const ENV_WIDTH: &str = "COIN_CATCHER_WIDTH";
pub const ENV_HEIGHT: &str = "COIN_CATCHER_HEIGHT";
pub const ENV_FPS: &str = "COIN_CATCHER_FPS";
pub const ENV_LOG: &str = "COIN_CATCHER_LOG";

const DEFAULT_FPS: u32 = 60;
const MAX_FPS: u32 = 240;
const MAX_DIMENSION: f64 = 10_000.0;

/// Session configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Playfield size in units, fixed for the whole session
    pub playfield: Playfield,
    /// Time between ticks (one tick per display refresh)
    pub frame_interval: Duration,
    /// Log destination; logging is off when unset since the terminal is in use
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield {
                width: 800.0,
                height: 600.0,
            },
            frame_interval: frame_interval(DEFAULT_FPS),
            log_file: None,
        }
    }
}

fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs(1) / fps
}

fn parse_dimension(name: &str, raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v > 0.0 && v <= MAX_DIMENSION => Some(v),
        Ok(_) => {
            log::warn!("{} must be in (0, {}], using default", name, MAX_DIMENSION);
            None
        }
        Err(_) => {
            log::warn!("Invalid {} '{}', using default", name, raw);
            None
        }
    }
}

fn log_file_from(raw: Option<String>) -> Option<PathBuf> {
    raw.filter(|p| !p.trim().is_empty()).map(PathBuf::from)
}

/// Log destination alone, so the logger can be up before the rest of the
/// config is parsed (and its warnings are recorded).
pub fn log_file_from_env() -> Option<PathBuf> {
    log_file_from(std::env::var(ENV_LOG).ok())
}

impl GameConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; invalid values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(width) = lookup(ENV_WIDTH).and_then(|raw| parse_dimension(ENV_WIDTH, &raw)) {
            config.playfield.width = width;
        }
        if let Some(height) = lookup(ENV_HEIGHT).and_then(|raw| parse_dimension(ENV_HEIGHT, &raw))
        {
            config.playfield.height = height;
        }

        if let Some(fps) = lookup(ENV_FPS) {
            match fps.trim().parse::<u32>() {
                Ok(parsed) if parsed > 0 && parsed <= MAX_FPS => {
                    config.frame_interval = frame_interval(parsed);
                }
                Ok(_) => log::warn!("{} must be 1-{}, using default", ENV_FPS, MAX_FPS),
                Err(_) => log::warn!("Invalid {} '{}', using default", ENV_FPS, fps),
            }
        }

        config.log_file = log_file_from(lookup(ENV_LOG));

        config
    }
}
