use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::seek::SeekPolicy;

pub const APP_DIR: &str = "deck-player";
const CONFIG_FILE: &str = "config.json";

/// Upper bound for `default_max` and `step`: about 115 days in milliseconds.
const MAX_PROGRESS: f64 = 1e10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] io::Error),
    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: usize,
    pub seek: SeekPolicy,
    /// Track length used when the transport does not report one.
    pub default_max: f64,
    /// Keyboard seek step, in progress units.
    pub step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: 0,
            seek: SeekPolicy::default(),
            default_max: 100_000.0,
            step: 5_000.0,
        }
    }
}

/// Platform config directory, or `override_dir` when given.
pub fn config_dir(override_dir: Option<&Path>) -> PathBuf {
    match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR),
    }
}

impl Config {
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Replaces out-of-range numbers with their defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Config::default();
        if !(self.default_max.is_finite() && self.default_max > 0.0 && self.default_max <= MAX_PROGRESS) {
            log::warn!("default_max {} out of range, using {}", self.default_max, defaults.default_max);
            self.default_max = defaults.default_max;
        }
        if !(self.step.is_finite() && self.step > 0.0 && self.step <= MAX_PROGRESS) {
            log::warn!("step {} out of range, using {}", self.step, defaults.step);
            self.step = defaults.step;
        }
        self
    }

    /// Missing file means defaults.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(Self::path(dir)) {
            Ok(text) => Ok(serde_json::from_str::<Config>(&text)?.sanitized()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(dir)?;
        fs::write(Self::path(dir), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
