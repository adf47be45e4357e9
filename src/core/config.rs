//! Game configuration types.
//!
//! Frontends configure the core at startup by providing:
//! - `PathLengths`: finish-line position for each transport path
//! - `StorageKeys`: key names used in the persistence store
//! - `GameConfig`: combines all configuration, plus the RNG seed and the
//!   developer switch that allows play to continue past the finish line
//!
//! Configuration can be built in code or read from a TOML file:
//!
//! ```
//! use polling_path::core::{GameConfig, TransportMode};
//!
//! let config = GameConfig::from_toml_str(r#"
//!     seed = 7
//!     [path_lengths]
//!     bus = 40
//!     carpool = 30
//!     bicycle = 20
//! "#).unwrap();
//!
//! assert_eq!(config.path_lengths.get(TransportMode::Carpool), 30);
//! assert_eq!(config.storage.progress_key, "gameProgress");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::mode::TransportMode;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Finish-line position for each path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathLengths {
    pub bus: u32,
    pub carpool: u32,
    pub bicycle: u32,
}

impl PathLengths {
    /// Create path lengths for each mode.
    #[must_use]
    pub const fn new(bus: u32, carpool: u32, bicycle: u32) -> Self {
        Self {
            bus,
            carpool,
            bicycle,
        }
    }

    /// Finish-line position of `mode`.
    #[must_use]
    pub const fn get(&self, mode: TransportMode) -> u32 {
        match mode {
            TransportMode::Bus => self.bus,
            TransportMode::Carpool => self.carpool,
            TransportMode::Bicycle => self.bicycle,
        }
    }
}

impl Default for PathLengths {
    fn default() -> Self {
        Self::new(40, 32, 24)
    }
}

/// Key names used in the session persistence store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Key holding the `SessionSnapshot`.
    pub progress_key: String,
    /// Key holding the notebook log.
    pub notebook_key: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            progress_key: "gameProgress".to_string(),
            notebook_key: "notebook".to_string(),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Path length per transport mode.
    pub path_lengths: PathLengths,

    /// Seed for dice and card selection. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Developer/debug switch: keep applying moves after the finish line
    /// instead of rejecting them until the win is acknowledged.
    pub allow_play_past_finish: bool,

    /// Storage key names.
    pub storage: StorageKeys,
}

impl GameConfig {
    /// Create a configuration with default path lengths and storage keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path lengths.
    #[must_use]
    pub fn with_path_lengths(mut self, path_lengths: PathLengths) -> Self {
        self.path_lengths = path_lengths;
        self
    }

    /// Use a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Allow play to continue past the finish line.
    #[must_use]
    pub fn allow_play_past_finish(mut self) -> Self {
        self.allow_play_past_finish = true;
        self
    }

    /// Override the storage keys.
    #[must_use]
    pub fn with_storage_keys(mut self, storage: StorageKeys) -> Self {
        self.storage = storage;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check that every path has a finish line and the storage keys are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in TransportMode::ALL {
            if self.path_lengths.get(mode) == 0 {
                return Err(ConfigError::Invalid(format!(
                    "path length for {mode} must be at least 1"
                )));
            }
        }
        let keys = &self.storage;
        if keys.progress_key.trim().is_empty() || keys.notebook_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage keys must not be empty".into()));
        }
        // FileStore may sit on a case-insensitive filesystem.
        if keys.progress_key.eq_ignore_ascii_case(&keys.notebook_key) {
            return Err(ConfigError::Invalid(
                "progress and notebook keys must differ (ignoring case)".into(),
            ));
        }
        Ok(())
    }
}
