//! # Configuration
//!
//! Simulation settings loaded from an optional JSON file. Every field has a default,
//! so a config file only needs the values it changes:
//!
//! ```json
//! { "seed": 42, "initial_mode": "survival", "spawn_position": [0.0, 70.0, 0.0] }
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use cgmath::Point3;
use log::{error, info, warn};
use serde::Deserialize;

use crate::engine_state::{
    player::Mode, voxels::terrain::DEFAULT_SPAWN_RADIUS, EngineSettings, DEFAULT_STREAM_RADIUS,
};

/// Environment variable naming the config file when no path argument is given.
pub const CONFIG_ENV_VAR: &str = "VOXEL_EXPLORER_CONFIG";

/// Errors from loading a config file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The file was not valid config JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            ConfigError::Parse(err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// User-facing simulation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the terrain noise.
    pub seed: u32,
    /// Chunk radius generated at startup.
    pub spawn_radius: i32,
    /// Chunk radius kept generated around the player.
    pub stream_radius: i32,
    /// Number of background generation threads.
    pub worker_threads: usize,
    /// Initial eye point as `[x, y, z]`.
    pub spawn_position: [f32; 3],
    /// Initial movement mode: `"survival"`, `"creative"` or `"menger"`.
    pub initial_mode: Mode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            seed: 0,
            spawn_radius: DEFAULT_SPAWN_RADIUS,
            stream_radius: DEFAULT_STREAM_RADIUS,
            worker_threads: 4,
            spawn_position: [0.0, 64.0, 0.0],
            initial_mode: Mode::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Loads the config at `path`, or defaults when there is none.
    ///
    /// A broken config file is logged and replaced by defaults rather than aborting.
    pub fn resolve(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            info!("No config file given, using defaults");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                error!("Falling back to default config: {}", err);
                Self::default()
            }
        }
    }

    /// Config path from the first command-line argument, else [`CONFIG_ENV_VAR`].
    pub fn path_from_environment() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR))
            .map(PathBuf::from)
    }

    /// Converts the config into engine settings.
    ///
    /// At least one worker thread is kept.
    pub fn engine_settings(&self) -> EngineSettings {
        if self.worker_threads == 0 {
            warn!("worker_threads = 0 would leave streamed chunks ungenerated, using 1");
        }

        EngineSettings {
            seed: self.seed,
            spawn_radius: self.spawn_radius,
            stream_radius: self.stream_radius,
            worker_threads: self.worker_threads.max(1),
            spawn_position: Point3::from(self.spawn_position),
            initial_mode: self.initial_mode,
        }
    }
}
