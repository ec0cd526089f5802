use std::{fs, io, path::PathBuf, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::fs::{config_dir, state_dir};

const FILE_NAME: &str = "core.toml";
const DB_FILE_NAME: &str = "gigboard.db";

/// Handle to the core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to access configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The core configuration, serialized to TOML.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Overrides the location of the database file
    database: Option<PathBuf>,
    board: BoardConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Write every singer on the board back to the store, not just the ones that moved.
    pub rewrite_unchanged: bool,
}

impl CoreConfig {
    /// Load the configuration from disk, writing the defaults out if no file exists yet.
    pub fn load() -> Result<Self, Error> {
        let path = config_dir()?.join(FILE_NAME);

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            debug!("Loaded configuration from {}", path.display());
            Ok(toml::from_str(&contents)?)
        } else {
            let cfg = Self::default();
            cfg.save()?;
            Ok(cfg)
        }
    }

    pub fn save(&self) -> Result<(), Error> {
        let contents = toml::to_string_pretty(self)?;

        fs::write(config_dir()?.join(FILE_NAME), contents)?;

        Ok(())
    }

    /// Path of the database file, falling back to the state directory.
    pub fn database_path(&self) -> Result<PathBuf, Error> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(state_dir()?.join(DB_FILE_NAME)),
        }
    }

    pub fn set_database_path(&mut self, path: PathBuf) {
        self.database = Some(path);
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut BoardConfig {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn mock() -> Self {
        Self::default()
    }
}
