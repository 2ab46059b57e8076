//! JSON-backed generator settings and content catalog.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{CatalogError, ContentCatalog};
use crate::mapgen::progression::{FLOOR_START_ROOM_INDEX, STARTING_FLOOR_INDEX};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Decorate ground with themed tiles instead of the blank placeholder.
    pub ground_tiles: bool,
    /// Index of the hazard/normal terrain pair used for the whole run.
    pub terrain_number: usize,
    pub map_difficulty: u32,
    pub enemy_difficulty: u32,
    pub floor_index: u32,
    pub room_index: i32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            ground_tiles: true,
            terrain_number: 0,
            map_difficulty: 0,
            enemy_difficulty: 3,
            floor_index: STARTING_FLOOR_INDEX,
            room_index: FLOOR_START_ROOM_INDEX,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub settings: GeneratorSettings,
    pub catalog: ContentCatalog,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("no blueprints were provided")]
    NoBlueprints,
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&content)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
    }

    pub fn write_atomic(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;

        fs::write(&tmp_path, json).map_err(io_error)?;
        fs::rename(&tmp_path, path).map_err(io_error)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        self.catalog.validate(self.settings.terrain_number, self.settings.ground_tiles)
    }
}
