use std::path::{Path, PathBuf};

use rhythm_core::{ConfigError, Settings, TimingError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid layout in {path}: {source}")]
    Layout {
        path: PathBuf,
        source: ConfigError,
    },

    #[error("invalid tempo in {path}: {source}")]
    Tempo {
        path: PathBuf,
        source: TimingError,
    },
}

/// Read and validate a JSON settings file. Missing fields keep their defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = serde_json::from_str(&text).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    settings.layout.validate().map_err(|source| SettingsError::Layout {
        path: path.to_path_buf(),
        source,
    })?;
    settings.tempo.validate().map_err(|source| SettingsError::Tempo {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded settings from {}", path.display());
    Ok(settings)
}
