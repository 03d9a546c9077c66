//! JSON parameter-file adapter.
//!
//! Implements [`ConfigPort`] over a file on disk.  Fields missing from
//! the file take their defaults; the result is range-checked before it
//! is returned.

use std::io::ErrorKind;
use std::path::PathBuf;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ControllerConfig;
use crate::error::Error;

pub struct JsonFileConfig {
    path: PathBuf,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPort for JsonFileConfig {
    fn load(&self) -> Result<ControllerConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let cfg: ControllerConfig = serde_json::from_str(&text).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate().map_err(|e| match e {
            Error::Config(msg) => ConfigError::ValidationFailed(msg),
            _ => ConfigError::Corrupted,
        })?;
        info!("JsonFileConfig: loaded {}", self.path.display());
        Ok(cfg)
    }
}
