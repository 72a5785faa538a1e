//! JSON run configuration for the heavy-ion engine.
//!
//! Every field carries a default, so an empty object `{}` is a valid config
//! and reproduces the reference cross-section window.

use super::constants::DEFAULT_OUTPUT_PRECISION;
use crate::domain::HeavyIonError;
use crate::modules::cross_section::{CrossSectionWindow, CrossSectionWindowError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub cross_section: CrossSectionWindow,
    pub output_precision: u32,
    pub deformation_table: Option<PathBuf>,
    pub mass_table: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cross_section: CrossSectionWindow::default(),
            output_precision: DEFAULT_OUTPUT_PRECISION,
            deformation_table: None,
            mass_table: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        self.cross_section.validate()?;
        if self.output_precision > 12 {
            return Err(EngineConfigError::InvalidPrecision {
                precision: self.output_precision,
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineConfigError {
    #[error("failed to read engine config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse engine config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid cross-section window: {0}")]
    InvalidWindow(#[from] CrossSectionWindowError),
    #[error("output precision must be at most 12 decimals, got {precision}")]
    InvalidPrecision { precision: u32 },
}

impl From<EngineConfigError> for HeavyIonError {
    fn from(error: EngineConfigError) -> Self {
        match error {
            EngineConfigError::Read { .. } => {
                HeavyIonError::io_system("IO.ENGINE_CONFIG", error.to_string())
            }
            _ => HeavyIonError::input_validation("INPUT.ENGINE_CONFIG", error.to_string()),
        }
    }
}

pub fn load_engine_config(path: &Path) -> Result<EngineConfig, EngineConfigError> {
    let content = fs::read_to_string(path).map_err(|source| EngineConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: EngineConfig =
        serde_json::from_str(&content).map_err(|source| EngineConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
