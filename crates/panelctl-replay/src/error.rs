use std::path::PathBuf;

use panelctl_core::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace line {line}: {source}")]
    TraceLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown preset: {name} (expected one of: {})", panelctl_core::PanelConfig::PRESETS.join(", "))]
    UnknownPreset { name: String },

    #[error("config file not found: {path}")]
    MissingConfig { path: PathBuf },
}

impl ReplayError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::UnknownPreset { .. } | Self::MissingConfig { .. } => 2,
            _ => 1,
        }
    }
}
