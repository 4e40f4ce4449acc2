#![forbid(unsafe_code)]

//! Configuration errors.
//!
//! The controller has no runtime failure modes: malformed gesture sequences
//! are dropped, not reported. The only fault is a configuration that cannot
//! work, caught once when a controller is built.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// One entry per rule the configuration breaks.
    #[error("invalid panel config: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[cfg(feature = "serde")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "serde")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
