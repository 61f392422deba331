//! Error types for voxnav.

use thiserror::Error;

/// Voxnav error type.
///
/// Search outcomes are not errors: `find_path` reports unreachable goals
/// through [`crate::PathResult`] so the closest-approach diagnostics stay
/// attached to the result.
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
