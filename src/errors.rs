//! Unified application error type.
//! All modules (api, core, cli, config) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Remote collaborators
    // ---------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server rejected the request ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Not logged in. Run `ramenlog login` first")]
    NotAuthenticated,

    // ---------------------------
    // Device
    // ---------------------------
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid time slot: {0} (expected now, lunch or night)")]
    InvalidTimeSlot(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
