// src/errors.rs

//! Crate-wide error type.
//!
//! Configuration errors abort a run. Fetch, decode and storage errors are
//! scoped to a single site, mail errors to a single subscriber; the checker
//! logs those and moves on.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WccError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Fetch error for {url}: {reason}")]
    FetchError { url: String, reason: String },

    #[error("Cannot decode content as '{encoding}': {reason}")]
    DecodeError { encoding: String, reason: String },

    #[error("Snapshot storage error: {0}")]
    StorageError(String),

    #[error("Mail error: {0}")]
    MailError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WccError>;
