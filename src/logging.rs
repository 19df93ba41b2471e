// src/logging.rs

//! Diagnostics for `wcc` go through `tracing`, printed on STDERR so that
//! cron only mails output when something is worth reading.
//!
//! The level is taken from the first of these that is set:
//! 1. `-q` / `-v` / `-d`
//! 2. the `WCC_LOG` environment variable (`error`, `warn`, `info`, ...)
//! 3. `warn`: changes and failures only

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable consulted when no verbosity flag is given.
pub const LOG_ENV_VAR: &str = "WCC_LOG";

/// Install the global subscriber. Call once, before the run starts.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(cli_level, env_level.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn resolve_level(cli_level: Option<LogLevel>, env_level: Option<&str>) -> Level {
    match cli_level {
        Some(LogLevel::Error) => Level::ERROR,
        Some(LogLevel::Info) => Level::INFO,
        Some(LogLevel::Debug) => Level::DEBUG,
        None => env_level.and_then(parse_level).unwrap_or(Level::WARN),
    }
}

fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
