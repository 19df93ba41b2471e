// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::settings::{RawSettings, Settings};
use crate::config::sites::{Site, parse_sites};
use crate::errors::{Result, WccError};

/// Read and parse the sites file.
///
/// Fails on the first malformed line; no site is returned in that case.
pub fn load_sites(path: impl AsRef<Path>) -> Result<Vec<Site>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        WccError::ConfigError(format!("cannot read sites file {}: {e}", path.display()))
    })?;

    let sites = parse_sites(&contents)?;
    debug!(
        path = %path.display(),
        count = sites.len(),
        "loaded sites"
    );
    for site in &sites {
        debug!(
            id = %site.id(),
            host = %site.host(),
            url = %site.url,
            strip_markup = site.strip_markup,
            subscribers = site.subscribers.len(),
            "site"
        );
    }

    Ok(sites)
}

/// Load a settings file and return the raw, unvalidated model.
///
/// Callers may still override values before validating with
/// [`Settings::try_from`].
pub fn load_settings_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        WccError::ConfigError(format!("cannot read settings file {}: {e}", path.display()))
    })?;
    let settings: RawSettings = toml::from_str(&contents)?;
    Ok(settings)
}

/// Load a settings file and validate it.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_settings_from_path(path)?;
    Settings::try_from(raw)
}
