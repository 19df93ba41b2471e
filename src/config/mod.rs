// src/config/mod.rs

//! Configuration loading and validation for wcc.
//!
//! Responsibilities:
//! - Parse the flat sites file into [`Site`] records (`sites.rs`).
//! - Define the TOML-backed settings model (`settings.rs`).
//! - Load both from disk (`loader.rs`).

pub mod loader;
pub mod settings;
pub mod sites;

pub use loader::{load_settings, load_settings_from_path, load_sites};
pub use settings::{MailSection, RawSettings, Settings, StorageSection};
pub use sites::{
    COMMENT_MARKER, DEFAULT_SITES_FILE, FIELD_DELIMITER, STRIP_MARKUP_YES, Site, parse_sites,
};
