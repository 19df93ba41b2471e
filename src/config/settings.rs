// src/config/settings.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::{Result, WccError};

/// Settings as read from the optional TOML file.
///
/// ```toml
/// tag = "web change checker2"
///
/// [mail]
/// host = "localhost"
/// port = 25
/// from = "wcc@localhost"
///
/// [storage]
/// dir = "/var/tmp/wcc"
/// ```
///
/// All keys are optional. Use [`Settings::try_from`] to validate.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSettings {
    /// Tag shown in brackets at the start of every mail subject.
    #[serde(default = "default_tag")]
    pub tag: String,

    #[serde(default)]
    pub mail: MailSection,

    #[serde(default)]
    pub storage: StorageSection,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            mail: MailSection::default(),
            storage: StorageSection::default(),
        }
    }
}

/// `[mail]` section: the local relay and the sender address.
///
/// The relay is used without authentication; STARTTLS is attempted when the
/// relay offers it.
#[derive(Debug, Clone, Deserialize)]
pub struct MailSection {
    #[serde(default = "default_mail_host")]
    pub host: String,

    #[serde(default = "default_mail_port")]
    pub port: u16,

    #[serde(default = "default_mail_from")]
    pub from: String,
}

impl Default for MailSection {
    fn default() -> Self {
        Self {
            host: default_mail_host(),
            port: default_mail_port(),
            from: default_mail_from(),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    /// Directory holding `<id>.hash` / `<id>.site` snapshot files.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

fn default_tag() -> String {
    "web change checker2".to_string()
}

fn default_mail_host() -> String {
    "localhost".to_string()
}

fn default_mail_port() -> u16 {
    25
}

fn default_mail_from() -> String {
    "wcc@localhost".to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("/var/tmp/wcc")
}

/// Validated settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tag: String,
    pub mail: MailSection,
    pub storage: StorageSection,
}

impl TryFrom<RawSettings> for Settings {
    type Error = WccError;

    fn try_from(raw: RawSettings) -> Result<Self> {
        if raw.tag.trim().is_empty() {
            return Err(WccError::ConfigError("tag must not be empty".to_string()));
        }
        if raw.mail.host.trim().is_empty() {
            return Err(WccError::ConfigError(
                "[mail].host must not be empty".to_string(),
            ));
        }
        if raw.mail.port == 0 {
            return Err(WccError::ConfigError(
                "[mail].port must be >= 1 (got 0)".to_string(),
            ));
        }
        raw.mail
            .from
            .parse::<lettre::message::Mailbox>()
            .map_err(|e| {
                WccError::ConfigError(format!(
                    "[mail].from '{}' is not a valid address: {e}",
                    raw.mail.from
                ))
            })?;

        Ok(Settings {
            tag: raw.tag,
            mail: raw.mail,
            storage: raw.storage,
        })
    }
}
