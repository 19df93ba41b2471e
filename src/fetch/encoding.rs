// src/fetch/encoding.rs

//! Best-effort charset detection.
//!
//! Only the first line carrying a `<meta ... content-type ...>` tag is looked
//! at; its `charset=` value names the encoding. Anything else falls back to
//! UTF-8. Decoding is strict: malformed input is an error rather than a
//! string full of replacement characters.

use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::bytes::Regex;
use tracing::debug;

use crate::errors::{Result, WccError};

/// Encoding assumed when the page does not declare one.
pub const DEFAULT_ENCODING: &str = "utf-8";

static META_CONTENT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)<meta.*?content-type.*?>").expect("meta content-type pattern is valid")
});

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta.*charset=["']?([a-z0-9_-]*)"#).expect("charset pattern is valid")
});

/// Page content decoded to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    /// Lower-cased charset label that was used.
    pub encoding: String,
    pub text: String,
}

/// Find the declared charset of `raw`, lower-cased, or [`DEFAULT_ENCODING`].
pub fn detect_charset(raw: &[u8]) -> String {
    for line in raw.split_inclusive(|&b| b == b'\n') {
        if !META_CONTENT_TYPE.is_match(line) {
            continue;
        }

        let declared = META_CHARSET
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).to_lowercase())
            .filter(|label| !label.is_empty());

        if let Some(label) = declared {
            return label;
        }
        break;
    }

    DEFAULT_ENCODING.to_string()
}

/// Decode `raw` using the charset declared in its markup.
pub fn decode(raw: &[u8]) -> Result<DecodedPage> {
    let label = detect_charset(raw);
    debug!(encoding = %label, "resolved encoding");

    let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| WccError::DecodeError {
        encoding: label.clone(),
        reason: "unknown charset".to_string(),
    })?;

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(raw)
        .ok_or_else(|| WccError::DecodeError {
            encoding: label.clone(),
            reason: "malformed byte sequence".to_string(),
        })?
        .into_owned();

    Ok(DecodedPage {
        encoding: label,
        text,
    })
}
