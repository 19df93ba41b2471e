// src/snapshot/hash.rs

use blake3::Hasher;

/// Number of hex characters kept for a site identifier.
pub const SITE_ID_LEN: usize = 8;

/// Checksum of raw fetched content, as lowercase hex.
pub fn checksum(content: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(content);
    hasher.finalize().to_hex().to_string()
}

/// Derive the short identifier used to name a site's snapshot files.
///
/// Deterministic in the URL text, so the same line in the sites file always
/// maps to the same files.
pub fn site_id(url: &str) -> String {
    let hex = blake3::hash(url.as_bytes()).to_hex();
    hex.as_str()[..SITE_ID_LEN].to_string()
}
