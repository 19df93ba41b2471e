// src/fetch/mod.rs

//! Retrieving page content and turning it into text.
//!
//! The checker talks to a [`Fetcher`] instead of an HTTP client directly, so
//! tests can serve pages from memory. [`HttpFetcher`] is the production
//! implementation.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

pub mod encoding;
pub mod http;

pub use encoding::{DEFAULT_ENCODING, DecodedPage, decode, detect_charset};
pub use http::HttpFetcher;

/// Trait abstracting how the raw content of a URL is retrieved.
pub trait Fetcher: Send + Sync {
    /// Fetch `url` once and return the response body as raw bytes.
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}
