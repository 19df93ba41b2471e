// src/notify/mod.rs

//! Change notifications.
//!
//! The checker hands every [`Notification`] to a [`Mailer`]. Production uses
//! [`SmtpMailer`]; tests plug in a recording implementation.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

pub mod smtp;

pub use smtp::SmtpMailer;

/// A single outbound plain-text message to exactly one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Trait abstracting how notifications are delivered.
pub trait Mailer: Send + Sync {
    fn send<'a>(
        &'a self,
        notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Subject line for a change on `host`: `[<tag>] <host> changed`.
pub fn subject(tag: &str, host: &str) -> String {
    format!("[{tag}] {host} changed")
}
