use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use wcc::errors::{Result, WccError};
use wcc::fetch::Fetcher;
use wcc::notify::{Mailer, Notification};

#[derive(Debug, Clone)]
enum FakePage {
    Body(Vec<u8>),
    Unreachable(String),
}

/// A fetcher serving pages from memory.
///
/// Clones share state, so a test can keep one handle to change pages
/// between runs while the checker owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    pages: Arc<Mutex<HashMap<String, FakePage>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), FakePage::Body(body.into()));
    }

    /// Make every fetch of `url` fail with `reason`.
    pub fn set_unreachable(&self, url: &str, reason: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), FakePage::Unreachable(reason.to_string()));
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        self.requests.lock().unwrap().push(url.to_string());
        let page = self.pages.lock().unwrap().get(url).cloned();

        Box::pin(async move {
            match page {
                Some(FakePage::Body(body)) => Ok(body),
                Some(FakePage::Unreachable(reason)) => Err(WccError::FetchError {
                    url: url.to_string(),
                    reason,
                }),
                None => Err(WccError::FetchError {
                    url: url.to_string(),
                    reason: "server returned 404 Not Found".to_string(),
                }),
            }
        })
    }
}

/// A mailer that records every notification instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<Notification>>>,
    rejected: Arc<Mutex<HashSet<String>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make delivery to `address` fail.
    pub fn reject(&self, address: &str) {
        self.rejected.lock().unwrap().insert(address.to_string());
    }

    /// Notifications delivered so far, in order.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send<'a>(
        &'a self,
        notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let rejected = self.rejected.lock().unwrap().contains(&notification.to);
        if !rejected {
            self.sent.lock().unwrap().push(notification.clone());
        }

        Box::pin(async move {
            if rejected {
                Err(WccError::MailError(format!(
                    "relay rejected recipient {}",
                    notification.to
                )))
            } else {
                Ok(())
            }
        })
    }
}
