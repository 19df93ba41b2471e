#![allow(dead_code)]

use std::path::Path;

use wcc::checker::{Checker, CheckerOptions};
use wcc::config::Site;
use wcc::snapshot::SnapshotStore;

use crate::fakes::{FakeFetcher, RecordingMailer};

pub const TEST_TAG: &str = "wcc-test";
pub const TEST_FROM: &str = "monitor@x.test";

/// Builder for `Site` to simplify test setup.
pub struct SiteBuilder {
    url: String,
    strip_markup: bool,
    subscribers: Vec<String>,
}

impl SiteBuilder {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            strip_markup: false,
            subscribers: Vec::new(),
        }
    }

    pub fn strip_markup(mut self, val: bool) -> Self {
        self.strip_markup = val;
        self
    }

    pub fn subscriber(mut self, address: &str) -> Self {
        self.subscribers.push(address.to_string());
        self
    }

    pub fn build(self) -> Site {
        Site::new(self.url, self.strip_markup, self.subscribers)
            .expect("Failed to build valid site from builder")
    }
}

/// Builder for `CheckerOptions`, defaulting to mails on and no simulation.
pub struct CheckerOptionsBuilder {
    options: CheckerOptions,
}

impl CheckerOptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: CheckerOptions {
                tag: TEST_TAG.to_string(),
                from: TEST_FROM.to_string(),
                send_mails: true,
                simulate: false,
            },
        }
    }

    pub fn send_mails(mut self, val: bool) -> Self {
        self.options.send_mails = val;
        self
    }

    pub fn simulate(mut self, val: bool) -> Self {
        self.options.simulate = val;
        self
    }

    pub fn build(self) -> CheckerOptions {
        self.options
    }
}

impl Default for CheckerOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A checker over fakes, storing snapshots under `dir`.
///
/// Build a fresh one per simulated run; the fakes keep their state across
/// runs because clones share it.
pub fn fake_checker(
    dir: &Path,
    fetcher: &FakeFetcher,
    mailer: &RecordingMailer,
    options: CheckerOptions,
) -> Checker<FakeFetcher, RecordingMailer> {
    Checker::new(
        fetcher.clone(),
        mailer.clone(),
        SnapshotStore::new(dir),
        options,
    )
}
