// src/lib.rs

pub mod checker;
pub mod cli;
pub mod config;
pub mod diff;
pub mod errors;
pub mod fetch;
pub mod logging;
pub mod notify;
pub mod snapshot;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::checker::{Checker, CheckerOptions, RunSummary};
use crate::cli::CliArgs;
use crate::config::{RawSettings, Settings, load_settings_from_path, load_sites};
use crate::fetch::HttpFetcher;
use crate::notify::SmtpMailer;
use crate::snapshot::SnapshotStore;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (file + CLI overrides) and the sites file
/// - the snapshot store (optionally cleaned first)
/// - the HTTP fetcher and SMTP mailer
/// - one sequential checker run
///
/// Configuration problems are returned before any network access. Failures
/// of individual sites or subscribers only show up in the returned summary.
pub async fn run(args: CliArgs) -> Result<RunSummary> {
    let settings = resolve_settings(&args)?;
    let sites = load_sites(&args.sites)?;
    info!(
        sites = sites.len(),
        dir = %settings.storage.dir.display(),
        "configuration loaded"
    );

    let store = SnapshotStore::new(&settings.storage.dir);
    if args.clean {
        warn!(dir = %store.dir().display(), "cleaning up snapshot files");
        store.clean()?;
    }

    let options = CheckerOptions {
        tag: settings.tag.clone(),
        from: settings.mail.from.clone(),
        send_mails: !args.no_mails,
        simulate: args.simulate,
    };
    debug!(?options, "checker options");

    let fetcher = HttpFetcher::new()?;
    let mailer = SmtpMailer::new(&settings.mail.host, settings.mail.port)?;
    let checker = Checker::new(fetcher, mailer, store, options);

    let summary = checker.run(&sites).await;
    info!(
        sites = summary.sites(),
        first_seen = summary.first_seen,
        unchanged = summary.unchanged,
        changed = summary.changed,
        failed_sites = summary.failed_sites,
        mails_sent = summary.mails_sent,
        mails_failed = summary.mails_failed,
        "run complete"
    );
    if summary.has_failures() {
        warn!(
            failed_sites = summary.failed_sites,
            mails_failed = summary.mails_failed,
            "run finished with failures"
        );
    }

    Ok(summary)
}

/// Merge the optional settings file with CLI overrides and validate.
pub fn resolve_settings(args: &CliArgs) -> Result<Settings> {
    let mut raw = match &args.settings {
        Some(path) => load_settings_from_path(path)?,
        None => RawSettings::default(),
    };

    if let Some(tag) = &args.tag {
        raw.tag = tag.clone();
    }
    if let Some(from) = &args.from {
        raw.mail.from = from.clone();
    }
    if let Some(host) = &args.smtp_host {
        raw.mail.host = host.clone();
    }
    if let Some(port) = args.smtp_port {
        raw.mail.port = port;
    }
    if let Some(dir) = &args.dir {
        raw.storage.dir = dir.clone();
    }

    Ok(Settings::try_from(raw)?)
}
