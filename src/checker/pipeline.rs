// src/checker/pipeline.rs

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::config::Site;
use crate::errors::Result;
use crate::fetch::{Fetcher, decode};
use crate::notify::{Mailer, Notification, subject};
use crate::snapshot::{SnapshotStore, checksum};

use super::event::ChangeEvent;
use super::summary::{RunSummary, SiteOutcome};
use super::CheckerOptions;

/// Drives one run over a list of sites.
///
/// Sites are handled strictly one after another. An error while checking a
/// site is logged and recorded as [`SiteOutcome::Failed`]; the run always
/// continues with the next site.
pub struct Checker<F, M> {
    fetcher: F,
    mailer: M,
    store: SnapshotStore,
    options: CheckerOptions,
}

impl<F: Fetcher, M: Mailer> Checker<F, M> {
    pub fn new(fetcher: F, mailer: M, store: SnapshotStore, options: CheckerOptions) -> Self {
        Self {
            fetcher,
            mailer,
            store,
            options,
        }
    }

    /// Check every site and return what happened.
    pub async fn run(&self, sites: &[Site]) -> RunSummary {
        let mut summary = RunSummary::default();

        for site in sites {
            let outcome = match self.check_site(site).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!(url = %site.url, error = %err, "cannot check site");
                    SiteOutcome::Failed {
                        notified: 0,
                        failed: 0,
                    }
                }
            };

            match outcome {
                SiteOutcome::FirstSeen => info!(host = %site.host(), "site was never checked before"),
                SiteOutcome::Unchanged => info!(host = %site.host(), "site is unchanged"),
                SiteOutcome::Changed { notified, failed } => warn!(
                    host = %site.host(),
                    notified,
                    failed,
                    "site has an update"
                ),
                SiteOutcome::Failed { .. } => {}
            }
            summary.record(outcome);
        }

        summary
    }

    /// Check a single site.
    ///
    /// Errors are scoped to this site: fetch, decode and storage failures are
    /// returned, mail failures are counted in the outcome. A snapshot that
    /// cannot be saved after subscribers were mailed yields
    /// [`SiteOutcome::Failed`] carrying the mail counts.
    pub async fn check_site(&self, site: &Site) -> Result<SiteOutcome> {
        let id = site.id();
        debug!(url = %site.url, id = %id, "checking site");

        let raw = self.fetcher.fetch(&site.url).await?;
        let new_checksum = checksum(&raw);
        let page = decode(&raw)?;
        debug!(id = %id, encoding = %page.encoding, checksum = %new_checksum, "content fetched");

        let Some(previous) = self.store.load(&id)? else {
            if !self.options.simulate {
                self.store.save(&id, &new_checksum, &raw)?;
            }
            return Ok(SiteOutcome::FirstSeen);
        };

        debug!(id = %id, old = %previous.checksum, new = %new_checksum, "comparing checksums");
        if previous.checksum == new_checksum {
            return Ok(SiteOutcome::Unchanged);
        }

        info!(
            url = %site.url,
            old = %previous.checksum,
            new = %new_checksum,
            "change detected"
        );

        let old_text = decode(&previous.content)?.text;
        let event = ChangeEvent::new(site, old_text, page.text, &previous.modified, &Local::now());

        let (notified, failed) = if self.options.simulate || !self.options.send_mails {
            debug!(url = %site.url, "mails disabled; not notifying");
            (0, 0)
        } else {
            self.notify(site, &event).await
        };

        if !self.options.simulate {
            if let Err(err) = self.store.save(&id, &new_checksum, &raw) {
                error!(
                    url = %site.url,
                    error = %err,
                    notified,
                    "cannot save snapshot after notifying"
                );
                return Ok(SiteOutcome::Failed { notified, failed });
            }
        }

        Ok(SiteOutcome::Changed { notified, failed })
    }

    /// Mail `event` to every subscriber of `site`, one message each.
    ///
    /// Returns `(sent, failed)`.
    async fn notify(&self, site: &Site, event: &ChangeEvent) -> (usize, usize) {
        let subject = subject(&self.options.tag, site.host());
        let body = event.body();

        let mut sent = 0;
        let mut failed = 0;
        for to in &site.subscribers {
            let notification = Notification {
                from: self.options.from.clone(),
                to: to.clone(),
                subject: subject.clone(),
                body: body.clone(),
            };

            match self.mailer.send(&notification).await {
                Ok(()) => {
                    info!(to = %to, url = %event.url, "notification sent");
                    sent += 1;
                }
                Err(err) => {
                    error!(to = %to, url = %event.url, error = %err, "cannot send notification");
                    failed += 1;
                }
            }
        }

        (sent, failed)
    }
}
