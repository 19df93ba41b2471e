// src/checker/summary.rs

/// What happened to a single site during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteOutcome {
    /// No snapshot existed; one was created and nobody was notified.
    FirstSeen,
    /// Checksum matched the snapshot; nothing was written.
    Unchanged,
    /// Checksum differed; subscribers were mailed and the snapshot replaced.
    Changed { notified: usize, failed: usize },
    /// The site could not be checked (fetch, decode or storage error).
    ///
    /// Mails already delivered before the error are still counted.
    Failed { notified: usize, failed: usize },
}

/// Counters over all sites of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub first_seen: usize,
    pub unchanged: usize,
    pub changed: usize,
    pub failed_sites: usize,
    pub mails_sent: usize,
    pub mails_failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: SiteOutcome) {
        match outcome {
            SiteOutcome::FirstSeen => self.first_seen += 1,
            SiteOutcome::Unchanged => self.unchanged += 1,
            SiteOutcome::Changed { notified, failed } => {
                self.changed += 1;
                self.mails_sent += notified;
                self.mails_failed += failed;
            }
            SiteOutcome::Failed { notified, failed } => {
                self.failed_sites += 1;
                self.mails_sent += notified;
                self.mails_failed += failed;
            }
        }
    }

    /// Number of sites processed, successfully or not.
    pub fn sites(&self) -> usize {
        self.first_seen + self.unchanged + self.changed + self.failed_sites
    }

    pub fn has_failures(&self) -> bool {
        self.failed_sites > 0 || self.mails_failed > 0
    }
}
