// src/checker/event.rs

use chrono::{DateTime, Local};

use crate::config::Site;
use crate::diff::{render_body, strip_markup, unified_diff};

/// A detected change of one site, alive only while it is being reported.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub url: String,
    pub old_content: String,
    pub new_content: String,
    /// Unified diff, already stripped of markup if the site asks for it.
    pub diff_text: String,
}

impl ChangeEvent {
    pub fn new(
        site: &Site,
        old_content: String,
        new_content: String,
        old_time: &DateTime<Local>,
        new_time: &DateTime<Local>,
    ) -> Self {
        let diff_text = unified_diff(&old_content, &new_content, old_time, new_time);
        let diff_text = if site.strip_markup {
            strip_markup(&diff_text)
        } else {
            diff_text
        };

        Self {
            url: site.url.clone(),
            old_content,
            new_content,
            diff_text,
        }
    }

    /// Mail body: a banner naming the URL followed by the diff.
    pub fn body(&self) -> String {
        render_body(&self.url, &self.diff_text)
    }
}
