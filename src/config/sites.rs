// src/config/sites.rs

use url::Url;

use crate::errors::{Result, WccError};
use crate::snapshot::site_id;

/// Sites file used when none is given on the command line.
pub const DEFAULT_SITES_FILE: &str = "conf";

/// Separates the fields of a record.
pub const FIELD_DELIMITER: char = ';';

/// Lines starting with this marker (after trimming) are ignored.
pub const COMMENT_MARKER: char = '#';

/// Value of the second field that enables markup stripping.
pub const STRIP_MARKUP_YES: &str = "yes";

/// One monitored page, as configured by a line like:
///
/// ```text
/// https://example.org/news;yes;me@example.org;Other Person <other@example.org>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// URL exactly as written in the sites file.
    pub url: String,

    /// Remove tags and resolve named entities in the rendered diff.
    pub strip_markup: bool,

    /// Recipients, either `user@host` or `Name <user@host>`.
    pub subscribers: Vec<String>,

    uri: Url,
}

impl Site {
    pub fn new(
        url: impl Into<String>,
        strip_markup: bool,
        subscribers: Vec<String>,
    ) -> Result<Self> {
        let url = url.into();
        let uri = Url::parse(&url)
            .map_err(|e| WccError::ConfigError(format!("invalid url '{url}': {e}")))?;

        Ok(Self {
            url,
            strip_markup,
            subscribers,
            uri,
        })
    }

    /// Short identifier naming this site's snapshot files.
    pub fn id(&self) -> String {
        site_id(&self.url)
    }

    /// Host part of the URL; credentials, port and path are not included.
    pub fn host(&self) -> &str {
        self.uri.host_str().unwrap_or_default()
    }

    /// Render the site back into its sites-file form.
    pub fn to_line(&self) -> String {
        let mut fields = vec![
            self.url.clone(),
            if self.strip_markup { STRIP_MARKUP_YES } else { "no" }.to_string(),
        ];
        fields.extend(self.subscribers.iter().cloned());
        fields.join(&FIELD_DELIMITER.to_string())
    }
}

/// Parse the contents of a sites file.
///
/// Blank lines and comments are skipped. Any other line must have at least
/// the URL and the strip-markup field, otherwise the whole file is rejected.
pub fn parse_sites(contents: &str) -> Result<Vec<Site>> {
    let mut sites = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
        let [url, flag, rest @ ..] = fields.as_slice() else {
            return Err(WccError::ConfigError(format!(
                "line {lineno}: expected `url{FIELD_DELIMITER}strip_markup[{FIELD_DELIMITER}email...]`, got '{line}'"
            )));
        };

        let subscribers = rest
            .iter()
            .filter(|addr| !addr.is_empty())
            .map(|addr| addr.to_string())
            .collect();

        let site = Site::new(*url, *flag == STRIP_MARKUP_YES, subscribers).map_err(|e| match e {
            WccError::ConfigError(msg) => WccError::ConfigError(format!("line {lineno}: {msg}")),
            other => other,
        })?;
        sites.push(site);
    }

    Ok(sites)
}
