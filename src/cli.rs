// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_SITES_FILE;

/// Command-line arguments for `wcc`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wcc",
    version,
    about = "Check web pages for changes and mail a diff to subscribers.",
    long_about = None
)]
pub struct CliArgs {
    /// Sites file with one `url;strip_markup;email;...` record per line.
    #[arg(value_name = "CONF", default_value = DEFAULT_SITES_FILE)]
    pub sites: PathBuf,

    /// Optional TOML settings file (mail relay, sender, storage dir, tag).
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Show only errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Output more information.
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug output (wins over `--quiet`).
    #[arg(short, long)]
    pub debug: bool,

    /// Directory holding the per-site snapshot files.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Check for changes but neither send mails nor save snapshots.
    #[arg(short, long)]
    pub simulate: bool,

    /// Remove all snapshot files before checking.
    #[arg(short, long)]
    pub clean: bool,

    /// Tag used in the subject of notification mails.
    #[arg(short, long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Do not send any mails (snapshots are still updated).
    #[arg(short = 'n', long)]
    pub no_mails: bool,

    /// Sender address of notification mails.
    #[arg(short, long, value_name = "MAIL")]
    pub from: Option<String>,

    /// Host of the SMTP relay.
    #[arg(long, value_name = "HOST")]
    pub smtp_host: Option<String>,

    /// Port of the SMTP relay.
    #[arg(long, value_name = "PORT")]
    pub smtp_port: Option<u16>,
}

/// Log level selected by the verbosity flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Info,
    Debug,
}

impl CliArgs {
    /// Level implied by `-q` / `-v` / `-d`, or `None` when none was given.
    pub fn log_level(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Debug)
        } else if self.quiet {
            Some(LogLevel::Error)
        } else if self.verbose {
            Some(LogLevel::Info)
        } else {
            None
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
