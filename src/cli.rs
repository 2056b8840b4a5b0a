// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is a plain struct and clap
// generates the parsing code from the #[...] attributes.
// =============================================================================

use crate::check::CheckConfig;
use crate::checker::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

// The whole CLI: one command, no subcommands
#[derive(Parser, Debug)]
#[command(
    name = "site-linkcheck",
    version,
    about = "Check for broken links recursively in a rendered static site",
    long_about = "site-linkcheck scans every .html/.htm file under a directory, checks that \
                  local links point at files that exist and that remote links respond, and \
                  fails if anything is broken. Run it on your build output before publishing."
)]
pub struct Cli {
    /// Root directory searched recursively for HTML files
    pub path: PathBuf,

    /// Host and path (without protocol) of the web server
    ///
    /// Links to http(s)://[www.]HOST/... are checked as local files.
    #[arg(long)]
    pub host: Option<String>,

    /// Location of a file with URLs or paths to ignore, one per line
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Maximum number of remote links checked at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Timeout for each remote request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> CheckConfig {
        CheckConfig {
            host: self.host.clone().filter(|host| !host.is_empty()),
            ignore_file: self.config_file.clone(),
            concurrency: self.concurrency.max(1),
            timeout: Duration::from_secs(self.timeout),
            ..CheckConfig::new(&self.path)
        }
    }
}
