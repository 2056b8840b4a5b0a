// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, controlled by --verbose or RUST_LOG)
// 3. Run the check and print the report
// 4. Exit with proper code (0 = success, 1 = broken links, 2 = error)
// =============================================================================

mod check; // src/check.rs - the full pipeline
mod checker; // src/checker/ - resolving and checking links
mod cli; // src/cli.rs - command-line parsing
mod error; // src/error.rs - error types
mod ignore; // src/ignore.rs - ignore list
mod report; // src/report.rs - broken link report
mod scan; // src/scan/ - walking the site

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins when set; otherwise --verbose picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(exit_code(cli).await);
}

// Maps a run onto the process exit code; errors print and become 2
async fn exit_code(cli: Cli) -> i32 {
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    }
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err   = configuration problem, mapped to exit code 2
async fn run(cli: Cli) -> Result<i32> {
    let config = cli.to_config();

    let report = check::link_check(&config).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(if report.is_empty() { 0 } else { 1 });
    }

    if report.is_empty() {
        println!("No broken links found!");
        Ok(0)
    } else {
        eprintln!("\nERROR: The Following Broken Links or Paths were found:\n{report}");
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(["site-linkcheck"].iter().chain(args))
    }

    fn root_arg(root: &Path) -> String {
        root.display().to_string()
    }

    #[tokio::test]
    async fn test_clean_site_exits_zero() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), r#"<a href="about">a</a>"#).unwrap();
        fs::write(dir.path().join("about.html"), "<p>about</p>").unwrap();

        assert_eq!(exit_code(cli(&[&root_arg(dir.path())])).await, 0);
    }

    #[tokio::test]
    async fn test_broken_link_exits_one() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), r#"<a href="missing.html">m</a>"#).unwrap();

        assert_eq!(exit_code(cli(&[&root_arg(dir.path())])).await, 1);
        assert_eq!(exit_code(cli(&[&root_arg(dir.path()), "--json"])).await, 1);
    }

    #[tokio::test]
    async fn test_ignored_broken_link_exits_zero() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), r#"<a href="missing.html">m</a>"#).unwrap();
        let ignore = dir.path().join("ignore.txt");
        fs::write(&ignore, "missing.html\n").unwrap();

        let args = [root_arg(dir.path()), "--config-file".to_string(), root_arg(&ignore)];
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        assert_eq!(exit_code(cli(&args)).await, 0);
    }

    #[tokio::test]
    async fn test_configuration_error_exits_two() {
        let dir = TempDir::new().unwrap();
        let missing_root = dir.path().join("public");

        assert_eq!(exit_code(cli(&[&root_arg(&missing_root)])).await, 2);

        let args = [root_arg(dir.path()), "--config-file".to_string(), root_arg(&dir.path().join("nope.txt"))];
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        assert_eq!(exit_code(cli(&args)).await, 2);
    }
}
