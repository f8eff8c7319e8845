//! # CLI Layer
//!
//! This module is **one possible client** of the safetitle library. It is the
//! only place that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Installs a tracing subscriber
//! - Decides process exit codes
//!
//! ## Structure
//!
//! - `run()`: parses arguments and dispatches (called by `main.rs`)
//! - `handle_*()`: per-command handlers that call the library and print
//! - `print_*()` (in `print.rs`): output formatting

use super::print::{print_json, print_reports, print_rules, CheckReport};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use safetitle::config::GuardConfig;
use safetitle::error::Result;
use safetitle::filename::classify;
use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SAFETITLE_LOG";

/// Runs the CLI and returns the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { names, json } => handle_check(names, json),
        Commands::Rules { dir } => handle_rules(dir),
        Commands::Config { dir } => handle_config(dir),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_check(names: Vec<String>, json: bool) -> Result<i32> {
    let names = if names.is_empty() && !std::io::stdin().is_terminal() {
        read_stdin_names()?
    } else {
        names
    };

    let reports: Vec<CheckReport> = names
        .into_iter()
        .map(|name| {
            let verdict = classify(name.as_str());
            debug!(name = %name, ?verdict, "classified");
            CheckReport::new(name, verdict)
        })
        .collect();

    if json {
        print_json(&reports)?;
    } else {
        print_reports(&reports);
    }

    Ok(if reports.iter().all(|r| r.valid) {
        0
    } else {
        1
    })
}

/// One name per line. Only line endings are stripped, so trailing spaces
/// still count against the name.
fn read_stdin_names() -> Result<Vec<String>> {
    let names = std::io::stdin()
        .lock()
        .lines()
        .collect::<std::io::Result<Vec<String>>>()?;
    Ok(names)
}

/// Loads the guard config from `dir`, or from the user config dir when no
/// directory is given.
fn load_config(dir: Option<PathBuf>) -> Result<GuardConfig> {
    let dir = dir.or_else(|| {
        ProjectDirs::from("com", "safetitle", "safetitle").map(|d| d.config_dir().to_path_buf())
    });
    match dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "loading config");
            GuardConfig::load(dir)
        }
        None => Ok(GuardConfig::default()),
    }
}

fn handle_rules(dir: Option<PathBuf>) -> Result<i32> {
    let config = load_config(dir)?;
    print_rules(&config.confirm_keys);
    Ok(0)
}

fn handle_config(dir: Option<PathBuf>) -> Result<i32> {
    let config = load_config(dir)?;
    print_json(&config)?;
    Ok(0)
}
