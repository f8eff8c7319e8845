//! # Safetitle CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/safetitle/cli/`,
//! and this file only invokes `cli::run()` and turns its outcome into a
//! process exit code. Everything the CLI does is also available from the
//! library, which is where the guard and the classifier live.
//!
//! - `safetitle check <NAME>...` classifies names (or stdin lines) and exits
//!   with status 1 if any of them is invalid.
//! - `safetitle rules` prints the rule set with its messages.
//! - `safetitle config` prints the effective guard configuration.

mod cli;

fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
