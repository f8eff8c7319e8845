use colored::Colorize;
use safetitle::constants::{
    FORBIDDEN_CHARS, RESERVED_DEVICE_NAMES, RESERVED_DOT_NAMES, RESERVED_NUMBERED_DEVICES,
};
use safetitle::error::Result;
use safetitle::filename::{InvalidReason, Verdict};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const MAX_NAME_WIDTH: usize = 40;

/// One classified name, as printed by `check`.
#[derive(Debug, Clone, Serialize)]
pub(super) struct CheckReport {
    pub name: String,
    pub valid: bool,
    pub reason: Option<InvalidReason>,
    pub message: Option<&'static str>,
}

impl CheckReport {
    pub fn new(name: String, verdict: Verdict) -> Self {
        let reason = verdict.reason();
        Self {
            name,
            valid: verdict.is_valid(),
            reason,
            message: reason.map(InvalidReason::message),
        }
    }
}

pub(super) fn reason_label(reason: InvalidReason) -> &'static str {
    match reason {
        InvalidReason::Empty => "empty",
        InvalidReason::ForbiddenCharacter => "forbidden character",
        InvalidReason::InvalidEnding => "invalid ending",
        InvalidReason::Reserved => "reserved name",
    }
}

/// Renders one line per report, with names padded to a shared column.
pub(super) fn render_reports(reports: &[CheckReport]) -> String {
    let shown: Vec<String> = reports
        .iter()
        .map(|r| r.name.escape_debug().to_string())
        .collect();
    let width = shown
        .iter()
        .map(|name| name.width())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);

    let mut out = String::new();
    for (report, name) in reports.iter().zip(&shown) {
        let padding = " ".repeat(width.saturating_sub(name.width()));
        let status = match (report.reason, report.message) {
            (Some(reason), Some(message)) => {
                format!("{} {}", reason_label(reason).red().bold(), message.dimmed())
            }
            _ => "valid".green().to_string(),
        };
        out.push_str(&format!("{}{}  {}\n", name, padding, status));
    }
    out
}

pub(super) fn print_reports(reports: &[CheckReport]) {
    print!("{}", render_reports(reports));
}

pub(super) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the rule set. `confirm_keys` comes from the loaded config, so a
/// `safetitle.toml` override shows up here.
pub(super) fn print_rules(confirm_keys: &[String]) {
    let chars: Vec<String> = FORBIDDEN_CHARS.iter().map(char::to_string).collect();
    let mut reserved: Vec<String> = RESERVED_DEVICE_NAMES
        .iter()
        .map(|n| n.to_string())
        .collect();
    for device in RESERVED_NUMBERED_DEVICES {
        reserved.push(format!("{}[0-9]", device));
    }
    reserved.extend(RESERVED_DOT_NAMES.iter().map(|n| n.to_string()));

    println!("{}", "Forbidden characters".bold());
    println!("  {}  and control codes 0x00-0x1F", chars.join(" "));
    let heading = "Reserved names (any case, with or without extension)";
    println!("{}", heading.bold());
    println!("  {}", reserved.join(" "));
    println!("{}", "Invalid endings".bold());
    println!("  a trailing dot or space");
    println!("{}", "Commit keys".bold());
    println!("  {}", confirm_keys.join(" "));
    println!();
    for reason in [
        InvalidReason::ForbiddenCharacter,
        InvalidReason::InvalidEnding,
        InvalidReason::Reserved,
    ] {
        println!("{}: {}", reason_label(reason).yellow(), reason.message());
    }
}
