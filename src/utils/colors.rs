//! ANSI color helper utilities for terminal output.

use std::io::IsTerminal;
use std::sync::OnceLock;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Colors are used only on a terminal and never when `NO_COLOR` is set.
pub fn enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    })
}

/// Wrap `text` in the given escape codes when colors are enabled.
pub fn paint(codes: &[&str], text: &str) -> String {
    if !enabled() {
        return text.to_string();
    }
    format!("{}{}{}", codes.concat(), text, RESET)
}

/// Grey out placeholders such as "-" or an empty cell.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        paint(&[GREY], value)
    } else {
        value.to_string()
    }
}
