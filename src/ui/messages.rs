use std::fmt;

use crate::utils::colors::{BLUE, BOLD, GREEN, RED, YELLOW, paint};

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_RAMEN: &str = "🍜";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", paint(&[BLUE, BOLD], ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", paint(&[GREEN, BOLD], ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", paint(&[YELLOW, BOLD], ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", paint(&[RED, BOLD], ICON_ERR), msg);
}

/// Blocking alert shown when an interactive action fails. The screen stays
/// usable afterwards.
pub fn alert<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", paint(&[RED, BOLD], "[!]"), msg);
}

/// Formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}",
        paint(&[BLUE, BOLD], &format!("{} ====================== {}", ICON_RAMEN, msg))
    );
}
