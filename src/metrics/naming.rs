//! Card references of the form `#<number> <name>`
//!
//! Project variables such as "Current Release" hold a card reference like
//! `#2 Release Two`; queries need either the number or the name.

use once_cell::sync::Lazy;
use regex::Regex;

static CARD_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\d+ (.*)").expect("Invalid regex pattern"));
static CARD_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(\d+)").expect("Invalid regex pattern"));

/// Name part of a card reference
pub fn card_name(reference: &str) -> Option<&str> {
    CARD_NAME
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Number part of a card reference
pub fn card_number(reference: &str) -> Option<u32> {
    CARD_NUMBER
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Release name used in queries, `Unknown` when the reference has none
pub fn release_name(reference: &str) -> String {
    card_name(reference).unwrap_or("Unknown").to_string()
}

pub fn release_number(reference: &str) -> Option<u32> {
    card_number(reference)
}

pub fn iteration_number(reference: &str) -> Option<u32> {
    card_number(reference)
}
