//! Field labels derived from snake_case metric names

use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("Invalid regex pattern"));

/// Turn a metric name or resolved value into a display label.
///
/// Underscores become spaces, each word is capitalized and the words are
/// joined with single spaces: `date_accepted` becomes `Date Accepted`.
pub fn label_for(value: &str) -> String {
    let spaced = value.replace('_', " ");
    WORD.find_iter(&spaced)
        .map(|word| capitalize(word.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Column key a host uses for a selected field label.
///
/// Inverse of [`label_for`] for lowercase snake_case names:
/// `'Start Date'` comes back from a query keyed as `start_date`.
pub fn key_for(label: &str) -> String {
    let spaced = label.replace('_', " ");
    WORD.find_iter(&spaced)
        .map(|word| word.as_str().to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
