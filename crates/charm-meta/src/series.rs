//! Series name validity.

use std::sync::LazyLock;

use regex::Regex;

static SERIES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+([a-z0-9]+)?$").expect("valid regex"));

/// Whether `series` is a well-formed series name: lowercase letters,
/// optionally followed by lowercase letters and digits.
pub fn is_valid_series(series: &str) -> bool {
    SERIES_RE.is_match(series)
}
