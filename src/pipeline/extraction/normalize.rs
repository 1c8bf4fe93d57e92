use std::sync::LazyLock;

use regex::Regex;

/// Boilerplate words OCR leaves in front of a parameter name ("Test Glucose").
static NAME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:test|lab|result|value)\s+").unwrap());

/// Labels in front of a reference range ("Ref: 70-100", "Normal = 3.5-5").
static RANGE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:reference|normal|ref|range)\b\.?\s*[:=]?\s*").unwrap()
});

/// Clean a captured parameter name.
///
/// Keeps letters, digits, whitespace, `-`, `/`, `(` and `)`; collapses
/// whitespace; strips leading "test"/"lab"/"result"/"value" words.
/// Prefixes are stripped repeatedly so the result is idempotent
/// ("Test Lab Glucose" -> "Glucose").
pub fn clean_name(raw: &str) -> String {
    let kept: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '/' | '(' | ')'))
        .collect();

    let mut name = collapse_whitespace(&kept);
    while let Some(m) = NAME_PREFIX.find(&name) {
        name = name[m.end()..].trim().to_string();
    }
    name
}

/// Clean a captured reference range by stripping its label.
/// Idempotent: "Ref Range: 70-100" -> "70-100".
pub fn clean_range(raw: &str) -> String {
    let mut range = raw.trim().to_string();
    while let Some(m) = RANGE_PREFIX.find(&range) {
        range = range[m.end()..].trim().to_string();
    }
    range
}

/// Trim and collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
