//! Patient name and report date recovery from header lines.
//!
//! These lines are noise to the parameter cascade, so they are scanned
//! separately over the raw text. The first hit for each field wins.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::ReportMetadata;

static PATIENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^patient(?:\s+name)?\s*:\s*(.+)$").unwrap());

static DATE_LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:report\s+date|date|collected)\s*:\s*(.+)$").unwrap()
});

/// Date token at line start, numeric or with an English month name.
static BARE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(\d{4}-\d{2}-\d{2}|\d{1,2}[/-]\d{1,2}[/-]\d{4}|\d{1,2}\s+[a-z]+\s+\d{4}|[a-z]+\s+\d{1,2},?\s+\d{4})",
    )
    .unwrap()
});

/// Parse a report date in the formats lab reports commonly print.
///
/// Numeric slashed dates are read day-first, then month-first, so
/// `03/04/2024` is 3 April and `12/25/2024` falls back to 25 December.
pub fn parse_report_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim().trim_end_matches(['.', ',']);
    if trimmed.is_empty() {
        return None;
    }

    const FORMATS: [&str; 7] = [
        "%Y-%m-%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%d-%m-%Y",
        "%d %B %Y",
        "%B %d, %Y",
        "%B %d %Y",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Leading date token of a line, if it parses.
fn leading_date(line: &str) -> Option<NaiveDate> {
    let token = BARE_DATE.captures(line)?.get(1)?.as_str();
    parse_report_date(token)
}

fn patient_name(line: &str) -> Option<String> {
    let caps = PATIENT_LINE.captures(line)?;
    let name = caps.get(1)?.as_str().trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn labelled_date(line: &str) -> Option<NaiveDate> {
    let caps = DATE_LABEL_LINE.captures(line)?;
    leading_date(caps.get(1)?.as_str().trim())
}

/// Scan a document's lines for the patient name and report date.
pub fn scan_metadata(text: &str) -> ReportMetadata {
    let mut metadata = ReportMetadata::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if metadata.patient_name.is_none() {
            metadata.patient_name = patient_name(line);
        }
        if metadata.report_date.is_none() {
            metadata.report_date = labelled_date(line).or_else(|| leading_date(line));
        }
        if metadata.patient_name.is_some() && metadata.report_date.is_some() {
            break;
        }
    }

    tracing::debug!(
        has_patient = metadata.patient_name.is_some(),
        has_date = metadata.report_date.is_some(),
        "Report metadata scanned"
    );
    metadata
}
