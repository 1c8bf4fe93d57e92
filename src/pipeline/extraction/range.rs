//! Out-of-range evaluation for a measured value against a normalized
//! reference range expression.
//!
//! Total by construction: malformed values or ranges resolve to
//! "not out of range" instead of an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fixed blood pressure thresholds applied to compound `systolic/diastolic` values.
const SYSTOLIC_HIGH: u32 = 140;
const DIASTOLIC_HIGH: u32 = 90;
const SYSTOLIC_LOW: u32 = 90;
const DIASTOLIC_LOW: u32 = 60;

/// Range templates, tried in this order (compiled once via LazyLock).
static RE_INTERVAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*\.?\d+)\s*[-\u{2013}]\s*(\d*\.?\d+)").unwrap());
static RE_INTERVAL_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d*\.?\d+)\s*to\s*(\d*\.?\d+)").unwrap());
static RE_BELOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*(=)?\s*(\d*\.?\d+)").unwrap());
static RE_ABOVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s*(=)?\s*(\d*\.?\d+)").unwrap());
static RE_AT_LEAST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*\.?\d+)\s*\+").unwrap());

static RE_COMPOUND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)/(\d+)").unwrap());
static RE_LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d*\.?\d+)").unwrap());

/// A parsed reference range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceRange {
    /// `A-B` or `A to B`, both ends inclusive.
    Interval { low: f64, high: f64 },
    /// `< A` (or `<= A` when `inclusive`).
    Below { limit: f64, inclusive: bool },
    /// `> A` (or `>= A` when `inclusive`).
    Above { limit: f64, inclusive: bool },
    /// `A+`, an open-ended minimum.
    AtLeast { min: f64 },
}

impl ReferenceRange {
    /// Parse the first matching range template, or `None` if none applies.
    pub fn parse(range: &str) -> Option<Self> {
        if let Some(caps) = RE_INTERVAL
            .captures(range)
            .or_else(|| RE_INTERVAL_TO.captures(range))
        {
            let low = caps.get(1)?.as_str().parse().ok()?;
            let high = caps.get(2)?.as_str().parse().ok()?;
            return Some(Self::Interval { low, high });
        }
        if let Some(caps) = RE_BELOW.captures(range) {
            return Some(Self::Below {
                limit: caps.get(2)?.as_str().parse().ok()?,
                inclusive: caps.get(1).is_some(),
            });
        }
        if let Some(caps) = RE_ABOVE.captures(range) {
            return Some(Self::Above {
                limit: caps.get(2)?.as_str().parse().ok()?,
                inclusive: caps.get(1).is_some(),
            });
        }
        if let Some(caps) = RE_AT_LEAST.captures(range) {
            return Some(Self::AtLeast {
                min: caps.get(1)?.as_str().parse().ok()?,
            });
        }
        None
    }

    /// Whether `value` falls outside this range.
    pub fn excludes(&self, value: f64) -> bool {
        match *self {
            Self::Interval { low, high } => value < low || value > high,
            Self::Below { limit, inclusive: false } => value >= limit,
            Self::Below { limit, inclusive: true } => value > limit,
            Self::Above { limit, inclusive: false } => value <= limit,
            Self::Above { limit, inclusive: true } => value < limit,
            Self::AtLeast { min } => value < min,
        }
    }
}

/// Decide whether a measured value is outside its reference range.
///
/// Compound `systolic/diastolic` values are judged against fixed blood
/// pressure thresholds whether or not a range was printed. Plain values
/// need a parseable range; anything unparseable is "not out of range".
pub fn is_out_of_range(value: &str, normal_range: &str) -> bool {
    if value.contains('/') {
        return is_compound_out_of_range(value);
    }

    let Some(number) = parse_leading_number(value) else {
        return false;
    };

    if normal_range.trim().is_empty() {
        return false;
    }

    ReferenceRange::parse(normal_range).is_some_and(|range| range.excludes(number))
}

fn is_compound_out_of_range(value: &str) -> bool {
    let Some(caps) = RE_COMPOUND.captures(value) else {
        return false;
    };
    let (Ok(systolic), Ok(diastolic)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
        return false;
    };

    let high = systolic >= SYSTOLIC_HIGH || diastolic >= DIASTOLIC_HIGH;
    let low = systolic < SYSTOLIC_LOW || diastolic < DIASTOLIC_LOW;
    high || low
}

/// Parse the numeric prefix of a value ("5.6", "92 H", "-2").
/// Rejects words like "inf" or "NaN" that `f64::from_str` would accept.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    RE_LEADING_NUMBER
        .captures(value)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}
