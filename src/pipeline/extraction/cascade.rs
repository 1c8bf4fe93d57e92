//! Ordered template cascade that splits a lab line into name, value, unit
//! and range fields.
//!
//! Each template is an independent anchored pattern. They are tried in
//! cascade order and the first one that matches decides the whole line,
//! so a line never yields two conflicting candidates.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::types::{CandidateMatch, TemplateKind};

/// Plain decimal, tolerating a trailing dot: "92", "4.2", "92.".
const NUM: &str = r"\d+\.?\d*";
/// Permissive decimal, also accepting a bare fraction: ".5".
const DEC: &str = r"\d*\.?\d+";
/// Unit token, starting with a letter or '%': "mg/dL", "%", "mmHg", "x10^3/uL".
const UNIT: &str = r"[A-Za-z%µμ][A-Za-z0-9%µμ/^]*";
/// Name/value separator: ':', '=' or '-' with optional spaces, or bare whitespace.
const SEP: &str = r"(?:\s*[:=\-]\s*|\s+)";
/// Punctuated separator only.
const LABEL_SEP: &str = r"\s*[:=\-]\s*";
/// Optional parenthesized range: "(70-100)", "(< 200)".
const PAREN_RANGE: &str = r"(?:\s*\((?P<range>[^)]*)\))?";
/// Mandatory parenthesized range.
const REQUIRED_PAREN_RANGE: &str = r"\s*\((?P<range>[^)]*)\)";
/// A match must stop on a token boundary so "150/95" or "25-OH" are never split.
const END: &str = r"(?:\s|$)";

fn compile(pattern: String) -> Regex {
    Regex::new(&pattern).unwrap()
}

static UNIT_ONE_SIDED_RANGE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![compile(format!(
        r"^(?P<name>.+?)\s+(?P<value>{DEC})\s+(?P<unit>{UNIT})\s+(?P<range>[<>]=?\s*{DEC})"
    ))]
});

static UNIT_INTERVAL_RANGE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![compile(format!(
        r"^(?P<name>.+?)\s+(?P<value>{DEC})\s+(?P<unit>{UNIT})\s+(?P<range>{DEC}\s*[-\u{{2013}}]\s*{DEC})"
    ))]
});

/// A punctuated separator may be followed by anything after the value. A
/// bare-whitespace separator only counts when a parenthesized range follows;
/// otherwise "Glucose 2 Hour PP 140 mg/dL" would be cut at the "2".
static SEPARATED_WITH_RANGE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(format!(
            r"^(?P<name>.+?){LABEL_SEP}(?P<value>{NUM})(?:\s*(?P<unit>{UNIT}))?{PAREN_RANGE}{END}"
        )),
        compile(format!(
            r"^(?P<name>.+?)\s+(?P<value>{NUM})(?:\s*(?P<unit>{UNIT}))?{REQUIRED_PAREN_RANGE}{END}"
        )),
    ]
});

static SEPARATED_VALUE_ONLY: LazyLock<Vec<Regex>> =
    LazyLock::new(|| vec![compile(format!(r"^(?P<name>.+?){SEP}(?P<value>{NUM})\s*$"))]);

static VALUE_UNIT: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![compile(format!(
        r"^(?P<name>.+?)\s+(?P<value>{NUM})\s+(?P<unit>{UNIT})\s*$"
    ))]
});

static COMPOUND: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![compile(format!(
        r"^(?P<name>.+?){SEP}(?P<value>\d+/\d+)(?:\s*(?P<unit>{UNIT}))?{PAREN_RANGE}{END}"
    ))]
});

/// Same separator rules as the separated templates, plus a whitespace form
/// that must end the line after the value and unit.
static DECIMAL_FALLBACK: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(format!(
            r"^(?P<name>.+?){LABEL_SEP}(?P<value>{DEC})(?:\s*(?P<unit>{UNIT}))?{PAREN_RANGE}{END}"
        )),
        compile(format!(
            r"^(?P<name>.+?)\s+(?P<value>{DEC})(?:\s*(?P<unit>{UNIT}))?{REQUIRED_PAREN_RANGE}{END}"
        )),
        compile(format!(
            r"^(?P<name>.+?)\s+(?P<value>{DEC})(?:\s+(?P<unit>{UNIT}))?\s*$"
        )),
    ]
});

/// Patterns of one template, tried in order.
fn template_patterns(kind: TemplateKind) -> &'static [Regex] {
    let patterns = match kind {
        TemplateKind::UnitOneSidedRange => LazyLock::force(&UNIT_ONE_SIDED_RANGE),
        TemplateKind::UnitIntervalRange => LazyLock::force(&UNIT_INTERVAL_RANGE),
        TemplateKind::SeparatedWithRange => LazyLock::force(&SEPARATED_WITH_RANGE),
        TemplateKind::SeparatedValueOnly => LazyLock::force(&SEPARATED_VALUE_ONLY),
        TemplateKind::ValueUnit => LazyLock::force(&VALUE_UNIT),
        TemplateKind::Compound => LazyLock::force(&COMPOUND),
        TemplateKind::DecimalFallback => LazyLock::force(&DECIMAL_FALLBACK),
    };
    patterns.as_slice()
}

fn group(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Apply a single template to a line.
pub fn match_template(
    kind: TemplateKind,
    line: &str,
    line_index: usize,
) -> Option<CandidateMatch> {
    let caps = template_patterns(kind)
        .iter()
        .find_map(|re| re.captures(line))?;
    Some(CandidateMatch {
        raw_name: group(&caps, "name"),
        raw_value: group(&caps, "value"),
        raw_unit: group(&caps, "unit"),
        raw_range: group(&caps, "range"),
        line_index,
        template: kind,
    })
}

/// The configured template list, tried in order.
#[derive(Debug, Clone)]
pub struct PatternCascade {
    templates: Vec<TemplateKind>,
}

impl PatternCascade {
    pub fn new(templates: &[TemplateKind]) -> Self {
        Self {
            templates: templates.to_vec(),
        }
    }

    pub fn templates(&self) -> &[TemplateKind] {
        &self.templates
    }

    /// First template that matches the line, or `None`.
    /// Expects a trimmed line with collapsed whitespace.
    pub fn match_line(&self, line: &str, line_index: usize) -> Option<CandidateMatch> {
        let candidate = self
            .templates
            .iter()
            .find_map(|kind| match_template(*kind, line, line_index));

        match &candidate {
            Some(c) => tracing::debug!(
                line = line_index,
                template = c.template.as_str(),
                "Line matched template"
            ),
            None => tracing::debug!(line = line_index, "Line matched no template"),
        }
        candidate
    }
}

impl Default for PatternCascade {
    fn default() -> Self {
        Self::new(&TemplateKind::CASCADE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(c: &CandidateMatch) -> (&str, &str, &str, &str) {
        (&c.raw_name, &c.raw_value, &c.raw_unit, &c.raw_range)
    }

    fn cascade(line: &str) -> Option<CandidateMatch> {
        PatternCascade::default().match_line(line, 0)
    }

    #[test]
    fn all_templates_compile() {
        for kind in TemplateKind::CASCADE {
            assert!(!template_patterns(kind).is_empty());
        }
    }

    #[test]
    fn one_sided_range_after_unit() {
        let c = cascade("LDL 130 mg/dL < 100").unwrap();
        assert_eq!(c.template, TemplateKind::UnitOneSidedRange);
        assert_eq!(fields(&c), ("LDL", "130", "mg/dL", "< 100"));

        let c = cascade("HDL Cholesterol 55 mg/dL >=40").unwrap();
        assert_eq!(fields(&c), ("HDL Cholesterol", "55", "mg/dL", ">=40"));
    }

    #[test]
    fn one_sided_range_wins_over_value_unit() {
        let line = "LDL Cholesterol 130 mg/dL < 100 mg/dL";
        // The plain value/unit template alone would read the trailing "100 mg/dL".
        let plain = match_template(TemplateKind::ValueUnit, line, 0).unwrap();
        assert_eq!(plain.raw_value, "100");

        let c = cascade(line).unwrap();
        assert_eq!(c.template, TemplateKind::UnitOneSidedRange);
        assert_eq!(fields(&c), ("LDL Cholesterol", "130", "mg/dL", "< 100"));
    }

    #[test]
    fn interval_range_after_unit() {
        let c = cascade("Sodium 140 mmol/L 135-145").unwrap();
        assert_eq!(c.template, TemplateKind::UnitIntervalRange);
        assert_eq!(fields(&c), ("Sodium", "140", "mmol/L", "135-145"));

        let c = cascade("Potassium 4.2 mmol/L 3.5 \u{2013} 5.0").unwrap();
        assert_eq!(fields(&c), ("Potassium", "4.2", "mmol/L", "3.5 \u{2013} 5.0"));
    }

    #[test]
    fn separated_value_with_parenthesized_range() {
        let c = cascade("Total Cholesterol: 210 mg/dL (< 200)").unwrap();
        assert_eq!(c.template, TemplateKind::SeparatedWithRange);
        assert_eq!(fields(&c), ("Total Cholesterol", "210", "mg/dL", "< 200"));

        let c = cascade("Hemoglobin = 14.1 g/dL (12-16)").unwrap();
        assert_eq!(fields(&c), ("Hemoglobin", "14.1", "g/dL", "12-16"));
    }

    #[test]
    fn space_separated_value_with_parenthesized_range() {
        let c = cascade("Blood Glucose 92 mg/dL (70-100)").unwrap();
        assert_eq!(fields(&c), ("Blood Glucose", "92", "mg/dL", "70-100"));
    }

    #[test]
    fn separated_value_without_unit() {
        let c = cascade("pH: 7.4").unwrap();
        assert_eq!(fields(&c), ("pH", "7.4", "", ""));

        let c = cascade("Anion Gap - 12").unwrap();
        assert_eq!(fields(&c), ("Anion Gap", "12", "", ""));
    }

    #[test]
    fn value_unit_without_range() {
        let c = cascade("Vitamin B12 450 pg/mL").unwrap();
        assert_eq!(fields(&c), ("Vitamin B12", "450", "pg/mL", ""));

        let c = cascade("HbA1c 5.6 %").unwrap();
        assert_eq!(fields(&c), ("HbA1c", "5.6", "%", ""));
    }

    #[test]
    fn later_templates_reachable_when_reordered() {
        let only_value_only = PatternCascade::new(&[TemplateKind::SeparatedValueOnly]);
        let c = only_value_only.match_line("Pulse: 72", 3).unwrap();
        assert_eq!(c.template, TemplateKind::SeparatedValueOnly);
        assert_eq!(c.line_index, 3);

        let only_value_unit = PatternCascade::new(&[TemplateKind::ValueUnit]);
        let c = only_value_unit.match_line("Pulse 72 bpm", 0).unwrap();
        assert_eq!(fields(&c), ("Pulse", "72", "bpm", ""));
        assert!(only_value_unit.match_line("Pulse 72 bpm (60-100)", 0).is_none());
    }

    #[test]
    fn compound_value_is_never_split() {
        let c = cascade("Blood Pressure: 150/95 mmHg").unwrap();
        assert_eq!(c.template, TemplateKind::Compound);
        assert_eq!(fields(&c), ("Blood Pressure", "150/95", "mmHg", ""));

        let c = cascade("BP 120/80 mmHg (< 140/90)").unwrap();
        assert_eq!(fields(&c), ("BP", "120/80", "mmHg", "< 140/90"));
    }

    #[test]
    fn decimal_fallback_accepts_bare_fraction() {
        let c = cascade("Bilirubin Direct: .2 mg/dL").unwrap();
        assert_eq!(c.template, TemplateKind::DecimalFallback);
        assert_eq!(fields(&c), ("Bilirubin Direct", ".2", "mg/dL", ""));
    }

    #[test]
    fn hyphenated_name_kept_whole() {
        let c = cascade("Vitamin D 25-OH: 30 ng/mL (30-100)").unwrap();
        assert_eq!(fields(&c), ("Vitamin D 25-OH", "30", "ng/mL", "30-100"));
    }

    #[test]
    fn trailing_flag_after_range_tolerated() {
        let c = cascade("Glucose: 130 mg/dL (70-100) H").unwrap();
        assert_eq!(fields(&c), ("Glucose", "130", "mg/dL", "70-100"));
    }

    #[test]
    fn number_inside_name_is_not_the_value() {
        let c = cascade("Glucose 2 Hour PP 140 mg/dL").unwrap();
        assert_eq!(c.template, TemplateKind::ValueUnit);
        assert_eq!(fields(&c), ("Glucose 2 Hour PP", "140", "mg/dL", ""));

        let c = cascade("Vitamin B 12 450 pg/mL").unwrap();
        assert_eq!(fields(&c), ("Vitamin B 12", "450", "pg/mL", ""));

        let c = cascade("Glucose 1 Hr 180 mg/dL").unwrap();
        assert_eq!(fields(&c), ("Glucose 1 Hr", "180", "mg/dL", ""));
    }

    #[test]
    fn number_inside_name_with_parenthesized_range() {
        let c = cascade("Glucose 2 Hour PP 140 mg/dL (70-140)").unwrap();
        assert_eq!(c.template, TemplateKind::SeparatedWithRange);
        assert_eq!(fields(&c), ("Glucose 2 Hour PP", "140", "mg/dL", "70-140"));
    }

    #[test]
    fn bare_value_without_separator_goes_to_value_only() {
        let c = cascade("Pulse 72").unwrap();
        assert_eq!(c.template, TemplateKind::SeparatedValueOnly);
        assert_eq!(fields(&c), ("Pulse", "72", "", ""));
    }

    #[test]
    fn trailing_dot_value() {
        let c = cascade("Glucose: 92. mg/dL").unwrap();
        assert_eq!(c.template, TemplateKind::SeparatedWithRange);
        assert_eq!(fields(&c), ("Glucose", "92.", "mg/dL", ""));
    }

    #[test]
    fn decimal_fallback_whitespace_form_needs_line_end() {
        let c = cascade("Bilirubin Direct .2 mg/dL").unwrap();
        assert_eq!(c.template, TemplateKind::DecimalFallback);
        assert_eq!(fields(&c), ("Bilirubin Direct", ".2", "mg/dL", ""));

        let fallback = PatternCascade::new(&[TemplateKind::DecimalFallback]);
        let c = fallback.match_line("Glucose 2 Hour PP 140 mg/dL", 0).unwrap();
        assert_eq!(fields(&c), ("Glucose 2 Hour PP", "140", "mg/dL", ""));
    }

    #[test]
    fn lines_without_numbers_do_not_match() {
        assert!(cascade("Hematology").is_none());
        assert!(cascade("Comments: see attached").is_none());
        assert!(cascade("").is_none());
    }

    #[test]
    fn empty_cascade_matches_nothing() {
        let none = PatternCascade::new(&[]);
        assert!(none.match_line("Glucose: 92 mg/dL", 0).is_none());
    }
}
