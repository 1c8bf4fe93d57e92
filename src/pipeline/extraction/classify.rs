use std::sync::LazyLock;

use regex::Regex;

use crate::config::ExtractorConfig;

/// Bare date at line start: "01/15/2024", "15/1/24".
static DATE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+/\d+/\d+").unwrap());

/// Bare time at line start: "9:30", "14:05".
static TIME_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}").unwrap());

/// Decides whether a line is report structure (header, footer, date, page
/// marker) rather than a measurement.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    /// Lowercased boilerplate prefixes.
    prefixes: Vec<String>,
    min_chars: usize,
    max_chars: usize,
}

impl LineClassifier {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            prefixes: config.noise_prefixes.iter().map(|p| p.to_lowercase()).collect(),
            min_chars: config.min_line_chars,
            max_chars: config.max_line_chars,
        }
    }

    /// True when the line should be discarded before template matching.
    /// Expects a trimmed line with collapsed whitespace.
    pub fn is_noise(&self, line: &str) -> bool {
        let len = line.chars().count();
        if len < self.min_chars || len > self.max_chars {
            return true;
        }

        let lower = line.to_lowercase();
        if self.prefixes.iter().any(|p| lower.starts_with(p.as_str())) {
            return true;
        }

        DATE_LINE.is_match(line) || TIME_LINE.is_match(line)
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LineClassifier {
        LineClassifier::default()
    }

    #[test]
    fn page_markers_are_noise() {
        let c = classifier();
        assert!(c.is_noise("Page 1 of 3"));
        assert!(c.is_noise("PAGE 2"));
    }

    #[test]
    fn boilerplate_prefixes_are_noise() {
        let c = classifier();
        for line in [
            "Laboratory Report",
            "Lab Results",
            "Hospital: City General",
            "hospital: St. Mary",
            "Clinic address 12 Main St",
            "Patient: John Doe",
            "Date: 01/15/2024",
            "Time of collection 08:00",
            "Doctor: Dr. Martin",
            "Physician signature",
            "Report generated",
            "Results follow",
            "Summary",
            "Conclusion: normal",
            "Notes",
            "Remarks: fasting",
            "Continued on next page",
            "End of report",
            "Thank you for choosing us",
        ] {
            assert!(c.is_noise(line), "expected noise: {line:?}");
        }
    }

    #[test]
    fn bare_dates_and_times_are_noise() {
        let c = classifier();
        assert!(c.is_noise("01/15/2024"));
        assert!(c.is_noise("15/1/24 collected"));
        assert!(c.is_noise("9:30 AM"));
        assert!(c.is_noise("14:05"));
    }

    #[test]
    fn length_limits() {
        let c = classifier();
        assert!(c.is_noise(""));
        assert!(c.is_noise("Hb"));
        assert!(!c.is_noise("K 4"));
        assert!(!c.is_noise(&"x".repeat(100)));
        assert!(c.is_noise(&"x".repeat(101)));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let c = classifier();
        let line = "é".repeat(60);
        assert!(!c.is_noise(&line), "60 chars is within limit even at 120 bytes");
    }

    #[test]
    fn measurements_are_not_noise() {
        let c = classifier();
        assert!(!c.is_noise("Blood Glucose 92 mg/dL (70-100)"));
        assert!(!c.is_noise("Total Cholesterol: 210 mg/dL (< 200)"));
        assert!(!c.is_noise("Blood Pressure: 150/95 mmHg"));
        assert!(!c.is_noise("Platelets 250 10^3/uL"));
        assert!(!c.is_noise("Protein, total 7.1 g/dL"));
        assert!(!c.is_noise("120/80 mmHg"), "two-part value is not a date");
    }

    #[test]
    fn custom_prefixes_from_config() {
        let config = ExtractorConfig {
            noise_prefixes: vec!["Specimen".into()],
            ..ExtractorConfig::default()
        };
        let c = LineClassifier::new(&config);
        assert!(c.is_noise("specimen: serum"));
        assert!(!c.is_noise("Page 1 of 3 glucose"));
    }
}
