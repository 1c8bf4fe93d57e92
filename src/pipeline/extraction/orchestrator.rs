use chrono::NaiveDateTime;
use uuid::Uuid;

use super::cascade::PatternCascade;
use super::classify::LineClassifier;
use super::dedup::deduplicate;
use super::metadata::scan_metadata;
use super::normalize::{clean_name, clean_range, collapse_whitespace};
use super::types::CandidateMatch;
use super::vocabulary::Vocabulary;
use crate::config::ExtractorConfig;
use crate::models::{LabReport, Parameter, ReportSummary};

/// Line-by-line extraction pipeline for one document's text.
///
/// Owns the classifier, template cascade and vocabulary compiled from an
/// explicit configuration. Holds no per-document state, so one instance
/// can serve any number of documents.
#[derive(Debug, Clone)]
pub struct LabExtractor {
    config: ExtractorConfig,
    classifier: LineClassifier,
    cascade: PatternCascade,
    vocabulary: Vocabulary,
}

#[derive(Debug, Default)]
struct RunStats {
    lines: usize,
    noise: usize,
    candidates: usize,
    rejected: usize,
}

impl LabExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            classifier: LineClassifier::new(&config),
            cascade: PatternCascade::new(&config.templates),
            vocabulary: Vocabulary::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract, validate and deduplicate the parameters in a text dump.
    ///
    /// Never fails: unreadable lines are skipped and a document with no
    /// recognizable measurement yields an empty list. Record IDs derive
    /// from the text, so identical input gives identical output.
    pub fn extract(&self, text: &str) -> Vec<Parameter> {
        let namespace = document_namespace(text);
        let mut stats = RunStats::default();
        let mut built = Vec::new();

        for (line_index, raw_line) in text.lines().enumerate() {
            stats.lines += 1;
            let line = collapse_whitespace(raw_line);

            if self.classifier.is_noise(&line) {
                stats.noise += 1;
                tracing::debug!(line = line_index, "Noise line skipped");
                continue;
            }

            let Some(candidate) = self.cascade.match_line(&line, line_index) else {
                continue;
            };
            stats.candidates += 1;

            match self.build_parameter(candidate, &namespace) {
                Some(parameter) => built.push(parameter),
                None => stats.rejected += 1,
            }
        }

        let accepted = built.len();
        let parameters = deduplicate(built);

        tracing::info!(
            lines = stats.lines,
            noise = stats.noise,
            candidates = stats.candidates,
            rejected = stats.rejected,
            accepted,
            merged = accepted - parameters.len(),
            parameters = parameters.len(),
            "Lab parameter extraction complete"
        );

        parameters
    }

    /// Extract parameters plus the patient and date header of a document.
    /// `extracted_at` is stamped as given, so the result stays a pure
    /// function of its inputs.
    pub fn extract_report(
        &self,
        text: &str,
        file_name: &str,
        extracted_at: NaiveDateTime,
    ) -> LabReport {
        let metadata = scan_metadata(text);
        let parameters = self.extract(text);
        let summary = ReportSummary::from_parameters(&parameters);

        LabReport {
            id: Uuid::new_v5(&document_namespace(text), file_name.as_bytes()),
            file_name: file_name.to_string(),
            patient_name: metadata.patient_name,
            report_date: metadata.report_date,
            extracted_at,
            parameters,
            summary,
        }
    }

    fn build_parameter(&self, candidate: CandidateMatch, namespace: &Uuid) -> Option<Parameter> {
        let name = clean_name(&candidate.raw_name);
        if name.is_empty() {
            tracing::debug!(line = candidate.line_index, "Candidate name empty after cleaning");
            return None;
        }
        if !self.vocabulary.is_clinical_parameter(&name) {
            tracing::debug!(line = candidate.line_index, "Candidate name not a clinical parameter");
            return None;
        }

        let category = self.vocabulary.categorize(&name);
        let normal_range = clean_range(&candidate.raw_range);
        let id = Uuid::new_v5(
            namespace,
            format!("{}:{}", candidate.line_index, name).as_bytes(),
        );

        Some(Parameter::new(
            id,
            name,
            candidate.raw_value,
            candidate.raw_unit,
            normal_range,
            category,
        ))
    }
}

impl Default for LabExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

/// Per-document UUID namespace derived from the text itself.
fn document_namespace(text: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, text.as_bytes())
}
