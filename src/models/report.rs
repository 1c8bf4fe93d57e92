use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Category;
use super::parameter::Parameter;

/// All parameters extracted from one document, with the header details
/// recovered from the report's boilerplate lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabReport {
    pub id: Uuid,
    pub file_name: String,
    pub patient_name: Option<String>,
    pub report_date: Option<NaiveDate>,
    /// When the caller ran the extraction.
    pub extracted_at: NaiveDateTime,
    pub parameters: Vec<Parameter>,
    pub summary: ReportSummary,
}

/// Header details found among the discarded noise lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub patient_name: Option<String>,
    pub report_date: Option<NaiveDate>,
}

/// Counts shown next to a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub out_of_range: usize,
    pub by_category: BTreeMap<Category, usize>,
    /// Names of parameters with a plain numeric value (trend candidates).
    pub numeric_parameters: Vec<String>,
}

impl ReportSummary {
    pub fn from_parameters(parameters: &[Parameter]) -> Self {
        let mut by_category = BTreeMap::new();
        for p in parameters {
            *by_category.entry(p.category).or_insert(0) += 1;
        }

        Self {
            total: parameters.len(),
            out_of_range: parameters.iter().filter(|p| p.is_out_of_range()).count(),
            by_category,
            numeric_parameters: parameters
                .iter()
                .filter(|p| p.numeric_value().is_some())
                .map(|p| p.name.clone())
                .collect(),
        }
    }
}
