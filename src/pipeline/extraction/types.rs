use serde::{Deserialize, Serialize};

/// Structural line templates, in default cascade priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// `NAME VALUE UNIT <op><number>`
    UnitOneSidedRange,
    /// `NAME VALUE UNIT A-B`
    UnitIntervalRange,
    /// `NAME [:=-] VALUE [UNIT] (RANGE)`
    SeparatedWithRange,
    /// `NAME [:=-] VALUE`
    SeparatedValueOnly,
    /// `NAME VALUE UNIT`
    ValueUnit,
    /// `NAME [:=-] INT/INT [UNIT] (RANGE)`
    Compound,
    /// `NAME [:=-] VALUE [UNIT] (RANGE)` with permissive decimals
    DecimalFallback,
}

impl TemplateKind {
    /// Default cascade order. First match wins.
    pub const CASCADE: [TemplateKind; 7] = [
        Self::UnitOneSidedRange,
        Self::UnitIntervalRange,
        Self::SeparatedWithRange,
        Self::SeparatedValueOnly,
        Self::ValueUnit,
        Self::Compound,
        Self::DecimalFallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnitOneSidedRange => "unit_one_sided_range",
            Self::UnitIntervalRange => "unit_interval_range",
            Self::SeparatedWithRange => "separated_with_range",
            Self::SeparatedValueOnly => "separated_value_only",
            Self::ValueUnit => "value_unit",
            Self::Compound => "compound",
            Self::DecimalFallback => "decimal_fallback",
        }
    }
}

/// Raw fields split out of one line, before cleaning and validation.
/// Fields a template does not capture are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    pub raw_name: String,
    pub raw_value: String,
    pub raw_unit: String,
    pub raw_range: String,
    pub line_index: usize,
    pub template: TemplateKind,
}
