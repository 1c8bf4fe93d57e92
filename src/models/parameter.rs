use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Category;
use crate::pipeline::extraction::range::{is_out_of_range, parse_leading_number};

/// One extracted clinical measurement.
///
/// `is_out_of_range` is derived from `value` and `normal_range`: the two
/// fields can only change through setters that recompute the flag, and a
/// deserialized record recomputes it rather than trusting the stored one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParameterFields")]
pub struct Parameter {
    pub id: Uuid,
    pub name: String,
    value: String,
    pub unit: String,
    normal_range: String,
    pub category: Category,
    is_out_of_range: bool,
}

/// Wire shape accepted when reading a record back from storage.
#[derive(Deserialize)]
struct ParameterFields {
    id: Uuid,
    name: String,
    value: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    normal_range: String,
    #[serde(default)]
    category: Category,
}

impl From<ParameterFields> for Parameter {
    fn from(fields: ParameterFields) -> Self {
        Self::new(
            fields.id,
            fields.name,
            fields.value,
            fields.unit,
            fields.normal_range,
            fields.category,
        )
    }
}

impl Parameter {
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        value: impl Into<String>,
        unit: impl Into<String>,
        normal_range: impl Into<String>,
        category: Category,
    ) -> Self {
        let mut parameter = Self {
            id,
            name: name.into(),
            value: value.into(),
            unit: unit.into(),
            normal_range: normal_range.into(),
            category,
            is_out_of_range: false,
        };
        parameter.recompute();
        parameter
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn normal_range(&self) -> &str {
        &self.normal_range
    }

    pub fn is_out_of_range(&self) -> bool {
        self.is_out_of_range
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.recompute();
    }

    pub fn set_normal_range(&mut self, normal_range: impl Into<String>) {
        self.normal_range = normal_range.into();
        self.recompute();
    }

    /// Re-derive the out-of-range flag from the current value and range.
    pub fn recompute(&mut self) {
        self.is_out_of_range = is_out_of_range(&self.value, &self.normal_range);
    }

    /// Plain numeric reading, if the value is a single number.
    /// Compound values such as `120/80` have none.
    pub fn numeric_value(&self) -> Option<f64> {
        if self.value.contains('/') {
            return None;
        }
        parse_leading_number(&self.value)
    }

    pub fn has_range(&self) -> bool {
        !self.normal_range.is_empty()
    }
}
