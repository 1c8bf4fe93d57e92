use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Variants serialize under their display string.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            /// Every variant, in declared order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Version of the category taxonomy. Bumped whenever a category is added,
/// removed or renamed, since UI grouping keys on these names.
pub const TAXONOMY_VERSION: u32 = 1;

str_enum!(Category {
    BloodSugar => "Blood Sugar",
    LipidProfile => "Lipid Profile",
    BloodCount => "Blood Count",
    KidneyFunction => "Kidney Function",
    LiverFunction => "Liver Function",
    Electrolytes => "Electrolytes",
    VitalSigns => "Vital Signs",
    Hormones => "Hormones",
    Vitamins => "Vitamins",
    Minerals => "Minerals",
    Inflammation => "Inflammation",
    Proteins => "Proteins",
    Other => "Other",
});

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_round_trip() {
        for variant in Category::ALL {
            assert_eq!(Category::from_str(variant.as_str()).unwrap(), *variant);
        }
    }

    #[test]
    fn taxonomy_has_twelve_categories_plus_other() {
        assert_eq!(Category::ALL.len(), 13);
        assert_eq!(Category::ALL.last(), Some(&Category::Other));
        assert_eq!(Category::ALL[0], Category::BloodSugar);
    }

    #[test]
    fn unknown_category_rejected() {
        let err = Category::from_str("Cardiology").unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidEnum { ref field, ref value } if field == "Category" && value == "Cardiology"
        ));
    }

    #[test]
    fn category_serializes_as_display_name() {
        let json = serde_json::to_string(&Category::KidneyFunction).unwrap();
        assert_eq!(json, "\"Kidney Function\"");
        let parsed: Category = serde_json::from_str("\"Vital Signs\"").unwrap();
        assert_eq!(parsed, Category::VitalSigns);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Category::LipidProfile.to_string(), "Lipid Profile");
    }
}
