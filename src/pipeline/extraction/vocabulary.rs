//! Clinical vocabulary: decides whether a cleaned name denotes a lab
//! parameter, and which category it belongs to.
//!
//! Matching is substring containment in either direction, so truncated OCR
//! output ("cholest") and decorated names ("Serum Sodium") both resolve.
//! The validator leans towards acceptance: a false positive is shown to a
//! human for review, a false negative is silently lost.

use serde::{Deserialize, Serialize};

use crate::config::ExtractorConfig;
use crate::models::Category;

/// Longest name still considered a possible initialism of a multi-word term.
const MAX_INITIALISM_LEN: usize = 5;

/// A named group of dictionary terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermGroup {
    pub domain: String,
    pub terms: Vec<String>,
}

/// Keywords that place a name in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: Category,
    pub keywords: Vec<String>,
}

const BLOOD_CHEMISTRY: &[&str] = &[
    "glucose", "sugar", "hemoglobin", "hgb", "hb", "hba1c", "a1c",
    "cholesterol", "hdl", "ldl", "triglycerides", "lipid",
    "creatinine", "urea", "bun", "sodium", "potassium", "chloride",
    "protein", "albumin", "globulin", "bilirubin",
    "alt", "ast", "alp", "ggt", "liver", "enzyme",
    "wbc", "rbc", "platelet", "hematocrit", "mcv", "mch", "mchc",
    "esr", "crp", "inflammation",
];

const VITALS: &[&str] = &[
    "blood pressure", "bp", "systolic", "diastolic", "pulse", "heart rate",
    "temperature", "temp", "oxygen", "o2", "saturation", "spo2",
    "weight", "height", "bmi", "body mass",
];

const HORMONES: &[&str] = &[
    "tsh", "thyroid", "t3", "t4", "insulin", "cortisol",
    "testosterone", "estrogen", "progesterone",
];

const VITAMINS_AND_MINERALS: &[&str] = &[
    "vitamin", "b12", "d3", "folate", "iron", "ferritin",
    "calcium", "magnesium", "phosphorus", "zinc",
];

const URINE_TESTS: &[&str] = &["urine", "urinalysis", "ketones", "specific gravity"];

const ACID_BASE: &[&str] = &["ph", "co2", "bicarbonate", "anion gap"];

/// Category keyword sets in declaration order. Sets overlap, and the first
/// category that matches wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::BloodSugar, &["glucose", "sugar", "hba1c", "a1c", "diabetic"]),
    (Category::LipidProfile, &["cholesterol", "hdl", "ldl", "triglycerides", "lipid"]),
    (
        Category::BloodCount,
        &["hemoglobin", "hgb", "hb", "wbc", "rbc", "platelet", "hematocrit", "mcv", "mch", "mchc"],
    ),
    (Category::KidneyFunction, &["creatinine", "urea", "bun", "kidney"]),
    (Category::LiverFunction, &["alt", "ast", "alp", "ggt", "bilirubin", "liver"]),
    (Category::Electrolytes, &["sodium", "potassium", "chloride", "co2", "bicarbonate"]),
    (
        Category::VitalSigns,
        &["blood pressure", "bp", "heart rate", "pulse", "temperature", "oxygen", "spo2"],
    ),
    (
        Category::Hormones,
        &["tsh", "thyroid", "t3", "t4", "insulin", "cortisol", "testosterone", "estrogen"],
    ),
    (Category::Vitamins, &["vitamin", "b12", "d3", "folate"]),
    (Category::Minerals, &["iron", "ferritin", "calcium", "magnesium", "phosphorus", "zinc"]),
    (Category::Inflammation, &["esr", "crp", "inflammation"]),
    (Category::Proteins, &["protein", "albumin", "globulin"]),
];

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| (*t).to_string()).collect()
}

/// Built-in dictionary, grouped by clinical domain.
pub fn default_term_groups() -> Vec<TermGroup> {
    [
        ("blood chemistry", BLOOD_CHEMISTRY),
        ("vitals", VITALS),
        ("hormones", HORMONES),
        ("vitamins and minerals", VITAMINS_AND_MINERALS),
        ("urine tests", URINE_TESTS),
        ("acid-base", ACID_BASE),
    ]
    .into_iter()
    .map(|(domain, terms)| TermGroup {
        domain: domain.to_string(),
        terms: owned(terms),
    })
    .collect()
}

/// Built-in category keyword sets in declared order.
pub fn default_category_keywords() -> Vec<CategoryKeywords> {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| CategoryKeywords {
            category: *category,
            keywords: owned(keywords),
        })
        .collect()
}

/// Substring containment in either direction.
fn overlaps(name: &str, term: &str) -> bool {
    name.contains(term) || term.contains(name)
}

/// Compiled vocabulary: lowercased terms with precomputed initialisms.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    /// Initials of every multi-word term ("blood pressure" -> "bp").
    initialisms: Vec<String>,
    categories: Vec<(Category, Vec<String>)>,
}

impl Vocabulary {
    pub fn new(config: &ExtractorConfig) -> Self {
        let terms: Vec<String> = config
            .clinical_terms
            .iter()
            .flat_map(|g| g.terms.iter())
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let initialisms = terms
            .iter()
            .filter(|t| t.split_whitespace().count() > 1)
            .map(|t| {
                t.split_whitespace()
                    .filter_map(|w| w.chars().next())
                    .collect::<String>()
            })
            .collect();

        let categories = config
            .categories
            .iter()
            .map(|c| {
                let keywords = c
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (c.category, keywords)
            })
            .collect();

        Self {
            terms,
            initialisms,
            categories,
        }
    }

    /// Whether a cleaned name plausibly denotes a clinical parameter.
    pub fn is_clinical_parameter(&self, name: &str) -> bool {
        let lower = name.trim().to_lowercase();
        if lower.is_empty() {
            return false;
        }

        self.terms.iter().any(|term| overlaps(&lower, term)) || self.is_initialism(&lower)
    }

    fn is_initialism(&self, lower: &str) -> bool {
        lower.chars().count() <= MAX_INITIALISM_LEN
            && self.initialisms.iter().any(|initials| initials == lower)
    }

    /// First declared category with a keyword overlapping the name, else `Other`.
    pub fn categorize(&self, name: &str) -> Category {
        let lower = name.trim().to_lowercase();
        if lower.is_empty() {
            return Category::Other;
        }

        self.categories
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| overlaps(&lower, k)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}
