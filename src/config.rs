use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::extraction::types::TemplateKind;
use crate::pipeline::extraction::vocabulary::{
    default_category_keywords, default_term_groups, CategoryKeywords, TermGroup,
};

/// Application-level constants
pub const APP_NAME: &str = "Labsift";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the per-user configuration directory and file.
const CONFIG_DIR_NAME: &str = "labsift";
const CONFIG_FILE_NAME: &str = "config.json";

/// Report boilerplate that never carries a measurement.
const NOISE_PREFIXES: &[&str] = &[
    "page", "lab", "laboratory", "hospital", "clinic", "patient", "date", "time",
    "doctor", "physician", "report", "results", "summary", "conclusion", "notes",
    "remarks", "continued", "end of report", "thank you",
];

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        verbose_log_filter()
    } else {
        "labsift=info,labsift_lib=info,warn"
    }
}

/// Log filter used by `--verbose` when `RUST_LOG` is unset.
pub fn verbose_log_filter() -> &'static str {
    "labsift=debug,labsift_lib=debug,warn"
}

/// Default location of the user's extractor configuration:
/// `<config dir>/labsift/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Tables and limits driving the extraction pipeline.
///
/// Every field has a built-in default, so a config file only needs the
/// keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Case-insensitive line prefixes discarded as boilerplate.
    pub noise_prefixes: Vec<String>,
    /// Lines shorter than this (in characters) are noise.
    pub min_line_chars: usize,
    /// Lines longer than this (in characters) are noise.
    pub max_line_chars: usize,
    /// Cascade templates in priority order.
    pub templates: Vec<TemplateKind>,
    /// Dictionary of clinical terms, grouped by domain.
    pub clinical_terms: Vec<TermGroup>,
    /// Category keyword sets, first match wins.
    pub categories: Vec<CategoryKeywords>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            noise_prefixes: NOISE_PREFIXES.iter().map(|p| (*p).to_string()).collect(),
            min_line_chars: 3,
            max_line_chars: 100,
            templates: TemplateKind::CASCADE.to_vec(),
            clinical_terms: default_term_groups(),
            categories: default_category_keywords(),
        }
    }
}

impl ExtractorConfig {
    /// Load a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Extractor config loaded");
        Ok(config)
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn app_name_is_labsift() {
        assert_eq!(APP_NAME, "Labsift");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn verbose_filter_enables_debug() {
        assert!(verbose_log_filter().contains("labsift_lib=debug"));
        assert!(default_log_filter().starts_with("labsift="));
    }

    #[test]
    fn default_config_path_ends_with_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("labsift/config.json"));
        }
    }

    #[test]
    fn defaults_cover_all_tables() {
        let config = ExtractorConfig::default();
        assert_eq!(config.noise_prefixes.len(), 19);
        assert_eq!(config.min_line_chars, 3);
        assert_eq!(config.max_line_chars, 100);
        assert_eq!(config.templates, TemplateKind::CASCADE);
        assert_eq!(config.clinical_terms.len(), 6);
        assert_eq!(config.categories.len(), 12);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"max_line_chars": 80, "templates": ["compound", "unit_one_sided_range"]}"#,
        )
        .unwrap();

        let config = ExtractorConfig::load(&path).unwrap();
        assert_eq!(config.max_line_chars, 80);
        assert_eq!(
            config.templates,
            [TemplateKind::Compound, TemplateKind::UnitOneSidedRange]
        );
        assert_eq!(config.min_line_chars, 3);
        assert_eq!(config.categories[0].category, Category::BloodSugar);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = ExtractorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ExtractorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExtractorConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"templates": ["no_such_template"]}"#).unwrap();
        let err = ExtractorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_path_wins_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"min_line_chars": 5}"#).unwrap();
        let config = ExtractorConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.min_line_chars, 5);
    }
}
