pub mod toml_config;

use serde::{Deserialize, Serialize};

use crate::utils::error::Result;
use crate::utils::validation::{compile_pattern, validate_error_code, ScoreRange, Validate};

/// Overrides for a `*.score` object. Anything left unset falls back to the
/// selected standard's catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub score_children: Option<String>,
    pub score_range: Option<String>,
    pub max: Option<String>,
    pub invalid_error_code: Option<u16>,
    pub invalid_type_code: Option<u16>,
    pub invalid_range_code: Option<u16>,
    pub decimal_regex: Option<String>,
    /// Enforce the standard's range when `score_range` is unset.
    #[serde(default)]
    pub standard_range: bool,
}

impl Validate for ScoreConfig {
    fn validate(&self) -> Result<()> {
        if let Some(pattern) = &self.decimal_regex {
            compile_pattern("score.decimal_regex", pattern)?;
        }
        if let Some(range) = &self.score_range {
            range.parse::<ScoreRange>()?;
        }

        let codes = [
            ("score.invalid_error_code", self.invalid_error_code),
            ("score.invalid_type_code", self.invalid_type_code),
            ("score.invalid_range_code", self.invalid_range_code),
        ];
        for (field, code) in codes {
            if let Some(code) = code {
                validate_error_code(field, code)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayConfig {
    pub children: String,
    pub error_code: u16,
}

impl Validate for ArrayConfig {
    fn validate(&self) -> Result<()> {
        validate_error_code("collection.error_code", self.error_code)
    }
}
