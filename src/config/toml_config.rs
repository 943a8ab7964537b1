use crate::config::{ArrayConfig, ScoreConfig};
use crate::constants::Standard;
use crate::utils::error::{CmiError, Result};
use crate::utils::validation::{compile_pattern, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A TOML document describing a score schema and a sequence of writes to
/// check against it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckDocument {
    #[serde(default)]
    pub standard: Standard,
    #[serde(default)]
    pub score: ScoreConfig,
    #[serde(default)]
    pub writes: Vec<FieldWrite>,
    pub collection: Option<CollectionSection>,
}

/// A single write; `target` is a score field (`raw`, `min`, `max`,
/// `_children`) or `collection._children` / `collection._count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWrite {
    pub target: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSection {
    pub children: String,
    pub error_code: Option<u16>,
    #[serde(default)]
    pub entries: Vec<ScoreEntry>,
}

/// Values written, in `raw`, `min`, `max` order, to a fresh score that is
/// then appended to the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub raw: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl ScoreEntry {
    pub fn writes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("raw", &self.raw), ("min", &self.min), ("max", &self.max)]
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

impl CollectionSection {
    /// Falls back to the standard's invalid-set code.
    pub fn array_config(&self, standard: Standard) -> ArrayConfig {
        ArrayConfig {
            children: self.children.clone(),
            error_code: self
                .error_code
                .unwrap_or(standard.catalog().error_codes.invalid_set_value),
        }
    }
}

impl CheckDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CmiError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CmiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` with the environment value; unknown names are
    /// left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = compile_pattern("env_var", r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.score.validate()?;

        for write in &self.writes {
            validate_non_empty_string("writes.target", &write.target)?;
        }

        if let Some(collection) = &self.collection {
            collection.array_config(self.standard).validate()?;
        }

        Ok(())
    }
}

impl Validate for CheckDocument {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
