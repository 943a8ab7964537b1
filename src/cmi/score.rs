use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::cmi::{CmiElement, JsonMode, Lifecycle};
use crate::config::ScoreConfig;
use crate::constants::Standard;
use crate::utils::error::{CmiError, Result};
use crate::utils::validation::{check_valid_format, check_valid_range, compile_pattern, ScoreRange};

/// Validation rules of a `*.score` object, fixed when the object is built.
#[derive(Debug, Clone)]
pub struct ScoreSchema {
    children: String,
    range: Option<ScoreRange>,
    default_max: String,
    invalid_error_code: u16,
    invalid_type_code: u16,
    invalid_range_code: u16,
    undefined_code: u16,
    decimal_regex: Regex,
}

impl ScoreSchema {
    /// Resolve `config` against the defaults of `standard`.
    ///
    /// A range is only enforced when the config names one or sets
    /// `standard_range`, which picks the catalog's range.
    pub fn from_config(config: &ScoreConfig, standard: Standard) -> Result<Self> {
        let catalog = standard.catalog();
        let codes = &catalog.error_codes;

        let decimal_regex = compile_pattern(
            "decimal_regex",
            config.decimal_regex.as_deref().unwrap_or(catalog.cmi_decimal),
        )?;
        let range = match (config.score_range.as_deref(), config.standard_range) {
            (Some(descriptor), _) => Some(descriptor.parse::<ScoreRange>()?),
            (None, true) => Some(catalog.score_range.parse::<ScoreRange>()?),
            (None, false) => None,
        };

        Ok(Self {
            children: config
                .score_children
                .clone()
                .unwrap_or_else(|| catalog.score_children.to_string()),
            range,
            // an explicit empty max is kept as-is
            default_max: config.max.clone().unwrap_or_else(|| "100".to_string()),
            invalid_error_code: config.invalid_error_code.unwrap_or(codes.invalid_set_value),
            invalid_type_code: config.invalid_type_code.unwrap_or(codes.type_mismatch),
            invalid_range_code: config.invalid_range_code.unwrap_or(codes.value_out_of_range),
            undefined_code: codes.undefined_data_model,
            decimal_regex,
        })
    }

    pub fn children(&self) -> &str {
        &self.children
    }

    pub fn range(&self) -> Option<&ScoreRange> {
        self.range.as_ref()
    }

    pub fn default_max(&self) -> &str {
        &self.default_max
    }

    pub fn invalid_error_code(&self) -> u16 {
        self.invalid_error_code
    }

    pub fn invalid_type_code(&self) -> u16 {
        self.invalid_type_code
    }

    pub fn invalid_range_code(&self) -> u16 {
        self.invalid_range_code
    }

    /// Code for reads and writes of names the score does not define.
    pub fn undefined_code(&self) -> u16 {
        self.undefined_code
    }

    pub fn decimal_regex(&self) -> &Regex {
        &self.decimal_regex
    }

    /// Format first, then range when one is configured.
    fn check(&self, field: &str, value: &str) -> Result<()> {
        check_valid_format(Some(value), &self.decimal_regex, self.invalid_type_code, false)
            .and_then(|()| match &self.range {
                Some(range) => check_valid_range(value, range, self.invalid_range_code),
                None => Ok(()),
            })
            .inspect_err(|e| {
                tracing::debug!(field, value, code = ?e.code(), "rejected score write");
            })
    }
}

/// A value bounded by a minimum and a maximum, e.g. `cmi.core.score`.
#[derive(Debug, Clone)]
pub struct CmiScore {
    lifecycle: Lifecycle,
    schema: ScoreSchema,
    raw: String,
    min: String,
    max: String,
}

impl CmiScore {
    pub fn new(schema: ScoreSchema) -> Self {
        let max = schema.default_max.clone();
        Self {
            lifecycle: Lifecycle::new(),
            schema,
            raw: String::new(),
            min: String::new(),
            max,
        }
    }

    pub fn from_config(config: &ScoreConfig, standard: Standard) -> Result<Self> {
        Ok(Self::new(ScoreSchema::from_config(config, standard)?))
    }

    /// A score with every setting taken from `standard`.
    pub fn with_defaults(standard: Standard) -> Result<Self> {
        Self::from_config(&ScoreConfig::default(), standard)
    }

    pub fn schema(&self) -> &ScoreSchema {
        &self.schema
    }

    pub fn children(&self) -> &str {
        &self.schema.children
    }

    /// `_children` is read-only; every write is refused.
    pub fn set_children(&mut self, _children: &str) -> Result<()> {
        tracing::debug!(
            code = self.schema.invalid_error_code,
            "rejected write to score _children"
        );
        Err(CmiError::validation(self.schema.invalid_error_code))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn set_raw(&mut self, raw: &str) -> Result<()> {
        self.schema.check("raw", raw)?;
        tracing::trace!(raw, "score raw updated");
        self.raw = raw.to_string();
        Ok(())
    }

    pub fn min(&self) -> &str {
        &self.min
    }

    pub fn set_min(&mut self, min: &str) -> Result<()> {
        self.schema.check("min", min)?;
        tracing::trace!(min, "score min updated");
        self.min = min.to_string();
        Ok(())
    }

    pub fn max(&self) -> &str {
        &self.max
    }

    pub fn set_max(&mut self, max: &str) -> Result<()> {
        self.schema.check("max", max)?;
        tracing::trace!(max, "score max updated");
        self.max = max.to_string();
        Ok(())
    }

    /// Read a field by its data-model name.
    pub fn field(&self, name: &str) -> Result<&str> {
        match name {
            "_children" => Ok(self.children()),
            "raw" => Ok(self.raw()),
            "min" => Ok(self.min()),
            "max" => Ok(self.max()),
            _ => Err(CmiError::validation(self.schema.undefined_code)),
        }
    }

    /// Write a field by its data-model name.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "_children" => self.set_children(value),
            "raw" => self.set_raw(value),
            "min" => self.set_min(value),
            "max" => self.set_max(value),
            _ => {
                tracing::debug!(field = name, "write to unknown score field");
                Err(CmiError::validation(self.schema.undefined_code))
            }
        }
    }
}

impl CmiElement for CmiScore {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn to_json(&self, _mode: JsonMode) -> Value {
        json!({
            "raw": self.raw,
            "min": self.min,
            "max": self.max,
        })
    }
}

impl Serialize for CmiScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json(JsonMode::Standalone).serialize(serializer)
    }
}
