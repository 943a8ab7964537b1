use serde::Serialize;
use serde_json::{json, Value};

use crate::cmi::{CmiArray, CmiElement, CmiScore, JsonMode, ScoreSchema};
use crate::config::toml_config::{CheckDocument, FieldWrite};
use crate::constants::Standard;
use crate::utils::error::{CmiError, Result};
use crate::utils::validation::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedWrite {
    pub target: String,
    pub value: String,
    pub code: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub snapshot: Value,
    pub rejected: Vec<RejectedWrite>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Builds the model objects a [`CheckDocument`] describes and replays its
/// writes against them.
pub struct CheckRunner {
    document: CheckDocument,
}

impl CheckRunner {
    pub fn new(document: CheckDocument) -> Self {
        Self { document }
    }

    /// Rejected writes are collected in the report; only configuration
    /// problems fail the run.
    pub fn run(&self) -> Result<CheckReport> {
        self.document.validate()?;

        let standard = self.document.standard;
        let schema = ScoreSchema::from_config(&self.document.score, standard)?;
        tracing::info!(%standard, "checking score writes");

        let mut rejected = Vec::new();
        let mut score = CmiScore::new(schema.clone());
        score.initialize();

        let mut collection = match &self.document.collection {
            Some(section) => {
                let mut array = CmiArray::from_config(&section.array_config(standard));
                array.initialize();

                for (index, entry) in section.entries.iter().enumerate() {
                    let mut child = CmiScore::new(schema.clone());
                    child.initialize();
                    for (field, value) in entry.writes() {
                        let target = format!("collection.{}.{}", index, field);
                        record(&mut rejected, &target, value, child.set_field(field, value))?;
                    }
                    array.push(Box::new(child));
                }
                Some(array)
            }
            None => None,
        };

        for FieldWrite { target, value } in &self.document.writes {
            let outcome = match target.strip_prefix("collection.") {
                Some(field) => match collection.as_mut() {
                    Some(array) => write_collection(array, standard, field, value),
                    None => Err(CmiError::ConfigError {
                        message: format!("write to '{}' but no [collection] is defined", target),
                    }),
                },
                None => score.set_field(target, value),
            };
            record(&mut rejected, target, value, outcome)?;
        }

        let mut snapshot = json!({ "score": score.to_json(JsonMode::Standalone) });
        if let Some(array) = &collection {
            snapshot["collection"] = array.to_json(JsonMode::Standalone);
        }

        tracing::info!(rejected = rejected.len(), "check finished");
        Ok(CheckReport { snapshot, rejected })
    }
}

fn write_collection(
    array: &mut CmiArray,
    standard: Standard,
    field: &str,
    value: &str,
) -> Result<()> {
    match field {
        "_children" => array.set_children(value),
        // always refused
        "_count" => array.set_count(value.trim().parse().unwrap_or_default()),
        _ => Err(CmiError::validation(
            standard.catalog().error_codes.undefined_data_model,
        )),
    }
}

/// Validation failures are recorded, anything else is propagated.
fn record(
    rejected: &mut Vec<RejectedWrite>,
    target: &str,
    value: &str,
    outcome: Result<()>,
) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(CmiError::ValidationError { code }) => {
            tracing::warn!(write_target = target, value, code, "write rejected");
            rejected.push(RejectedWrite {
                target: target.to_string(),
                value: value.to_string(),
                code,
            });
            Ok(())
        }
        Err(e) => Err(e),
    }
}
