use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::cmi::{CmiElement, JsonMode, Lifecycle};
use crate::config::ArrayConfig;
use crate::utils::error::{CmiError, Result};

/// An insertion-ordered `*.n` collection, e.g. `cmi.objectives`.
///
/// `count` is always the current length of the sequence. Children are
/// appended by the surrounding API.
#[derive(Debug)]
pub struct CmiArray {
    lifecycle: Lifecycle,
    children: String,
    error_code: u16,
    child_array: Vec<Box<dyn CmiElement>>,
}

impl CmiArray {
    pub fn new(children: impl Into<String>, error_code: u16) -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            children: children.into(),
            error_code,
            child_array: Vec::new(),
        }
    }

    pub fn from_config(config: &ArrayConfig) -> Self {
        Self::new(config.children.clone(), config.error_code)
    }

    pub fn children(&self) -> &str {
        &self.children
    }

    pub fn set_children(&mut self, _children: &str) -> Result<()> {
        tracing::debug!(code = self.error_code, "rejected write to array _children");
        Err(CmiError::validation(self.error_code))
    }

    pub fn count(&self) -> usize {
        self.child_array.len()
    }

    pub fn set_count(&mut self, _count: usize) -> Result<()> {
        tracing::debug!(code = self.error_code, "rejected write to array _count");
        Err(CmiError::validation(self.error_code))
    }

    pub fn error_code(&self) -> u16 {
        self.error_code
    }

    pub fn is_empty(&self) -> bool {
        self.child_array.is_empty()
    }

    pub fn push(&mut self, child: Box<dyn CmiElement>) {
        self.child_array.push(child);
        tracing::trace!(count = self.child_array.len(), "array child appended");
    }

    pub fn get(&self, index: usize) -> Option<&dyn CmiElement> {
        self.child_array.get(index).map(|child| child.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Box<dyn CmiElement>> {
        self.child_array.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn CmiElement> {
        self.child_array.iter().map(|child| child.as_ref())
    }
}

impl CmiElement for CmiArray {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    /// Keys are the stringified positions `"0"`, `"1"`, ... in insertion
    /// order. Each child is projected in nested mode.
    fn to_json(&self, _mode: JsonMode) -> Value {
        let result: Map<String, Value> = self
            .child_array
            .iter()
            .enumerate()
            .map(|(i, child)| (i.to_string(), child.to_json(JsonMode::Nested)))
            .collect();
        Value::Object(result)
    }
}

impl Serialize for CmiArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json(JsonMode::Standalone).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmi::CmiScore;
    use crate::constants::Standard;
    use serde_json::json;

    /// Records the mode it was serialized with.
    #[derive(Debug, Default)]
    struct ModeProbe {
        lifecycle: Lifecycle,
    }

    impl CmiElement for ModeProbe {
        fn lifecycle(&self) -> &Lifecycle {
            &self.lifecycle
        }

        fn lifecycle_mut(&mut self) -> &mut Lifecycle {
            &mut self.lifecycle
        }

        fn to_json(&self, mode: JsonMode) -> Value {
            json!({ "nested": mode == JsonMode::Nested })
        }
    }

    fn score(raw: &str) -> Box<dyn CmiElement> {
        let mut score = CmiScore::with_defaults(Standard::Scorm12).unwrap();
        score.set_raw(raw).unwrap();
        Box::new(score)
    }

    #[test]
    fn test_starts_empty() {
        let array = CmiArray::new("id,score", 402);
        assert_eq!(array.count(), 0);
        assert!(array.is_empty());
        assert_eq!(array.to_json(JsonMode::Standalone), json!({}));
        assert!(!array.initialized());
    }

    #[test]
    fn test_count_tracks_appends() {
        let mut array = CmiArray::new("id,score", 402);
        for i in 0..5 {
            array.push(score(&i.to_string()));
            assert_eq!(array.count(), i + 1);
        }

        let _ = array.to_json(JsonMode::Standalone);
        let _ = array.to_json(JsonMode::Standalone);
        assert_eq!(array.count(), 5);
    }

    #[test]
    fn test_read_only_fields() {
        let mut array = CmiArray::new("id,score", 203);
        array.push(score("1"));

        assert_eq!(array.set_children("x").unwrap_err().code(), Some(203));
        assert_eq!(array.set_count(9).unwrap_err().code(), Some(203));
        assert_eq!(array.children(), "id,score");
        assert_eq!(array.count(), 1);
    }

    #[test]
    fn test_to_json_uses_string_index_keys() {
        let mut array = CmiArray::new("raw,min,max", 402);
        array.push(score("10"));
        array.push(score("20"));

        assert_eq!(
            serde_json::to_string(&array).unwrap(),
            r#"{"0":{"raw":"10","min":"","max":"100"},"1":{"raw":"20","min":"","max":"100"}}"#
        );
    }

    #[test]
    fn test_children_serialized_in_nested_mode() {
        let mut array = CmiArray::new("probe", 402);
        array.push(Box::new(ModeProbe::default()));

        assert_eq!(
            array.to_json(JsonMode::Standalone),
            json!({"0": {"nested": true}})
        );
        assert_eq!(
            array.get(0).unwrap().to_json(JsonMode::Standalone),
            json!({"nested": false})
        );
    }

    #[test]
    fn test_nested_arrays() {
        let mut inner = CmiArray::new("raw", 402);
        inner.push(score("5"));

        let mut outer = CmiArray::new("inner", 402);
        outer.push(Box::new(inner));

        assert_eq!(
            outer.to_json(JsonMode::Standalone),
            json!({"0": {"0": {"raw": "5", "min": "", "max": "100"}}})
        );
    }

    #[test]
    fn test_initialize_only_affects_self() {
        let mut array = CmiArray::new("raw", 402);
        array.push(score("5"));
        array.initialize();

        assert!(array.initialized());
        assert!(!array.get(0).unwrap().initialized());

        array.get_mut(0).unwrap().initialize();
        assert!(array.iter().all(|child| child.initialized()));
    }
}
