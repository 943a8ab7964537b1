pub mod array;
pub mod score;

pub use array::CmiArray;
pub use score::{CmiScore, ScoreSchema};

use serde_json::Value;

/// How a model object is being projected to JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonMode {
    /// The object is the root of the projection.
    #[default]
    Standalone,
    /// The object is being projected as an entry of an enclosing collection.
    Nested,
}

/// One-way initialization flag shared by every model object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    initialized: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn initialize(&mut self) {
        self.initialized = true;
    }
}

/// Capability every model object exposes, and what an ordered collection
/// expects of its children.
pub trait CmiElement: std::fmt::Debug {
    fn lifecycle(&self) -> &Lifecycle;

    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    fn to_json(&self, mode: JsonMode) -> Value;

    fn initialized(&self) -> bool {
        self.lifecycle().initialized()
    }

    /// Called once the surrounding API has initialized after the object was
    /// created. Repeated calls have no further effect.
    fn initialize(&mut self) {
        self.lifecycle_mut().initialize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_is_one_way() {
        let mut lifecycle = Lifecycle::new();
        assert!(!lifecycle.initialized());

        lifecycle.initialize();
        assert!(lifecycle.initialized());

        lifecycle.initialize();
        assert!(lifecycle.initialized());
    }
}
