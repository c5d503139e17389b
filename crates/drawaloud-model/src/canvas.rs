use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serialized content of the drawing surface for one prompt.
///
/// The model never looks inside the value. The only guarantee is the one the
/// drawing surface gives: restoring a captured snapshot reproduces the drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasSnapshot(Value);

impl CanvasSnapshot {
    /// The snapshot of a blank surface.
    pub fn empty() -> Self {
        Self(Value::Null)
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for CanvasSnapshot {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
