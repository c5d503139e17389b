use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed freehand gesture.
///
/// Strokes are never edited after they are recorded; they only leave a
/// response through undo (last one) or clear (all of them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub timestamp: DateTime<Utc>,
    pub prompt_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snomed_code: Option<String>,
}

impl Stroke {
    pub fn new(
        timestamp: DateTime<Utc>,
        prompt_id: impl Into<String>,
        snomed_code: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            prompt_id: prompt_id.into(),
            snomed_code,
        }
    }
}
