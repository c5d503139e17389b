use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::canvas::CanvasSnapshot;
use crate::prompt::PromptCatalog;
use crate::stroke::Stroke;

/// The text, date, and confirmation inputs that accompany a drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub reflection: String,
    pub confirmed: bool,
    pub date: Option<String>,
}

impl FormFields {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Trim the reflection and drop blank dates, the way values are stored.
    #[must_use]
    pub fn normalized(self) -> Self {
        let date = self
            .date
            .map(|date| date.trim().to_string())
            .filter(|date| !date.is_empty());
        Self {
            reflection: self.reflection.trim().to_string(),
            confirmed: self.confirmed,
            date,
        }
    }
}

/// The saved answer for one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub prompt_id: String,
    #[serde(default)]
    pub reflection_text: String,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub strokes: Vec<Stroke>,
    #[serde(default)]
    pub canvas: CanvasSnapshot,
}

impl ResponseRecord {
    pub fn new(prompt_id: impl Into<String>) -> Self {
        Self {
            prompt_id: prompt_id.into(),
            reflection_text: String::new(),
            confirmed: false,
            date: None,
            strokes: Vec::new(),
            canvas: CanvasSnapshot::empty(),
        }
    }

    /// True when the record carries anything worth exporting.
    ///
    /// The canvas snapshot alone does not count; it is restored on revisit but
    /// has no answer of its own.
    pub fn has_content(&self) -> bool {
        !self.strokes.is_empty()
            || !self.reflection_text.is_empty()
            || self.confirmed
            || self.date.as_deref().is_some_and(|date| !date.is_empty())
    }

    pub fn form_fields(&self) -> FormFields {
        FormFields {
            reflection: self.reflection_text.clone(),
            confirmed: self.confirmed,
            date: self.date.clone(),
        }
    }

    /// Drop strokes recorded for another prompt and put the rest in
    /// timestamp order. Returns `true` when anything changed.
    pub fn normalize_strokes(&mut self) -> bool {
        let before = self.strokes.len();
        let prompt_id = &self.prompt_id;
        self.strokes.retain(|stroke| stroke.prompt_id == *prompt_id);
        let sorted = self
            .strokes
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp);
        if !sorted {
            self.strokes.sort_by_key(|stroke| stroke.timestamp);
        }
        !sorted || self.strokes.len() != before
    }

    /// Overwrite the captured fields. Strokes are left untouched.
    pub fn apply_capture(&mut self, fields: FormFields, canvas: CanvasSnapshot) {
        let fields = fields.normalized();
        self.reflection_text = fields.reflection;
        self.confirmed = fields.confirmed;
        self.date = fields.date;
        self.canvas = canvas;
    }
}

/// Responses keyed by prompt id, ordered by id so serialization is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMap(BTreeMap<String, ResponseRecord>);

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, prompt_id: &str) -> Option<&ResponseRecord> {
        self.0.get(prompt_id)
    }

    pub fn get_mut(&mut self, prompt_id: &str) -> Option<&mut ResponseRecord> {
        self.0.get_mut(prompt_id)
    }

    /// Insert a record under its own prompt id, replacing any previous one.
    pub fn insert(&mut self, record: ResponseRecord) -> Option<ResponseRecord> {
        self.0.insert(record.prompt_id.clone(), record)
    }

    /// The record for `prompt_id`, created blank on first use.
    pub fn entry(&mut self, prompt_id: &str) -> &mut ResponseRecord {
        self.0
            .entry(prompt_id.to_string())
            .or_insert_with(|| ResponseRecord::new(prompt_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResponseRecord)> {
        self.0.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn records(&self) -> impl Iterator<Item = &ResponseRecord> {
        self.0.values()
    }

    pub fn stroke_count(&self) -> usize {
        self.0.values().map(|record| record.strokes.len()).sum()
    }

    /// Drop entries whose prompt id is not in `catalog` (or whose key disagrees
    /// with the record's own id). Returns the dropped keys.
    pub fn retain_known(&mut self, catalog: &PromptCatalog) -> Vec<String> {
        let mut dropped = Vec::new();
        self.0.retain(|id, record| {
            let keep = catalog.contains(id) && record.prompt_id == *id;
            if !keep {
                dropped.push(id.clone());
            }
            keep
        });
        dropped
    }

    /// Apply [`ResponseRecord::normalize_strokes`] to every record and return
    /// the ids of the records that changed.
    pub fn normalize_strokes(&mut self) -> Vec<String> {
        self.0
            .values_mut()
            .filter_map(|record| {
                record
                    .normalize_strokes()
                    .then(|| record.prompt_id.clone())
            })
            .collect()
    }
}

impl FromIterator<ResponseRecord> for ResponseMap {
    fn from_iter<I: IntoIterator<Item = ResponseRecord>>(iter: I) -> Self {
        let mut map = Self::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Prompt;

    #[test]
    fn normalized_fields_trim_and_drop_blank_date() {
        let fields = FormFields {
            reflection: "  calm  ".into(),
            confirmed: true,
            date: Some("   ".into()),
        }
        .normalized();
        assert_eq!(fields.reflection, "calm");
        assert_eq!(fields.date, None);
        assert!(fields.confirmed);
    }

    #[test]
    fn capture_keeps_strokes() {
        let mut record = ResponseRecord::new("p1");
        record.strokes.push(crate::Stroke::new(
            chrono::Utc::now(),
            "p1",
            None,
        ));
        record.apply_capture(
            FormFields {
                reflection: "steady".into(),
                confirmed: false,
                date: Some("2024-05-01".into()),
            },
            CanvasSnapshot::empty(),
        );
        assert_eq!(record.strokes.len(), 1);
        assert_eq!(record.reflection_text, "steady");
        assert_eq!(record.date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn blank_record_has_no_content() {
        let mut record = ResponseRecord::new("p1");
        assert!(!record.has_content());
        record.canvas = CanvasSnapshot::from_value(serde_json::json!({"objects": []}));
        assert!(!record.has_content());
        record.confirmed = true;
        assert!(record.has_content());
    }

    #[test]
    fn retain_known_drops_unknown_and_mismatched_keys() {
        let catalog = PromptCatalog::new(vec![Prompt::new("p1", "One")]).unwrap();
        let mut map: ResponseMap = [ResponseRecord::new("p1"), ResponseRecord::new("gone")]
            .into_iter()
            .collect();
        let dropped = map.retain_known(&catalog);
        assert_eq!(dropped, ["gone"]);
        assert_eq!(map.len(), 1);
        assert!(map.get("p1").is_some());
    }

    #[test]
    fn normalize_strokes_sorts_and_drops_foreign_strokes() {
        use chrono::{TimeZone, Utc};
        let at = |seconds: i64| Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap();
        let mut record = ResponseRecord::new("p1");
        record.strokes = vec![
            Stroke::new(at(5), "p1", None),
            Stroke::new(at(7), "p2", None),
            Stroke::new(at(1), "p1", None),
        ];
        let mut map: ResponseMap = [record, ResponseRecord::new("p2")].into_iter().collect();

        assert_eq!(map.normalize_strokes(), ["p1"]);
        let times: Vec<_> = map.get("p1").unwrap().strokes.iter().map(|s| s.timestamp).collect();
        assert_eq!(times, [at(1), at(5)]);
        assert!(map.normalize_strokes().is_empty());
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let record: ResponseRecord = serde_json::from_str(r#"{"promptId":"p1"}"#).unwrap();
        assert_eq!(record, ResponseRecord::new("p1"));
    }
}
