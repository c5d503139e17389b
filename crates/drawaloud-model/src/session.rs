//! Pure session state: the active prompt and the responses collected so far.
//!
//! Every method here is a complete state transition. None of them touch the
//! drawing surface, the form inputs, or storage; the controller in
//! `drawaloud-core` reads those collaborators and feeds the results in.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::canvas::CanvasSnapshot;
use crate::prompt::{Prompt, PromptCatalog};
use crate::response::{FormFields, ResponseMap, ResponseRecord};
use crate::stroke::Stroke;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    catalog: PromptCatalog,
    current_index: usize,
    responses: ResponseMap,
}

impl SessionState {
    /// A fresh session positioned on the first prompt.
    pub fn new(catalog: PromptCatalog) -> Self {
        Self {
            catalog,
            current_index: 0,
            responses: ResponseMap::new(),
        }
    }

    /// A session hydrated from previously stored responses.
    pub fn with_responses(catalog: PromptCatalog, responses: ResponseMap) -> Self {
        let mut state = Self::new(catalog);
        state.replace_responses(responses);
        state
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_prompt(&self) -> Option<&Prompt> {
        self.catalog.get(self.current_index)
    }

    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub fn response(&self, prompt_id: &str) -> Option<&ResponseRecord> {
        self.responses.get(prompt_id)
    }

    pub fn current_response(&self) -> Option<&ResponseRecord> {
        let prompt = self.current_prompt()?;
        self.responses.get(&prompt.id)
    }

    /// Navigation is disabled until a non-empty catalog is installed.
    pub fn is_navigable(&self) -> bool {
        !self.catalog.is_empty()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.catalog.len()
    }

    pub fn next_index(&self) -> Option<usize> {
        let next = self.current_index.checked_add(1)?;
        self.contains_index(next).then_some(next)
    }

    pub fn previous_index(&self) -> Option<usize> {
        let previous = self.current_index.checked_sub(1)?;
        self.contains_index(previous).then_some(previous)
    }

    /// Install the catalog once. A session that already has prompts keeps them.
    ///
    /// Returns `false` when a catalog was already present.
    pub fn attach_catalog(&mut self, catalog: PromptCatalog) -> bool {
        if !self.catalog.is_empty() {
            return false;
        }
        self.catalog = catalog;
        self.current_index = 0;
        let dropped = self.responses.retain_known(&self.catalog);
        if !dropped.is_empty() {
            debug!(dropped = ?dropped, "dropped responses for unknown prompts");
        }
        true
    }

    /// Replace all responses, keeping only those for prompts in the catalog.
    pub fn replace_responses(&mut self, mut responses: ResponseMap) {
        let dropped = responses.retain_known(&self.catalog);
        if !dropped.is_empty() {
            debug!(dropped = ?dropped, "dropped responses for unknown prompts");
        }
        let repaired = responses.normalize_strokes();
        if !repaired.is_empty() {
            warn!(prompts = ?repaired, "repaired stored strokes out of order or for other prompts");
        }
        self.responses = responses;
    }

    /// Move the cursor. The caller is responsible for capturing the prompt
    /// being left before calling this.
    ///
    /// Returns `false`, without any change, when `index` is out of range.
    pub fn move_to(&mut self, index: usize) -> bool {
        if !self.contains_index(index) {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Overwrite the current prompt's captured fields and canvas snapshot.
    pub fn capture_current(&mut self, fields: FormFields, canvas: CanvasSnapshot) -> bool {
        let Some(prompt_id) = self.current_prompt().map(|prompt| prompt.id.clone()) else {
            return false;
        };
        self.responses
            .entry(&prompt_id)
            .apply_capture(fields, canvas);
        true
    }

    /// Append a stroke for the current prompt.
    ///
    /// A timestamp earlier than the previous stroke is clamped to it so the
    /// sequence stays non-decreasing.
    pub fn record_stroke(&mut self, timestamp: DateTime<Utc>) -> Option<&Stroke> {
        let prompt = self.current_prompt()?;
        let prompt_id = prompt.id.clone();
        let snomed_code = prompt.snomed_code.clone();
        let record = self.responses.entry(&prompt_id);
        let timestamp = match record.strokes.last() {
            Some(last) if last.timestamp > timestamp => {
                debug!(
                    prompt_id = %prompt_id,
                    %timestamp,
                    last = %last.timestamp,
                    "clamped out-of-order stroke timestamp"
                );
                last.timestamp
            }
            _ => timestamp,
        };
        record
            .strokes
            .push(Stroke::new(timestamp, prompt_id, snomed_code));
        record.strokes.last()
    }

    /// Replace the current prompt's canvas snapshot, leaving the form fields
    /// as they are.
    pub fn set_current_canvas(&mut self, canvas: CanvasSnapshot) -> bool {
        let Some(prompt_id) = self.current_prompt().map(|prompt| prompt.id.clone()) else {
            return false;
        };
        self.responses.entry(&prompt_id).canvas = canvas;
        true
    }

    /// Remove the most recent stroke of the current prompt.
    pub fn undo_last_stroke(&mut self) -> Option<Stroke> {
        let prompt_id = self.current_prompt()?.id.clone();
        self.responses.get_mut(&prompt_id)?.strokes.pop()
    }

    /// Drop every stroke and the canvas snapshot of the current prompt.
    /// Reflection, date, and confirmation stay as they are.
    pub fn clear_current(&mut self) -> bool {
        let Some(prompt_id) = self.current_prompt().map(|prompt| prompt.id.clone()) else {
            return false;
        };
        if let Some(record) = self.responses.get_mut(&prompt_id) {
            record.strokes.clear();
            record.canvas = CanvasSnapshot::empty();
        }
        true
    }
}
