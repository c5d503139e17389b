use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One stage of the guided exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    /// Older catalogs call this `label`.
    #[serde(alias = "label")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Whether the drawing surface accepts strokes while this prompt is active.
    #[serde(default = "default_allow_draw")]
    pub allow_draw: bool,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// SNOMED CT concept attached to every stroke drawn for this prompt.
    #[serde(default, alias = "snomed", skip_serializing_if = "Option::is_none")]
    pub snomed_code: Option<String>,
}

fn default_allow_draw() -> bool {
    true
}

impl Prompt {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            allow_draw: true,
            image_ref: None,
            snomed_code: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_snomed_code(mut self, code: impl Into<String>) -> Self {
        self.snomed_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_allow_draw(mut self, allow_draw: bool) -> Self {
        self.allow_draw = allow_draw;
        self
    }

    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

/// Immutable, ordered list of prompts. The order is the navigation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PromptCatalog {
    prompts: Vec<Prompt>,
}

impl PromptCatalog {
    /// Build a catalog, rejecting blank or duplicate prompt ids.
    pub fn new(prompts: Vec<Prompt>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for (position, prompt) in prompts.iter().enumerate() {
            if prompt.id.trim().is_empty() {
                return Err(ModelError::BlankPromptId { position });
            }
            if !seen.insert(prompt.id.as_str()) {
                return Err(ModelError::DuplicatePromptId {
                    id: prompt.id.clone(),
                });
            }
        }
        Ok(Self { prompts })
    }

    /// The catalog used before (or instead of) a successful load.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Prompt> {
        self.prompts.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.prompts.iter().position(|prompt| prompt.id == id)
    }

    pub fn by_id(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|prompt| prompt.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prompt> {
        self.prompts.iter()
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn into_prompts(self) -> Vec<Prompt> {
        self.prompts
    }
}

impl<'a> IntoIterator for &'a PromptCatalog {
    type Item = &'a Prompt;
    type IntoIter = std::slice::Iter<'a, Prompt>;

    fn into_iter(self) -> Self::IntoIter {
        self.prompts.iter()
    }
}
