//! The subset of the FHIR `QuestionnaireResponse` resource that is exported.

use serde::{Deserialize, Serialize};

/// Extension URL carrying the coded condition of a stroke.
pub const CONDITION_CODE_URL: &str = "http://hl7.org/fhir/StructureDefinition/condition-code";

/// Code system of stroke codes.
pub const SNOMED_SYSTEM: &str = "http://snomed.info/sct";

/// Field order is the key order of the rendered JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
    pub resource_type: String,
    pub status: String,
    pub authored: String,
    pub item: Vec<Item>,
}

impl QuestionnaireResponse {
    pub fn completed(authored: impl Into<String>, item: Vec<Item>) -> Self {
        Self {
            resource_type: "QuestionnaireResponse".to_string(),
            status: "completed".to_string(),
            authored: authored.into(),
            item,
        }
    }

    /// Look up an item by link id.
    pub fn item(&self, link_id: &str) -> Option<&Item> {
        self.item.iter().find(|item| item.link_id == link_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub link_id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer: Vec<Answer>,
}

/// One typed answer value. Exactly one `value*` field is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_boolean: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Answer {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value_string: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            value_boolean: Some(value),
            ..Self::default()
        }
    }

    pub fn date(value: impl Into<String>) -> Self {
        Self {
            value_date: Some(value.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension.push(extension);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub url: String,
    pub value_coding: Coding,
}

impl Extension {
    /// A condition-code extension with a SNOMED CT coding.
    pub fn condition_code(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            url: CONDITION_CODE_URL.to_string(),
            value_coding: Coding {
                system: SNOMED_SYSTEM.to_string(),
                code: code.into(),
                display: display.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}
