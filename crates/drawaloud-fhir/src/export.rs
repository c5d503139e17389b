//! Session to `QuestionnaireResponse` conversion.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use drawaloud_model::{Prompt, ResponseRecord, SessionState, Stroke};

use crate::document::{Answer, Extension, Item, QuestionnaireResponse};

/// Link id of the session-level reflection item.
pub const REFLECTION_LINK_ID: &str = "reflection";

/// Display text of the session-level reflection item.
pub const REFLECTION_TEXT: &str = "Reflection Words";

/// Where reflection text ends up in the exported document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReflectionPlacement {
    /// A string answer on the prompt's own item.
    #[default]
    PerPrompt,
    /// One trailing item collecting every reflection in catalog order.
    SessionItem,
}

impl ReflectionPlacement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerPrompt => "per-prompt",
            Self::SessionItem => "session-item",
        }
    }
}

impl std::fmt::Display for ReflectionPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub reflection: ReflectionPlacement,
    /// Attach each prompt's canvas snapshot as a JSON string answer.
    pub include_canvas: bool,
}

/// Build the document for `state`.
///
/// Only prompts whose response has content produce an item. Apart from
/// `authored`, the result depends on nothing but `state` and `options`.
pub fn export(
    state: &SessionState,
    authored: DateTime<Utc>,
    options: &ExportOptions,
) -> QuestionnaireResponse {
    let mut items = Vec::new();
    let mut reflections = Vec::new();

    for prompt in state.catalog() {
        let Some(record) = state
            .response(&prompt.id)
            .filter(|record| record.has_content())
        else {
            continue;
        };
        let mut answer: Vec<Answer> = record
            .strokes
            .iter()
            .map(|stroke| stroke_answer(stroke, prompt))
            .collect();

        let reflection = record.reflection_text.trim();
        if !reflection.is_empty() {
            match options.reflection {
                ReflectionPlacement::PerPrompt => answer.push(Answer::string(reflection)),
                ReflectionPlacement::SessionItem => reflections.push(Answer::string(reflection)),
            }
        }
        answer.extend(typed_answers(record));
        if options.include_canvas && !record.canvas.is_empty() {
            answer.push(Answer::string(record.canvas.as_value().to_string()));
        }

        items.push(Item {
            link_id: prompt.id.clone(),
            text: prompt.title.clone(),
            answer,
        });
    }

    if !reflections.is_empty() {
        items.push(Item {
            link_id: REFLECTION_LINK_ID.to_string(),
            text: REFLECTION_TEXT.to_string(),
            answer: reflections,
        });
    }

    info!(
        items = items.len(),
        reflection = %options.reflection,
        "built questionnaire response"
    );
    QuestionnaireResponse::completed(format_instant(authored), items)
}

fn stroke_answer(stroke: &Stroke, prompt: &Prompt) -> Answer {
    let answer = Answer::string(format!("Drawn at {}", format_instant(stroke.timestamp)));
    match stroke.snomed_code.as_deref().filter(|code| !code.is_empty()) {
        Some(code) => answer.with_extension(Extension::condition_code(code, &prompt.title)),
        None => answer,
    }
}

fn typed_answers(record: &ResponseRecord) -> impl Iterator<Item = Answer> + '_ {
    let confirmed = record.confirmed.then(|| Answer::boolean(true));
    let date = record
        .date
        .as_deref()
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .map(Answer::date);
    confirmed.into_iter().chain(date)
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use drawaloud_model::{FormFields, PromptCatalog};

    fn state() -> SessionState {
        let catalog = PromptCatalog::new(vec![
            Prompt::new("p1", "Kitchen").with_snomed_code("225444004"),
            Prompt::new("p2", "Garden"),
        ])
        .unwrap();
        SessionState::new(catalog)
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn stroke_answer_carries_time_and_code() {
        let mut state = state();
        state.record_stroke(at(0));
        let document = export(&state, at(10), &ExportOptions::default());

        let answer = &document.item[0].answer[0];
        assert_eq!(
            answer.value_string.as_deref(),
            Some("Drawn at 2023-11-14T22:13:20.000Z")
        );
        let coding = &answer.extension[0].value_coding;
        assert_eq!(coding.code, "225444004");
        assert_eq!(coding.display, "Kitchen");
        assert_eq!(coding.system, "http://snomed.info/sct");
    }

    #[test]
    fn uncoded_strokes_have_no_extension() {
        let mut state = state();
        state.move_to(1);
        state.record_stroke(at(0));
        let document = export(&state, at(10), &ExportOptions::default());
        assert!(document.item[0].answer[0].extension.is_empty());
    }

    #[test]
    fn typed_answers_follow_strokes_and_reflection() {
        let mut state = state();
        state.record_stroke(at(0));
        state.capture_current(
            FormFields {
                reflection: "light through the window".to_string(),
                confirmed: true,
                date: Some("1998-06-01".to_string()),
            },
            Default::default(),
        );
        let document = export(&state, at(10), &ExportOptions::default());
        let answer = &document.item[0].answer;

        assert_eq!(answer.len(), 4);
        assert!(answer[0].extension.len() == 1);
        assert_eq!(
            answer[1].value_string.as_deref(),
            Some("light through the window")
        );
        assert_eq!(answer[2].value_boolean, Some(true));
        assert_eq!(answer[3].value_date.as_deref(), Some("1998-06-01"));
    }

    #[test]
    fn unconfirmed_without_date_adds_no_typed_answers() {
        let mut state = state();
        state.record_stroke(at(0));
        let document = export(&state, at(10), &ExportOptions::default());
        assert_eq!(document.item[0].answer.len(), 1);
    }

    #[test]
    fn placement_names_match_settings_values() {
        assert_eq!(ReflectionPlacement::PerPrompt.to_string(), "per-prompt");
        assert_eq!(ReflectionPlacement::SessionItem.to_string(), "session-item");
    }
}
