//! Projection of a session into renderable timeline data.
//!
//! Both projections are pure functions of the session state; they can be
//! recomputed as often as the renderer likes.

use chrono::{DateTime, Utc};
use drawaloud_model::SessionState;
use serde::Serialize;

/// Progress of one stage relative to the active prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Past,
    Current,
    Future,
}

impl StageStatus {
    pub fn for_index(index: usize, current: usize) -> Self {
        match index.cmp(&current) {
            std::cmp::Ordering::Less => Self::Past,
            std::cmp::Ordering::Equal => Self::Current,
            std::cmp::Ordering::Greater => Self::Future,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Current => "current",
            Self::Future => "future",
        }
    }
}

/// One prompt on the stage timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageMarker {
    pub index: usize,
    pub label: String,
    pub status: StageStatus,
    /// Saved date and reflection joined by `" | "`, when either is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// One recorded stroke on the stroke-over-time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrokePoint {
    pub timestamp: DateTime<Utc>,
    pub prompt_index: usize,
    pub prompt_id: String,
    pub label: String,
}

/// One marker per prompt, in catalog order.
pub fn project(state: &SessionState) -> Vec<StageMarker> {
    let current = state.current_index();
    state
        .catalog()
        .iter()
        .enumerate()
        .map(|(index, prompt)| {
            let annotation = state.response(&prompt.id).and_then(|record| {
                let parts: Vec<&str> = [record.date.as_deref(), Some(record.reflection_text.as_str())]
                    .into_iter()
                    .flatten()
                    .filter(|part| !part.is_empty())
                    .collect();
                (!parts.is_empty()).then(|| parts.join(" | "))
            });
            StageMarker {
                index,
                label: prompt.title.clone(),
                status: StageStatus::for_index(index, current),
                annotation,
            }
        })
        .collect()
}

/// Every recorded stroke, oldest first.
pub fn project_strokes(state: &SessionState) -> Vec<StrokePoint> {
    let mut points: Vec<StrokePoint> = state
        .catalog()
        .iter()
        .enumerate()
        .filter_map(|(index, prompt)| {
            state
                .response(&prompt.id)
                .map(|record| (index, prompt, record))
        })
        .flat_map(|(index, prompt, record)| {
            record.strokes.iter().map(move |stroke| StrokePoint {
                timestamp: stroke.timestamp,
                prompt_index: index,
                prompt_id: prompt.id.clone(),
                label: prompt.title.clone(),
            })
        })
        .collect();
    points.sort_by_key(|point| point.timestamp);
    points
}
