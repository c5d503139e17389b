//! Integration tests for the command implementations.

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};

use drawaloud_cli::commands::{
    export_document, load_state, resolve_catalog, run_export, run_inspect, run_timeline,
};
use drawaloud_cli::settings::Settings;
use drawaloud_fhir::{ExportOptions, QuestionnaireResponse, REFLECTION_LINK_ID, ReflectionPlacement};
use drawaloud_model::{CanvasSnapshot, FormFields, ResponseMap, SessionState};
use drawaloud_store::{FileStore, KeyValueStore, ResponseStore, StoreStatus};

const CATALOG: &str = r#"[
  { "id": "kitchen", "label": "The kitchen", "snomed": "225444004" },
  { "id": "garden", "title": "The garden", "allowDraw": false },
  { "id": "street", "title": "The street" }
]"#;

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

fn settings_in(dir: &Path) -> Settings {
    let catalog = dir.join("prompts.json");
    fs::write(&catalog, CATALOG).unwrap();
    let mut settings = Settings::default();
    settings.catalog.path = Some(catalog);
    settings.store.dir = Some(dir.join("store"));
    settings
}

fn save(settings: &Settings, responses: &ResponseMap) {
    let backend = FileStore::new(settings.store.dir.clone().unwrap());
    let mut store = ResponseStore::new(backend, settings.store.key.clone());
    store.save(responses).unwrap();
}

/// Strokes on kitchen, a reflection on street, nothing on garden.
fn recorded_session(settings: &Settings) -> ResponseMap {
    let mut state = SessionState::new(resolve_catalog(settings).unwrap());
    state.record_stroke(at(1));
    state.record_stroke(at(2));
    state.move_to(2);
    state.capture_current(
        FormFields {
            reflection: "busy and loud".to_string(),
            ..FormFields::blank()
        },
        CanvasSnapshot::empty(),
    );
    state.responses().clone()
}

#[test]
fn catalog_file_is_used_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let catalog = resolve_catalog(&settings).unwrap();
    let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["kitchen", "garden", "street"]);
    assert_eq!(catalog.get(0).unwrap().snomed_code.as_deref(), Some("225444004"));
    assert!(!catalog.get(1).unwrap().allow_draw);
}

#[test]
fn unreadable_catalog_leaves_it_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(dir.path());
    settings.catalog.path = Some(dir.path().join("missing.json"));
    assert!(resolve_catalog(&settings).unwrap().is_empty());
}

#[test]
fn descriptions_are_merged_into_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(dir.path());
    let markdown = dir.path().join("prompts.md");
    fs::write(&markdown, "## garden\nThink of a garden you knew.\n").unwrap();
    settings.catalog.descriptions = Some(markdown);

    let catalog = resolve_catalog(&settings).unwrap();
    assert_eq!(catalog.get(1).unwrap().description, "Think of a garden you knew.");
    assert_eq!(catalog.get(0).unwrap().description, "The kitchen");
}

#[test]
fn export_covers_stored_prompts_in_catalog_order() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    save(&settings, &recorded_session(&settings));

    let document = export_document(&settings, &ExportOptions::default(), at(10)).unwrap();
    let links: Vec<&str> = document.item.iter().map(|i| i.link_id.as_str()).collect();
    assert_eq!(links, ["kitchen", "street"]);
    assert_eq!(document.item[0].answer.len(), 2);

    let options = ExportOptions {
        reflection: ReflectionPlacement::SessionItem,
        include_canvas: false,
    };
    let document = export_document(&settings, &options, at(10)).unwrap();
    assert_eq!(document.item.last().unwrap().link_id, REFLECTION_LINK_ID);
}

#[test]
fn export_writes_the_requested_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    save(&settings, &recorded_session(&settings));

    let output = dir.path().join("out.json");
    let written = run_export(&settings, &ExportOptions::default(), Some(&output)).unwrap();
    assert_eq!(written, output);

    let parsed: QuestionnaireResponse =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(parsed.item.len(), 2);
}

#[test]
fn stored_responses_for_unknown_prompts_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let mut responses = recorded_session(&settings);
    responses.entry("retired").confirmed = true;
    save(&settings, &responses);

    let state = load_state(&settings).unwrap();
    assert!(state.response("retired").is_none());
    assert_eq!(state.responses().len(), 2);
}

#[test]
fn inspect_reports_each_store_condition() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    assert_eq!(run_inspect(&settings).unwrap(), StoreStatus::Absent);

    let responses = recorded_session(&settings);
    save(&settings, &responses);
    assert_eq!(run_inspect(&settings).unwrap(), StoreStatus::Valid(responses));

    let mut backend = FileStore::new(settings.store.dir.clone().unwrap());
    backend.set(&settings.store.key, "not json").unwrap();
    assert!(matches!(
        run_inspect(&settings).unwrap(),
        StoreStatus::Corrupt { .. }
    ));
}

#[test]
fn timeline_rejects_stages_outside_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    assert!(run_timeline(&settings, Some(3)).is_ok());
    assert!(run_timeline(&settings, Some(0)).is_err());
    assert!(run_timeline(&settings, Some(4)).is_err());
}
