use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use drawaloud_catalog::{
    apply_descriptions, builtin_catalog, catalog_path_from_env, load_catalog_or_empty,
    load_descriptions,
};
use drawaloud_core::timeline;
use drawaloud_fhir::{DEFAULT_FILE_NAME, ExportOptions, QuestionnaireResponse, export, write_document};
use drawaloud_model::{PromptCatalog, SessionState};
use drawaloud_store::{FileStore, ResponseStore, StoreStatus};

use crate::logging::redact_value;
use crate::settings::{Settings, default_store_dir};
use crate::tables::{prompts_table, stored_responses_table, strokes_table, timeline_table};

/// Resolve the prompt catalog: settings path, then `DRAWALOUD_CATALOG`, then
/// the built-in prompts. An unreadable file gives an empty catalog.
pub fn resolve_catalog(settings: &Settings) -> Result<PromptCatalog> {
    let catalog = match settings.catalog.path.clone().or_else(catalog_path_from_env) {
        Some(path) => load_catalog_or_empty(&path),
        None => {
            debug!("using built-in prompt catalog");
            builtin_catalog()
        }
    };
    let Some(path) = &settings.catalog.descriptions else {
        return Ok(catalog);
    };
    let descriptions = match load_descriptions(path) {
        Ok(descriptions) => descriptions,
        Err(error) => {
            warn!(error = %error.user_message(), "prompt descriptions unavailable");
            return Ok(catalog);
        }
    };
    let mut prompts = catalog.into_prompts();
    apply_descriptions(&mut prompts, &descriptions);
    PromptCatalog::new(prompts).context("rebuild catalog with descriptions")
}

pub fn open_store(settings: &Settings) -> Result<ResponseStore<FileStore>> {
    let dir = match &settings.store.dir {
        Some(dir) => dir.clone(),
        None => default_store_dir().context("could not determine the data directory")?,
    };
    debug!(dir = %dir.display(), key = %settings.store.key, "opening response store");
    Ok(ResponseStore::new(FileStore::new(dir), settings.store.key.clone()))
}

/// The stored session, positioned on the first prompt.
pub fn load_state(settings: &Settings) -> Result<SessionState> {
    let catalog = resolve_catalog(settings)?;
    let store = open_store(settings)?;
    let responses = if catalog.is_empty() {
        Default::default()
    } else {
        store.load()
    };
    Ok(SessionState::with_responses(catalog, responses))
}

pub fn run_prompts(settings: &Settings) -> Result<()> {
    let catalog = resolve_catalog(settings)?;
    if catalog.is_empty() {
        println!("No prompts available.");
        return Ok(());
    }
    println!("{}", prompts_table(&catalog));
    Ok(())
}

/// `current` is the one-based stage to mark as current.
pub fn run_timeline(settings: &Settings, current: Option<usize>) -> Result<()> {
    let mut state = load_state(settings)?;
    if let Some(stage) = current {
        if !stage.checked_sub(1).is_some_and(|index| state.move_to(index)) {
            bail!(
                "stage {stage} is out of range (1..={})",
                state.catalog().len()
            );
        }
    }
    let stages = timeline::project(&state);
    println!(
        "{}",
        timeline_table(&stages, state.responses(), state.catalog())
    );
    let strokes = timeline::project_strokes(&state);
    if !strokes.is_empty() {
        println!("{}", strokes_table(&strokes));
    }
    Ok(())
}

pub fn run_inspect(settings: &Settings) -> Result<StoreStatus> {
    let catalog = resolve_catalog(settings)?;
    let store = open_store(settings)?;
    let status = store.inspect().context("read response store")?;
    match &status {
        StoreStatus::Absent => println!("No responses stored under '{}'.", store.key()),
        StoreStatus::Valid(responses) => {
            println!(
                "{} responses, {} strokes stored under '{}'.",
                responses.len(),
                responses.stroke_count(),
                store.key()
            );
            for record in responses.records() {
                debug!(
                    prompt_id = %record.prompt_id,
                    reflection = redact_value(&record.reflection_text),
                    "stored response"
                );
            }
            println!("{}", stored_responses_table(responses, &catalog));
        }
        StoreStatus::Corrupt { reason } => {
            println!(
                "Stored value under '{}' is corrupt: {reason}. It will be replaced on the next save.",
                store.key()
            );
        }
    }
    Ok(status)
}

/// Build the export document from the stored session.
pub fn export_document(
    settings: &Settings,
    options: &ExportOptions,
    authored: DateTime<Utc>,
) -> Result<QuestionnaireResponse> {
    let state = load_state(settings)?;
    for record in state.responses().records() {
        debug!(
            prompt_id = %record.prompt_id,
            strokes = record.strokes.len(),
            reflection = redact_value(&record.reflection_text),
            "exporting response"
        );
    }
    Ok(export(&state, authored, options))
}

/// Write the export to `output`, or to the default file name in the working
/// directory. Returns the written path.
pub fn run_export(
    settings: &Settings,
    options: &ExportOptions,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let path = output.map_or_else(|| PathBuf::from(DEFAULT_FILE_NAME), Path::to_path_buf);
    let document = export_document(settings, options, Utc::now())?;
    write_document(&document, &path)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), items = document.item.len(), "export complete");
    println!("Wrote {} ({} items)", path.display(), document.item.len());
    Ok(path)
}
