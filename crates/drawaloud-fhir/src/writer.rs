//! Rendering and writing exported documents.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::document::QuestionnaireResponse;
use crate::error::{ExportError, Result};

/// File name offered for a downloaded export.
pub const DEFAULT_FILE_NAME: &str = "questionnaire_response.json";

/// Render as two-space indented JSON.
pub fn to_json_pretty(document: &QuestionnaireResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Write the rendered document to `path`, with a trailing newline.
pub fn write_document(document: &QuestionnaireResponse, path: &Path) -> Result<()> {
    let mut text = to_json_pretty(document)?;
    text.push('\n');
    fs::write(path, text).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), items = document.item.len(), "wrote questionnaire response");
    Ok(())
}
