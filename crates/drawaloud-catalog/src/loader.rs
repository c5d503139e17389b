use std::fs;
use std::path::{Path, PathBuf};

use drawaloud_model::{Prompt, PromptCatalog};

use crate::error::{CatalogError, Result};

/// Environment variable pointing at a catalog file.
pub const CATALOG_ENV_VAR: &str = "DRAWALOUD_CATALOG";

pub fn catalog_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CATALOG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Read and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<PromptCatalog> {
    let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let catalog = parse_catalog(&text, path)?;
    tracing::info!(
        path = %path.display(),
        prompt_count = catalog.len(),
        "loaded prompt catalog"
    );
    Ok(catalog)
}

/// Load a catalog, falling back to an empty one when the source is
/// unreachable or malformed.
pub fn load_catalog_or_empty(path: &Path) -> PromptCatalog {
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(error) => {
            tracing::warn!(%error, "prompt catalog unavailable, navigation disabled");
            PromptCatalog::empty()
        }
    }
}

/// Parse catalog JSON. `path` is only used for error reporting.
pub fn parse_catalog(text: &str, path: &Path) -> Result<PromptCatalog> {
    let prompts: Vec<Prompt> =
        serde_json::from_str(text).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    PromptCatalog::new(prompts).map_err(|source| CatalogError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}
