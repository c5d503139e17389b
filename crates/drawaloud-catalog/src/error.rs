#![deny(unsafe_code)]

use std::path::PathBuf;

use drawaloud_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// A message suitable for showing to the participant.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { path, .. } => format!(
                "The prompt list at {} could not be opened. No prompts are available.",
                path.display()
            ),
            Self::Parse { path, .. } | Self::Invalid { path, .. } => format!(
                "The prompt list at {} is not valid. No prompts are available.",
                path.display()
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
