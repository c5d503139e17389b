use drawaloud_store::StoreError;
use thiserror::Error;

/// Failure reported by an external collaborator (drawing surface or form).
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("drawing surface could not {operation}: {reason}")]
    Canvas {
        operation: &'static str,
        reason: String,
    },
    #[error("form input unavailable: {0}")]
    Form(String),
}

impl SurfaceError {
    pub fn canvas(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Canvas {
            operation,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("enter some reflection text before adding it to the drawing")]
    EmptyReflection,
    #[error("no prompt is active")]
    NoActivePrompt,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
