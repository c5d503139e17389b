//! FHIR export for drawaloud sessions.
//!
//! A session is exported as a single `QuestionnaireResponse` resource:
//!
//! - **Items**: one per prompt with content, in catalog order
//! - **Answers**: one per stroke, then reflection, confirmation, and date
//! - **Reflection**: per prompt, or gathered into one session-level item

mod document;
mod error;
mod export;
mod writer;

pub use document::{
    Answer, Coding, CONDITION_CODE_URL, Extension, Item, QuestionnaireResponse, SNOMED_SYSTEM,
};
pub use error::{ExportError, Result};
pub use export::{
    ExportOptions, REFLECTION_LINK_ID, REFLECTION_TEXT, ReflectionPlacement, export,
};
pub use writer::{DEFAULT_FILE_NAME, to_json_pretty, write_document};
