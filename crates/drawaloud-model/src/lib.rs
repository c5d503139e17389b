//! Data model for guided drawing sessions.
//!
//! A session walks a participant through an ordered [`PromptCatalog`]. Each
//! prompt collects a [`ResponseRecord`]: reflection text, a confirmation flag,
//! an optional date, the completed [`Stroke`]s, and an opaque
//! [`CanvasSnapshot`] of the drawing surface. [`SessionState`] holds the
//! active prompt index and the per-prompt responses and owns every state
//! transition; it never talks to the drawing surface or storage itself.

pub mod canvas;
pub mod error;
pub mod prompt;
pub mod response;
pub mod session;
pub mod stroke;

pub use canvas::CanvasSnapshot;
pub use error::{ModelError, Result};
pub use prompt::{Prompt, PromptCatalog};
pub use response::{FormFields, ResponseMap, ResponseRecord};
pub use session::SessionState;
pub use stroke::Stroke;
