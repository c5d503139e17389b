//! Session controller for guided drawing sessions.
//!
//! [`Session`] wraps the pure [`SessionState`](drawaloud_model::SessionState)
//! with the collaborators it needs at its boundaries:
//!
//! - a [`DrawingSurface`] that captures and restores canvas snapshots
//! - a [`ResponseForm`] holding the reflection, date, and confirmation inputs
//! - a [`ResponseStore`](drawaloud_store::ResponseStore) that persists every
//!   successful mutation
//! - an optional [`TimelineRenderer`] refreshed after every change
//!
//! Navigation captures the prompt being left before the index moves, so no
//! response is lost; a failed capture leaves the session where it was.

mod error;
mod image;
mod session;
mod surface;
pub mod timeline;

pub use error::{Result, SessionError, SurfaceError};
pub use image::{StageImage, stage_image_name};
pub use session::Session;
pub use surface::{DrawingSurface, ResponseForm, TimelineRenderer};
pub use timeline::{StageMarker, StageStatus, StrokePoint};
