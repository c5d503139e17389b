//! Contracts for the collaborators a session talks to.

use drawaloud_model::{CanvasSnapshot, FormFields};

use crate::error::SurfaceError;
use crate::timeline::{StageMarker, StrokePoint};

/// The freehand drawing surface.
///
/// The session treats snapshots as opaque. Implementations must guarantee that
/// `restore(&capture()?)` reproduces a visually equivalent drawing.
pub trait DrawingSurface {
    fn capture(&self) -> Result<CanvasSnapshot, SurfaceError>;

    fn restore(&mut self, snapshot: &CanvasSnapshot) -> Result<(), SurfaceError>;

    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Remove the most recently added drawing object.
    fn remove_last(&mut self) -> Result<(), SurfaceError>;

    /// Switch freehand input on or off for the active prompt.
    fn set_drawing_enabled(&mut self, enabled: bool) -> Result<(), SurfaceError>;

    /// Place a text label on the drawing.
    fn add_text(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Render the current drawing as PNG bytes.
    fn rasterize_png(&self) -> Result<Vec<u8>, SurfaceError>;
}

/// The reflection, date, and confirmation inputs next to the drawing.
pub trait ResponseForm {
    fn read(&self) -> Result<FormFields, SurfaceError>;

    fn write(&mut self, fields: &FormFields) -> Result<(), SurfaceError>;
}

/// Receives a fresh projection whenever the session changes.
pub trait TimelineRenderer {
    fn render(&mut self, stages: &[StageMarker], strokes: &[StrokePoint]);
}
