use chrono::{DateTime, Utc};
use drawaloud_model::{FormFields, PromptCatalog, SessionState, Stroke};
use drawaloud_store::{AutoSaveConfig, DirtyTracker, KeyValueStore, ResponseStore, StoreError};
use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};
use crate::image::{StageImage, stage_image_name};
use crate::surface::{DrawingSurface, ResponseForm, TimelineRenderer};
use crate::timeline::{self, StageMarker};

/// A guided drawing session with its collaborators attached.
///
/// Every successful mutation is followed by a persistence side effect (written
/// through, or batched per [`AutoSaveConfig`]) and a timeline refresh.
pub struct Session<S, F, K> {
    state: SessionState,
    surface: S,
    form: F,
    store: ResponseStore<K>,
    autosave: AutoSaveConfig,
    tracker: DirtyTracker,
    renderer: Option<Box<dyn TimelineRenderer>>,
}

impl<S, F, K> Session<S, F, K>
where
    S: DrawingSurface,
    F: ResponseForm,
    K: KeyValueStore,
{
    /// Hydrate from the store and enter the first prompt.
    ///
    /// An empty catalog yields a session with navigation disabled; see
    /// [`Session::attach_catalog`].
    pub fn start(
        catalog: PromptCatalog,
        surface: S,
        form: F,
        store: ResponseStore<K>,
        autosave: AutoSaveConfig,
    ) -> Self {
        let responses = if catalog.is_empty() {
            Default::default()
        } else {
            store.load()
        };
        let mut session = Self {
            state: SessionState::with_responses(catalog, responses),
            surface,
            form,
            store,
            autosave,
            tracker: DirtyTracker::new(),
            renderer: None,
        };
        if session.state.is_navigable() {
            session.enter_current();
        }
        info!(
            prompts = session.state.catalog().len(),
            responses = session.state.responses().len(),
            "session started"
        );
        session
    }

    #[must_use]
    pub fn with_timeline_renderer(mut self, renderer: Box<dyn TimelineRenderer>) -> Self {
        self.renderer = Some(renderer);
        self.refresh_timeline();
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn store(&self) -> &ResponseStore<K> {
        &self.store
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Install a catalog that resolved after the session started.
    ///
    /// Only the first non-empty catalog is accepted; the stored responses are
    /// loaded at that point.
    pub fn attach_catalog(&mut self, catalog: PromptCatalog) -> bool {
        if catalog.is_empty() || !self.state.attach_catalog(catalog) {
            return false;
        }
        self.state.replace_responses(self.store.load());
        self.enter_current();
        self.refresh_timeline();
        true
    }

    /// Navigate to `index`.
    ///
    /// Out-of-range indices are ignored and return `Ok(false)`. The prompt
    /// being left is captured first; if that fails the index does not change.
    pub fn go_to(&mut self, index: usize) -> Result<bool> {
        if !self.state.contains_index(index) {
            debug!(
                index,
                prompts = self.state.catalog().len(),
                "ignoring out-of-range navigation"
            );
            return Ok(false);
        }
        self.capture_current()?;
        let from = self.state.current_index();
        self.state.move_to(index);
        self.enter_current();
        self.refresh_timeline();
        debug!(from, to = index, "navigated");
        Ok(true)
    }

    /// Go to the next prompt; a no-op on the last one.
    pub fn next(&mut self) -> Result<bool> {
        match self.state.next_index() {
            Some(index) => self.go_to(index),
            None => Ok(false),
        }
    }

    /// Go to the previous prompt; a no-op on the first one.
    pub fn previous(&mut self) -> Result<bool> {
        match self.state.previous_index() {
            Some(index) => self.go_to(index),
            None => Ok(false),
        }
    }

    /// Record a completed gesture on the current prompt.
    pub fn record_stroke(&mut self, timestamp: DateTime<Utc>) -> Option<Stroke> {
        let stroke = self.state.record_stroke(timestamp).cloned()?;
        debug!(prompt_id = %stroke.prompt_id, timestamp = %stroke.timestamp, "stroke recorded");
        self.sync_canvas();
        self.after_mutation();
        Some(stroke)
    }

    /// Undo the last stroke of the current prompt, on the surface as well.
    pub fn undo_last_stroke(&mut self) -> Option<Stroke> {
        let stroke = self.state.undo_last_stroke()?;
        if let Err(error) = self.surface.remove_last() {
            warn!(%error, "drawing surface did not remove the undone stroke");
        }
        self.sync_canvas();
        self.after_mutation();
        Some(stroke)
    }

    /// Remove all strokes and the drawing of the current prompt.
    pub fn clear_current(&mut self) -> bool {
        if !self.state.clear_current() {
            return false;
        }
        if let Err(error) = self.surface.clear() {
            warn!(%error, "drawing surface could not be cleared");
        }
        self.after_mutation();
        true
    }

    /// Read the form and the drawing into the current prompt's response.
    pub fn capture_current(&mut self) -> Result<()> {
        if self.state.current_prompt().is_none() {
            return Err(SessionError::NoActivePrompt);
        }
        let fields = self.form.read()?;
        let snapshot = self.surface.capture()?;
        self.state.capture_current(fields, snapshot);
        self.after_mutation();
        Ok(())
    }

    /// Write the current reflection text onto the drawing.
    pub fn annotate_reflection(&mut self) -> Result<()> {
        let fields = self.form.read()?;
        let text = fields.reflection.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyReflection);
        }
        self.surface.add_text(text)?;
        Ok(())
    }

    /// Rasterize the current drawing for download.
    pub fn export_image(&self) -> Result<StageImage> {
        if self.state.current_prompt().is_none() {
            return Err(SessionError::NoActivePrompt);
        }
        let png = self.surface.rasterize_png()?;
        Ok(StageImage {
            file_name: stage_image_name(self.state.current_index()),
            png,
        })
    }

    /// Capture the current prompt and flush pending writes so an export
    /// reflects the latest state.
    ///
    /// A failed flush is logged; the in-memory state is still returned.
    pub fn prepare_export(&mut self) -> Result<&SessionState> {
        if self.state.is_navigable() {
            self.capture_current()?;
        }
        if let Err(error) = self.flush() {
            warn!(%error, "exporting state that is not yet persisted");
        }
        Ok(&self.state)
    }

    pub fn timeline(&self) -> Vec<StageMarker> {
        timeline::project(&self.state)
    }

    /// Write pending changes now.
    pub fn flush(&mut self) -> std::result::Result<(), StoreError> {
        if !self.tracker.is_dirty() {
            return Ok(());
        }
        match self.store.save(self.state.responses()) {
            Ok(()) => {
                self.tracker.save_complete();
                Ok(())
            }
            Err(error) => {
                self.tracker.save_failed();
                Err(error)
            }
        }
    }

    /// Write batched changes when the debounce window has passed.
    ///
    /// Returns `true` when a write was attempted.
    pub fn poll_autosave(&mut self) -> bool {
        if !self.tracker.should_auto_save(&self.autosave) {
            return false;
        }
        if let Err(error) = self.flush() {
            warn!(
                %error,
                failures = self.tracker.consecutive_failures(),
                "auto-save failed, keeping changes in memory"
            );
        }
        true
    }

    /// Copy the drawing into the current record so the stored snapshot
    /// matches the stored strokes. On failure the previous snapshot stays.
    fn sync_canvas(&mut self) {
        match self.surface.capture() {
            Ok(snapshot) => {
                self.state.set_current_canvas(snapshot);
            }
            Err(error) => warn!(%error, "could not capture drawing, keeping the saved snapshot"),
        }
    }

    fn after_mutation(&mut self) {
        self.tracker.mark_dirty();
        if self.autosave.is_write_through() {
            if let Err(error) = self.flush() {
                warn!(
                    %error,
                    failures = self.tracker.consecutive_failures(),
                    "could not persist responses, keeping changes in memory"
                );
            }
        }
        self.refresh_timeline();
    }

    /// Restore the active prompt's saved response, or blank the inputs.
    fn enter_current(&mut self) {
        let Some(prompt) = self.state.current_prompt() else {
            return;
        };
        let allow_draw = prompt.allow_draw;
        let (fields, snapshot) = match self.state.current_response() {
            Some(record) => (record.form_fields(), Some(record.canvas.clone())),
            None => (FormFields::blank(), None),
        };

        if let Err(error) = self.form.write(&fields) {
            warn!(%error, "could not restore form fields");
        }
        let restored = match snapshot.filter(|snapshot| !snapshot.is_empty()) {
            Some(snapshot) => self.surface.restore(&snapshot),
            None => self.surface.clear(),
        };
        if let Err(error) = restored {
            warn!(%error, "could not restore drawing, showing a blank surface");
            if let Err(error) = self.surface.clear() {
                warn!(%error, "drawing surface could not be cleared");
            }
        }
        if let Err(error) = self.surface.set_drawing_enabled(allow_draw) {
            warn!(%error, "could not switch drawing mode");
        }
    }

    fn refresh_timeline(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            let stages = timeline::project(&self.state);
            let strokes = timeline::project_strokes(&self.state);
            renderer.render(&stages, &strokes);
        }
    }
}
