//! In-memory collaborators for driving a session without a display.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

use drawaloud_core::{
    DrawingSurface, ResponseForm, Session, StageMarker, StrokePoint, SurfaceError,
    TimelineRenderer,
};
use drawaloud_model::{CanvasSnapshot, FormFields, Prompt, PromptCatalog};
use drawaloud_store::{AutoSaveConfig, KeyValueStore, MemoryStore, ResponseStore};

pub type TestSession = Session<FakeSurface, FakeForm, SharedStore>;

pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

pub fn catalog(ids: &[&str]) -> PromptCatalog {
    PromptCatalog::new(
        ids.iter()
            .map(|id| Prompt::new(*id, format!("Title {id}")).with_snomed_code("225444004"))
            .collect(),
    )
    .unwrap()
}

pub fn start(catalog: PromptCatalog, store: &SharedStore) -> TestSession {
    start_with(catalog, store, AutoSaveConfig::default())
}

pub fn start_with(
    catalog: PromptCatalog,
    store: &SharedStore,
    autosave: AutoSaveConfig,
) -> TestSession {
    Session::start(
        catalog,
        FakeSurface::default(),
        FakeForm::default(),
        ResponseStore::with_default_key(store.clone()),
        autosave,
    )
}

/// Draw a path on the surface and report the completed gesture.
pub fn draw(session: &mut TestSession, timestamp: DateTime<Utc>) {
    session.surface_mut().draw();
    session.record_stroke(timestamp);
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    pub objects: Vec<Value>,
    pub drawing_enabled: bool,
    pub fail_capture: bool,
    pub fail_restore: bool,
    next_id: u64,
}

impl FakeSurface {
    pub fn draw(&mut self) {
        self.next_id += 1;
        self.objects
            .push(json!({ "type": "path", "id": self.next_id }));
    }

    pub fn texts(&self) -> Vec<String> {
        self.objects
            .iter()
            .filter(|object| object["type"] == "text")
            .filter_map(|object| object["text"].as_str().map(str::to_string))
            .collect()
    }
}

impl DrawingSurface for FakeSurface {
    fn capture(&self) -> Result<CanvasSnapshot, SurfaceError> {
        if self.fail_capture {
            return Err(SurfaceError::canvas("capture", "surface detached"));
        }
        if self.objects.is_empty() {
            return Ok(CanvasSnapshot::empty());
        }
        Ok(CanvasSnapshot::from_value(
            json!({ "version": "5.3.0", "objects": self.objects }),
        ))
    }

    fn restore(&mut self, snapshot: &CanvasSnapshot) -> Result<(), SurfaceError> {
        if self.fail_restore {
            return Err(SurfaceError::canvas("restore", "unsupported snapshot"));
        }
        self.objects = snapshot.as_value()["objects"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.objects.clear();
        Ok(())
    }

    fn remove_last(&mut self) -> Result<(), SurfaceError> {
        self.objects.pop();
        Ok(())
    }

    fn set_drawing_enabled(&mut self, enabled: bool) -> Result<(), SurfaceError> {
        self.drawing_enabled = enabled;
        Ok(())
    }

    fn add_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.objects.push(json!({ "type": "text", "text": text }));
        Ok(())
    }

    fn rasterize_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
        png.push(u8::try_from(self.objects.len()).unwrap_or(u8::MAX));
        Ok(png)
    }
}

#[derive(Debug, Default)]
pub struct FakeForm {
    pub fields: FormFields,
}

impl FakeForm {
    pub fn set_reflection(&mut self, text: &str) {
        self.fields.reflection = text.to_string();
    }
}

impl ResponseForm for FakeForm {
    fn read(&self) -> Result<FormFields, SurfaceError> {
        Ok(self.fields.clone())
    }

    fn write(&mut self, fields: &FormFields) -> Result<(), SurfaceError> {
        self.fields = fields.clone();
        Ok(())
    }
}

/// A memory store shared between sessions, counting writes.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Rc<RefCell<MemoryStore>>,
    writes: Rc<RefCell<usize>>,
}

impl SharedStore {
    pub fn with_quota(quota: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryStore::with_quota(quota))),
            writes: Rc::default(),
        }
    }

    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).unwrap()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.inner.borrow_mut().set(key, value).unwrap();
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> drawaloud_store::Result<Option<String>> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> drawaloud_store::Result<()> {
        self.inner.borrow_mut().set(key, value)?;
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

/// Collects every projection handed to the renderer.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Rc<RefCell<Vec<(Vec<StageMarker>, Vec<StrokePoint>)>>>,
}

impl TimelineRenderer for RecordingRenderer {
    fn render(&mut self, stages: &[StageMarker], strokes: &[StrokePoint]) {
        self.frames
            .borrow_mut()
            .push((stages.to_vec(), strokes.to_vec()));
    }
}
