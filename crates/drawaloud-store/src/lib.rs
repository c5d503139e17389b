//! Durable storage for session responses.
//!
//! The whole response mapping lives under a single session-scoped key of a
//! key-value surface, so every save overwrites the previous value.
//!
//! # Features
//!
//! - **Pluggable backends** behind [`KeyValueStore`]: in-memory (with an
//!   optional quota) and one-file-per-key on disk with atomic writes
//! - **Corruption detection** via a SHA-256 checksum of the stored responses
//! - **Auto-save** with optional debounce support
//!
//! # Stored Format
//!
//! ```text
//! {
//!   "version": 1,                      schema version
//!   "checksum": "<sha256 hex>",        over the exact `responses` text
//!   "responses": { "<prompt id>": { ... }, ... }
//! }
//! ```
//!
//! A value that fails any of these checks is treated as absent by
//! [`ResponseStore::load`]: the session starts empty instead of failing.

mod autosave;
mod backend;
mod envelope;
mod error;
mod store;

pub use autosave::{AutoSaveConfig, DirtyTracker};
pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use envelope::{CURRENT_SCHEMA_VERSION, decode_responses, encode_responses, responses_checksum};
pub use error::{Result, StoreError};
pub use store::{DEFAULT_STORE_KEY, ResponseStore, StoreStatus};
