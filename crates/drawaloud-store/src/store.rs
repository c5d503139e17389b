//! Saving and restoring the response mapping under one session key.

use drawaloud_model::ResponseMap;

use crate::backend::KeyValueStore;
use crate::envelope::{decode_responses, encode_responses};
use crate::error::{Result, StoreError};

/// Key the mapping is stored under unless a session picks its own.
pub const DEFAULT_STORE_KEY: &str = "drawaloudResponses";

/// What is currently stored under the session key.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreStatus {
    Absent,
    Valid(ResponseMap),
    Corrupt { reason: String },
}

/// Persists the full response mapping to a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct ResponseStore<K> {
    backend: K,
    key: String,
}

impl<K: KeyValueStore> ResponseStore<K> {
    pub fn new(backend: K, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn with_default_key(backend: K) -> Self {
        Self::new(backend, DEFAULT_STORE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut K {
        &mut self.backend
    }

    pub fn into_backend(self) -> K {
        self.backend
    }

    /// Overwrite the stored mapping.
    pub fn save(&mut self, responses: &ResponseMap) -> Result<()> {
        let text = encode_responses(responses)?;
        self.backend.set(&self.key, &text)?;
        tracing::debug!(
            key = %self.key,
            responses = responses.len(),
            strokes = responses.stroke_count(),
            bytes = text.len(),
            "saved responses"
        );
        Ok(())
    }

    /// The stored mapping, `None` when nothing was stored yet.
    ///
    /// A value that does not decode is reported as [`StoreError::Corrupt`].
    pub fn try_load(&self) -> Result<Option<ResponseMap>> {
        let Some(text) = self.backend.get(&self.key)? else {
            return Ok(None);
        };
        decode_responses(&self.key, &text).map(Some)
    }

    /// The stored mapping, or an empty one when nothing usable is stored.
    ///
    /// Corrupt or unreadable values are logged and discarded.
    pub fn load(&self) -> ResponseMap {
        match self.try_load() {
            Ok(Some(responses)) => {
                tracing::info!(
                    key = %self.key,
                    responses = responses.len(),
                    "restored saved responses"
                );
                responses
            }
            Ok(None) => ResponseMap::new(),
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "discarding saved responses");
                ResponseMap::new()
            }
        }
    }

    /// Describe the stored value without discarding anything.
    ///
    /// Only backend read failures are errors.
    pub fn inspect(&self) -> Result<StoreStatus> {
        match self.try_load() {
            Ok(Some(responses)) => Ok(StoreStatus::Valid(responses)),
            Ok(None) => Ok(StoreStatus::Absent),
            Err(StoreError::Corrupt { reason, .. }) => Ok(StoreStatus::Corrupt { reason }),
            Err(error) => Err(error),
        }
    }
}
