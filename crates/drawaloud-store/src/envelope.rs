//! Encoding of the stored response mapping.

use drawaloud_model::ResponseMap;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sha2::{Digest, Sha256};

use crate::error::{Result, StoreError};

/// Current stored schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    checksum: String,
    responses: &'a RawValue,
}

#[derive(Deserialize)]
struct EnvelopeIn<'a> {
    version: u32,
    checksum: String,
    #[serde(borrow)]
    responses: &'a RawValue,
}

/// SHA-256 of the serialized responses, hex encoded.
pub fn responses_checksum(responses_json: &str) -> String {
    hex::encode(Sha256::digest(responses_json.as_bytes()))
}

/// Serialize `responses` into the stored envelope.
pub fn encode_responses(responses: &ResponseMap) -> Result<String> {
    let payload = serde_json::value::to_raw_value(responses)
        .map_err(|source| StoreError::Serialization { source })?;
    let envelope = EnvelopeOut {
        version: CURRENT_SCHEMA_VERSION,
        checksum: responses_checksum(payload.get()),
        responses: &payload,
    };
    serde_json::to_string(&envelope).map_err(|source| StoreError::Serialization { source })
}

/// Parse a stored envelope, verifying version and checksum.
///
/// `key` is only used for error reporting.
pub fn decode_responses(key: &str, text: &str) -> Result<ResponseMap> {
    let corrupt = |reason: String| StoreError::Corrupt {
        key: key.to_string(),
        reason,
    };

    let envelope: EnvelopeIn<'_> =
        serde_json::from_str(text).map_err(|e| corrupt(format!("invalid envelope: {e}")))?;

    if envelope.version != CURRENT_SCHEMA_VERSION {
        return Err(corrupt(format!(
            "unsupported schema version {} (expected {})",
            envelope.version, CURRENT_SCHEMA_VERSION
        )));
    }

    let payload = envelope.responses.get();
    let actual = responses_checksum(payload);
    if actual != envelope.checksum {
        return Err(corrupt(format!(
            "checksum mismatch (expected {}, got {})",
            envelope.checksum, actual
        )));
    }

    serde_json::from_str(payload).map_err(|e| corrupt(format!("invalid responses: {e}")))
}
