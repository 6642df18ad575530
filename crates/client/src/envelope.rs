//! The uniform response envelope: `{ timestamp, severity, message?, data?, errors? }`.

use serde::Deserialize;
use serde_json::Value;
use smp_core::Severity;

/// Envelope metadata (everything except `data`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unwrapped {
    pub meta: Envelope,
    /// `data` when the envelope has that key, otherwise the whole body.
    pub payload: Value,
}

/// Split a response body into envelope metadata and payload.
///
/// Bodies that are not envelopes (arrays, scalars, empty) pass through as the
/// payload with empty metadata.
pub fn unwrap_envelope(body: Value) -> Unwrapped {
    match body {
        Value::Object(mut map) => {
            let meta = serde_json::from_value::<Envelope>(Value::Object(
                map.iter()
                    .filter(|(k, _)| k.as_str() != "data")
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ))
            .unwrap_or_default();
            let payload = match map.remove("data") {
                Some(data) => data,
                None => Value::Object(map),
            };
            Unwrapped { meta, payload }
        }
        other => Unwrapped {
            meta: Envelope::default(),
            payload: other,
        },
    }
}
