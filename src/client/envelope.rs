//! Unwrapping of the backend's `{status, message, data}` envelope.

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStatus {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Envelope {
    pub status: EnvelopeStatus,
    pub message: Option<String>,
    pub data: Value,
    pub error_code: Option<String>,
}

impl Envelope {
    /// Reads an envelope out of a decoded body. Only the `status` string
    /// decides; the other fields are taken as loosely as they come.
    pub fn from_value(value: &Value) -> Option<Self> {
        let status = match value.get("status").and_then(Value::as_str) {
            Some("success") => EnvelopeStatus::Success,
            Some("error") => EnvelopeStatus::Error,
            _ => return None,
        };

        Some(Self {
            status,
            message: text_field(value, "message"),
            data: value.get("data").cloned().unwrap_or(Value::Null),
            error_code: text_field(value, "error_code"),
        })
    }

    pub fn into_result(self) -> Result<Value> {
        match self.status {
            EnvelopeStatus::Success => Ok(self.data),
            EnvelopeStatus::Error => Err(Error::Validation(
                self.message.unwrap_or_else(|| "request failed".to_string()),
            )),
        }
    }
}

/// Turns a transport status and raw body into the caller-visible outcome.
///
/// Non-envelope JSON on a 2xx status is returned whole; an empty body is
/// `null`.
pub fn normalize(status: StatusCode, body: &[u8]) -> Result<Value> {
    let parsed = if body.iter().all(u8::is_ascii_whitespace) {
        Ok(Value::Null)
    } else {
        serde_json::from_slice::<Value>(body)
    };

    if !status.is_success() {
        let message = parsed.ok().as_ref().and_then(server_message);
        return Err(Error::from_status(status, message));
    }

    let value = parsed.map_err(|_| Error::Server {
        status: status.as_u16(),
        message: "malformed response body".to_string(),
    })?;

    match Envelope::from_value(&value) {
        Some(envelope) => envelope.into_result(),
        None => Ok(value),
    }
}

/// FastAPI puts its messages in `detail`, the envelope in `message`.
fn server_message(value: &Value) -> Option<String> {
    text_field(value, "message").or_else(|| text_field(value, "detail"))
}

/// Strings as is, anything else but null as its JSON text.
fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
