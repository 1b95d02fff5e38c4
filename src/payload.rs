//! POST request payloads.
//!
//! The demo always sends a name and a message. Both have defaults so the
//! payload can be built without user input, while still letting the CLI,
//! environment or configuration file override either field.

use serde_json::{Map, Value};

use crate::api::RequestPayload;

/// Default `name` field sent by the POST action.
pub const DEFAULT_NAME: &str = "太郎";

/// Default `message` field sent by the POST action.
pub const DEFAULT_MESSAGE: &str = "こんにちは";

/// The payload sent when nothing overrides it:
/// `{"name": "太郎", "message": "こんにちは"}`.
#[must_use]
pub fn default_post_payload() -> RequestPayload {
    let mut map = Map::new();
    map.insert("name".into(), Value::String(DEFAULT_NAME.into()));
    map.insert("message".into(), Value::String(DEFAULT_MESSAGE.into()));
    map
}

/// Reasons a user-supplied payload is rejected.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builder layering overrides on top of [`default_post_payload`].
///
/// A raw body replaces the default wholesale; `name` and `message` are then
/// applied on top of whichever base is in effect.
#[derive(Debug, Default, Clone)]
pub struct PostPayload {
    body: Option<String>,
    name: Option<String>,
    message: Option<String>,
}

impl PostPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default mapping with a JSON object given as text.
    #[must_use]
    pub fn body(mut self, raw: Option<impl Into<String>>) -> Self {
        self.body = raw.map(Into::into);
        self
    }

    #[must_use]
    pub fn name(mut self, name: Option<impl Into<String>>) -> Self {
        self.name = name.map(Into::into);
        self
    }

    #[must_use]
    pub fn message(mut self, message: Option<impl Into<String>>) -> Self {
        self.message = message.map(Into::into);
        self
    }

    /// Produce the final mapping.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when the raw body is not a JSON object.
    pub fn build(self) -> Result<RequestPayload, PayloadError> {
        let mut payload = match self.body {
            Some(raw) => match serde_json::from_str::<Value>(&raw)? {
                Value::Object(map) => map,
                other => return Err(PayloadError::NotAnObject(kind(&other))),
            },
            None => default_post_payload(),
        };
        if let Some(name) = self.name {
            payload.insert("name".into(), Value::String(name));
        }
        if let Some(message) = self.message {
            payload.insert("message".into(), Value::String(message));
        }
        Ok(payload)
    }
}
