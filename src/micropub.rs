//! Micropub JSON request decoding.
//!
//! Turns a posted JSON payload into the normalized operation the pipeline
//! consumes. Only the JSON syntax is handled here — form-encoded payloads
//! are not supported. `mp-*` keys are client commands, not content: they
//! are stripped from the property set, and `mp-syndicate-to` is the one
//! command this endpoint acts on.

use crate::content::{PropertySet, UpdateRequest};
use serde_json::Value;
use thiserror::Error;

/// A post-creation payload, normalized.
#[derive(Debug)]
pub struct CreateRequest {
    /// Declared vocabulary type, e.g. `h-entry`.
    pub entry_type: String,

    /// Content properties, always list-valued.
    pub properties: PropertySet,

    /// Requested syndication targets (`mp-syndicate-to`).
    pub syndicate_to: Vec<String>,
}

/// The operations a client can request.
#[derive(Debug)]
pub enum MicropubRequest {
    Create(CreateRequest),
    Update { url: String, update: UpdateRequest },
    Delete { url: String },
    Undelete { url: String },
}

/// Request decoding failures. All map to an `invalid_request` response.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request body is not valid json")]
    Json(#[from] serde_json::Error),

    #[error("`{0}` action requires a url")]
    MissingUrl(String),

    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

impl MicropubRequest {
    /// Decode a JSON payload.
    ///
    /// Payloads with an `action` key are update/delete/undelete; anything
    /// else is a creation (`type` defaults to `h-entry`).
    pub fn from_json(raw: &str) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_str(raw)?;

        if let Some(action) = value.get("action").and_then(Value::as_str) {
            let action = action.to_owned();
            let url = value
                .get("url")
                .and_then(Value::as_str)
                .ok_or_else(|| RequestError::MissingUrl(action.clone()))?
                .to_owned();

            return match action.as_str() {
                "update" => Ok(Self::Update {
                    url,
                    update: serde_json::from_value(value)?,
                }),
                "delete" => Ok(Self::Delete { url }),
                "undelete" => Ok(Self::Undelete { url }),
                _ => Err(RequestError::UnknownAction(action)),
            };
        }

        Ok(Self::Create(decode_create(&value)))
    }
}

fn decode_create(value: &Value) -> CreateRequest {
    let entry_type = value
        .get("type")
        .and_then(Value::as_array)
        .and_then(|types| types.first())
        .and_then(Value::as_str)
        .unwrap_or("h-entry")
        .to_owned();

    let mut properties = PropertySet::new();
    let mut syndicate_to = Vec::new();

    if let Some(raw_properties) = value.get("properties").and_then(Value::as_object) {
        for (name, value) in raw_properties {
            if let Some(command) = name.strip_prefix("mp-") {
                if command == "syndicate-to" {
                    syndicate_to = string_list(value);
                }
                continue;
            }
            properties.insert_loose(name.clone(), value.clone());
        }
    }

    CreateRequest {
        entry_type,
        properties,
        syndicate_to,
    }
}

/// Flatten a string-or-list-of-strings JSON value.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(values) => values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================
