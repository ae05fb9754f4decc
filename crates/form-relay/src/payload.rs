//! Inbound webhook body parsing.
//!
//! The form posts `{"params": {"answer": "<json string>"}}`. The embedded
//! string carries `created` and `answer.data`; some senders inline it as an
//! object instead, which is accepted too.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::PayloadError;

/// Display format of the submission timestamp.
const CREATED_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// One decoded form submission.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Submission {
    /// ISO 8601 timestamp of the submission, as sent.
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    answer: Option<AnswerEnvelope>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct AnswerEnvelope {
    #[serde(default)]
    data: Option<Value>,
}

impl Submission {
    /// The `answer.data` mapping, when present and an object.
    #[must_use]
    pub fn answers(&self) -> Option<&Map<String, Value>> {
        self.answer.as_ref()?.data.as_ref()?.as_object()
    }

    /// `created` rendered as `dd.mm.yyyy HH:MM:SS`, keeping its own offset.
    ///
    /// Timestamps that do not parse are returned unchanged.
    #[must_use]
    pub fn created_display(&self) -> Option<String> {
        self.created.as_deref().map(format_created)
    }
}

/// Decode a webhook body.
///
/// Only invalid JSON is an error. A body without `params.answer` decodes to
/// an empty submission and is rejected later by the relay.
pub fn parse_webhook(body: &[u8]) -> Result<Submission, PayloadError> {
    let envelope: Value = serde_json::from_slice(body)?;

    match envelope.pointer("/params/answer") {
        Some(Value::String(embedded)) => Ok(serde_json::from_str(embedded)?),
        Some(inline @ Value::Object(_)) => Ok(Submission::deserialize(inline)?),
        _ => Ok(Submission::default()),
    }
}

fn format_created(raw: &str) -> String {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format(CREATED_FORMAT).to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_or_else(|_| raw.to_string(), |t| t.format(CREATED_FORMAT).to_string())
}
