//! Wire protocol types
//!
//! Every response body is one envelope:
//!
//! ```json
//! {"sessionId": "7f", "status": 0, "value": ...}
//! ```
//!
//! `sessionId` is optional; null or non-string ids read as absent. `status`
//! and `value` are required.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wire::{kind_of, snippet, snippet_str, Capabilities, Error, ProtocolStatus, Result};

/// Session id assigned by the remote end
pub type SessionId = String;

/// Decoded response envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub session_id: Option<SessionId>,
    pub status: i64,
    pub value: Value,
}

impl Envelope {
    const LOCATION: &'static str = "Envelope::decode";

    /// Parse a raw response body
    pub fn decode(body: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(body).map_err(|e| {
            Error::decode(Self::LOCATION, "Envelope", e.to_string(), snippet_str(body))
        })?;
        Self::from_value(parsed)
    }

    pub fn from_value(parsed: Value) -> Result<Self> {
        let mut object = match parsed {
            Value::Object(object) => object,
            other => {
                return Err(Error::decode(
                    Self::LOCATION,
                    "Envelope",
                    format!("expected object, got {}", kind_of(&other)),
                    snippet(&other),
                ))
            }
        };

        let status = match object.get("status") {
            Some(status) => status.as_i64().ok_or_else(|| {
                Error::decode(
                    Self::LOCATION,
                    "Envelope",
                    "status is not an integer",
                    snippet(status),
                )
            })?,
            None => {
                return Err(Error::decode(
                    Self::LOCATION,
                    "Envelope",
                    "missing status",
                    snippet(&Value::Object(object.clone())),
                ))
            }
        };

        // Client::create_session enforces the id
        let session_id = match object.get("sessionId") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(other) => {
                tracing::debug!("Ignoring non-string sessionId {}", snippet(other));
                None
            }
        };

        let Some(value) = object.remove("value") else {
            return Err(Error::decode(
                Self::LOCATION,
                "Envelope",
                "missing value",
                snippet(&Value::Object(object)),
            ));
        };

        Ok(Self {
            session_id,
            status,
            value,
        })
    }

    pub fn protocol_status(&self) -> ProtocolStatus {
        ProtocolStatus::from_code(self.status)
    }

    /// `value` on success, ProtocolError otherwise
    pub fn into_value(self) -> Result<Value> {
        self.check().map(|envelope| envelope.value)
    }

    /// Fail with a ProtocolError unless `status` is zero
    pub fn check(self) -> Result<Self> {
        if self.status == 0 {
            Ok(self)
        } else {
            Err(Error::protocol("Envelope::status", self.status, self.value))
        }
    }
}

/// Entry of `GET /sessions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRef {
    pub id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,
}

wire::json_via_serde!(SessionRef);
