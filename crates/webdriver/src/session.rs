//! Session handle
//!
//! A thin handle over the `/session/{id}` resource. Whether dropping it ends
//! the remote session is decided by the resource's ownership, set once by
//! whoever built the handle.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use wire::{Capabilities, Context, FromJson, JsonObject, LogLevel, Result};

use crate::protocol::SessionId;
use crate::resource::{Ownership, Resource};

wire::string_enum! {
    /// Timeout classes accepted by `POST /session/{id}/timeouts`
    pub enum TimeoutKind {
        Script => "script",
        Implicit => "implicit",
        PageLoad => "page load",
    }
}

/// One entry of `POST /session/{id}/log`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: i64,
    pub level: LogLevel,
    pub message: String,
}

wire::json_via_serde!(LogEntry);

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    resource: Resource,
    capabilities: Option<Capabilities>,
}

impl Session {
    pub(crate) fn new(
        id: SessionId,
        resource: Resource,
        capabilities: Option<Capabilities>,
    ) -> Self {
        Self {
            id,
            resource,
            capabilities,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ownership(&self) -> Ownership {
        self.resource.ownership()
    }

    /// Underlying resource, for building commands this type does not wrap
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Capabilities seen when the handle was built, if the server sent any
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.capabilities.as_ref()
    }

    /// Ask the server for the session's current capabilities
    pub fn fetch_capabilities(&self) -> Result<Capabilities> {
        self.resource
            .get("")
            .and_then(|value| Capabilities::from_json(&value))
            .with_context(|| self.location("fetch_capabilities"))
    }

    pub fn get<T: FromJson>(&self, path: &str) -> Result<T> {
        self.resource
            .get(path)
            .and_then(|value| T::from_json(&value))
            .with_context(|| self.location("get"))
    }

    pub fn post<T: FromJson>(&self, path: &str, body: &JsonObject) -> Result<T> {
        self.resource
            .post(path, body)
            .and_then(|value| T::from_json(&value))
            .with_context(|| self.location("post"))
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        self.resource
            .delete(path)
            .map(|_| ())
            .with_context(|| self.location("delete"))
    }

    pub fn set_timeout(&self, kind: TimeoutKind, timeout: Duration) -> Result<()> {
        let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let body = JsonObject::new().with("type", &kind).with("ms", &ms);
        self.resource
            .post("timeouts", &body)
            .map(|_| ())
            .with_context(|| self.location("set_timeout"))
    }

    /// Log types the server can report, e.g. `browser`, `driver`
    pub fn log_types(&self) -> Result<Vec<String>> {
        self.resource
            .get("log/types")
            .and_then(|value| Vec::<String>::from_json(&value))
            .with_context(|| self.location("log_types"))
    }

    /// Fetch and clear the server-side buffer of one log type
    pub fn log(&self, log_type: &str) -> Result<Vec<LogEntry>> {
        let body = JsonObject::new().with("type", log_type);
        self.resource
            .post("log", &body)
            .and_then(|value| Vec::<LogEntry>::from_json(&value))
            .with_context(|| self.location("log"))
    }

    /// End the remote session now if this handle owns it
    ///
    /// Observers release nothing and always succeed.
    pub fn release(self) -> Result<()> {
        tracing::info!("Releasing session {} ({:?})", self.id, self.ownership());
        let location = self.location("release");
        self.resource.release().context(location)
    }

    fn location(&self, operation: &str) -> String {
        format!("Session({})::{}", self.id, operation)
    }
}
