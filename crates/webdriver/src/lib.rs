//! WebDriver JSON wire protocol client
//!
//! Blocking client for remote ends speaking the JSON wire protocol
//! (Selenium server, chromedriver, ...). Only the generic machinery lives
//! here: resources, sessions, the envelope and its errors.
//!
//! # Architecture
//!
//! ```text
//! Client ── root Resource (/wd/hub) ── Arc<dyn HttpClient>
//!              │
//!              ├── /status, /sessions        one round trip each
//!              └── Session ── Resource (/wd/hub/session/{id})
//!                               Owner:    drop => DELETE
//!                               Observer: drop => nothing
//! ```
//!
//! Every resource in a tree shares one transport. Nothing here retries,
//! spawns threads or locks; callers sharing a client across threads
//! synchronize around it themselves.

pub mod client;
pub mod config;
pub mod protocol;
pub mod resource;
pub mod session;
pub mod transport;

#[cfg(test)]
mod fake;

pub use client::Client;
pub use config::ClientConfig;
pub use protocol::{Envelope, SessionId, SessionRef};
pub use resource::{make_sub_resource, Ownership, Resource};
pub use session::{LogEntry, Session, TimeoutKind};
pub use transport::{HttpClient, HttpConnection, HttpResponse, Method};

pub use wire::{
    Capabilities, Context, Error, ErrorKind, JsonObject, ManualProxy, ProtocolStatus, Proxy,
    Result,
};
