//! Wire types for the WebDriver JSON protocol
//!
//! Everything that crosses the wire is a `serde_json::Value` at the bottom.
//! This crate gives those values types and gives failures a location.
//!
//! ## Layout
//!
//! ```text
//! Value <──ToJson/FromJson──> String, bool, numbers, Vec, Option,
//!                              JsonObject, Capabilities, Proxy, enums
//!
//! Error = ErrorKind + [Frame, Frame, ...]   (innermost first)
//! ```

mod macros;

pub mod capabilities;
pub mod convert;
pub mod error;
pub mod object;
pub mod proxy;
pub mod status;

pub use capabilities::{
    browser, Capabilities, LogLevel, LoggingPrefs, Platform, UnexpectedAlertBehaviour,
};
pub use convert::{from_json, kind_of, to_json, type_mismatch, FromJson, ToJson};
pub use error::{snippet, snippet_str, Context, Error, ErrorKind, Frame, Result};
pub use object::JsonObject;
pub use proxy::{ManualProxy, Proxy, ProxyType};
pub use status::ProtocolStatus;

pub use serde;
pub use serde_json;
