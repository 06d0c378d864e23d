//! Response status codes of the JSON wire protocol

use std::fmt;

/// Envelope `status` values
///
/// Zero is success; everything else names a failure. Codes the protocol
/// does not define are kept verbatim in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolStatus {
    Success,
    NoSuchDriver,
    NoSuchElement,
    NoSuchFrame,
    UnknownCommand,
    StaleElementReference,
    ElementNotVisible,
    InvalidElementState,
    UnknownError,
    ElementIsNotSelectable,
    JavaScriptError,
    XPathLookupError,
    Timeout,
    NoSuchWindow,
    InvalidCookieDomain,
    UnableToSetCookie,
    UnexpectedAlertOpen,
    NoAlertOpen,
    ScriptTimeout,
    InvalidElementCoordinates,
    ImeNotAvailable,
    ImeEngineActivationFailed,
    InvalidSelector,
    SessionNotCreated,
    MoveTargetOutOfBounds,
    Unknown(i64),
}

impl ProtocolStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => ProtocolStatus::Success,
            6 => ProtocolStatus::NoSuchDriver,
            7 => ProtocolStatus::NoSuchElement,
            8 => ProtocolStatus::NoSuchFrame,
            9 => ProtocolStatus::UnknownCommand,
            10 => ProtocolStatus::StaleElementReference,
            11 => ProtocolStatus::ElementNotVisible,
            12 => ProtocolStatus::InvalidElementState,
            13 => ProtocolStatus::UnknownError,
            15 => ProtocolStatus::ElementIsNotSelectable,
            17 => ProtocolStatus::JavaScriptError,
            19 => ProtocolStatus::XPathLookupError,
            21 => ProtocolStatus::Timeout,
            23 => ProtocolStatus::NoSuchWindow,
            24 => ProtocolStatus::InvalidCookieDomain,
            25 => ProtocolStatus::UnableToSetCookie,
            26 => ProtocolStatus::UnexpectedAlertOpen,
            27 => ProtocolStatus::NoAlertOpen,
            28 => ProtocolStatus::ScriptTimeout,
            29 => ProtocolStatus::InvalidElementCoordinates,
            30 => ProtocolStatus::ImeNotAvailable,
            31 => ProtocolStatus::ImeEngineActivationFailed,
            32 => ProtocolStatus::InvalidSelector,
            33 => ProtocolStatus::SessionNotCreated,
            34 => ProtocolStatus::MoveTargetOutOfBounds,
            other => ProtocolStatus::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ProtocolStatus::Success => 0,
            ProtocolStatus::NoSuchDriver => 6,
            ProtocolStatus::NoSuchElement => 7,
            ProtocolStatus::NoSuchFrame => 8,
            ProtocolStatus::UnknownCommand => 9,
            ProtocolStatus::StaleElementReference => 10,
            ProtocolStatus::ElementNotVisible => 11,
            ProtocolStatus::InvalidElementState => 12,
            ProtocolStatus::UnknownError => 13,
            ProtocolStatus::ElementIsNotSelectable => 15,
            ProtocolStatus::JavaScriptError => 17,
            ProtocolStatus::XPathLookupError => 19,
            ProtocolStatus::Timeout => 21,
            ProtocolStatus::NoSuchWindow => 23,
            ProtocolStatus::InvalidCookieDomain => 24,
            ProtocolStatus::UnableToSetCookie => 25,
            ProtocolStatus::UnexpectedAlertOpen => 26,
            ProtocolStatus::NoAlertOpen => 27,
            ProtocolStatus::ScriptTimeout => 28,
            ProtocolStatus::InvalidElementCoordinates => 29,
            ProtocolStatus::ImeNotAvailable => 30,
            ProtocolStatus::ImeEngineActivationFailed => 31,
            ProtocolStatus::InvalidSelector => 32,
            ProtocolStatus::SessionNotCreated => 33,
            ProtocolStatus::MoveTargetOutOfBounds => 34,
            ProtocolStatus::Unknown(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProtocolStatus::Success)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProtocolStatus::Success => "success",
            ProtocolStatus::NoSuchDriver => "no such driver",
            ProtocolStatus::NoSuchElement => "no such element",
            ProtocolStatus::NoSuchFrame => "no such frame",
            ProtocolStatus::UnknownCommand => "unknown command",
            ProtocolStatus::StaleElementReference => "stale element reference",
            ProtocolStatus::ElementNotVisible => "element not visible",
            ProtocolStatus::InvalidElementState => "invalid element state",
            ProtocolStatus::UnknownError => "unknown error",
            ProtocolStatus::ElementIsNotSelectable => "element is not selectable",
            ProtocolStatus::JavaScriptError => "javascript error",
            ProtocolStatus::XPathLookupError => "xpath lookup error",
            ProtocolStatus::Timeout => "timeout",
            ProtocolStatus::NoSuchWindow => "no such window",
            ProtocolStatus::InvalidCookieDomain => "invalid cookie domain",
            ProtocolStatus::UnableToSetCookie => "unable to set cookie",
            ProtocolStatus::UnexpectedAlertOpen => "unexpected alert open",
            ProtocolStatus::NoAlertOpen => "no alert open",
            ProtocolStatus::ScriptTimeout => "script timeout",
            ProtocolStatus::InvalidElementCoordinates => "invalid element coordinates",
            ProtocolStatus::ImeNotAvailable => "ime not available",
            ProtocolStatus::ImeEngineActivationFailed => "ime engine activation failed",
            ProtocolStatus::InvalidSelector => "invalid selector",
            ProtocolStatus::SessionNotCreated => "session not created",
            ProtocolStatus::MoveTargetOutOfBounds => "move target out of bounds",
            ProtocolStatus::Unknown(_) => "unrecognized status",
        }
    }
}

impl fmt::Display for ProtocolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}
