//! Session capabilities
//!
//! Capabilities are an open property bag. The well-known protocol keys get
//! typed accessors; anything else (vendor extensions such as
//! `goog:chromeOptions`) goes through `get`/`set`/`has`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::convert::{type_mismatch, FromJson, ToJson};
use crate::error::Result;
use crate::object::JsonObject;
use crate::proxy::Proxy;
use crate::string_enum;

/// Well-known `browserName` values
pub mod browser {
    pub const ANDROID: &str = "android";
    pub const CHROME: &str = "chrome";
    pub const FIREFOX: &str = "firefox";
    pub const HTML_UNIT: &str = "htmlunit";
    pub const INTERNET_EXPLORER: &str = "internet explorer";
    pub const IPHONE: &str = "iPhone";
    pub const IPAD: &str = "iPad";
    pub const MOCK: &str = "mock";
    pub const OPERA: &str = "opera";
    pub const SAFARI: &str = "safari";
    pub const PHANTOM: &str = "phantomjs";
}

string_enum! {
    /// Server-reported platform; unlisted names such as `WIN10` stay as `Other`
    pub enum Platform(Other) {
        Any => "ANY",
        Windows => "WINDOWS",
        Xp => "XP",
        Vista => "VISTA",
        Mac => "MAC",
        Linux => "LINUX",
        Unix => "UNIX",
        Android => "ANDROID",
    }
}

string_enum! {
    /// What the server does with an alert nobody expected
    pub enum UnexpectedAlertBehaviour(Other) {
        Accept => "accept",
        Dismiss => "dismiss",
        Ignore => "ignore",
    }
}

string_enum! {
    /// Log severity; drivers may report levels outside this list (`DEBUG`)
    pub enum LogLevel(Other) {
        Off => "OFF",
        Severe => "SEVERE",
        Warning => "WARNING",
        Info => "INFO",
        Config => "CONFIG",
        Fine => "FINE",
        Finer => "FINER",
        Finest => "FINEST",
        All => "ALL",
    }
}

/// Log level per log type (`driver`, `browser`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoggingPrefs(BTreeMap<String, LogLevel>);

impl LoggingPrefs {
    pub const DRIVER: &'static str = "driver";
    pub const BROWSER: &'static str = "browser";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, log_type: &str) -> Option<LogLevel> {
        self.0.get(log_type).cloned()
    }

    pub fn set_level(&mut self, log_type: impl Into<String>, level: LogLevel) -> &mut Self {
        self.0.insert(log_type.into(), level);
        self
    }

    pub fn driver(&self) -> Option<LogLevel> {
        self.level(Self::DRIVER)
    }

    pub fn set_driver(&mut self, level: LogLevel) -> &mut Self {
        self.set_level(Self::DRIVER, level)
    }
}

crate::json_via_serde!(LoggingPrefs);

macro_rules! properties {
    ($( $(#[$meta:meta])* $key:literal => $getter:ident $(/ $setter:ident)? : $ty:ty; )+) => {
        $(
            $(#[$meta])*
            pub fn $getter(&self) -> Result<Option<$ty>> {
                self.bag.get($key)
            }

            $(
                pub fn $setter(&mut self, value: impl Into<$ty>) -> &mut Self {
                    let value: $ty = value.into();
                    self.bag.set($key, &value);
                    self
                }
            )?
        )+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities {
    bag: JsonObject,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_object(bag: JsonObject) -> Self {
        Self { bag }
    }

    pub fn as_object(&self) -> &JsonObject {
        &self.bag
    }

    pub fn into_object(self) -> JsonObject {
        self.bag
    }

    pub fn get<T: FromJson>(&self, key: &str) -> Result<Option<T>> {
        self.bag.get(key)
    }

    pub fn set<T: ToJson + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> &mut Self {
        self.bag.set(key, value);
        self
    }

    pub fn with<T: ToJson + ?Sized>(mut self, key: impl Into<String>, value: &T) -> Self {
        self.bag.set(key, value);
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.bag.has(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.bag.remove(key)
    }

    pub fn len(&self) -> usize {
        self.bag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bag.is_empty()
    }

    properties! {
        "browserName" => browser_name / set_browser_name: String;
        "version" => version / set_version: String;
        "platform" => platform / set_platform: Platform;

        // reported by the server, not requested
        "takesScreenshot" => takes_screenshot: bool;
        "handlesAlerts" => handles_alerts: bool;
        "cssSelectorsEnabled" => css_selectors_enabled: bool;

        "javascriptEnabled" => javascript_enabled / set_javascript_enabled: bool;
        "databaseEnabled" => database_enabled / set_database_enabled: bool;
        "locationContextEnabled" => location_context_enabled / set_location_context_enabled: bool;
        "applicationCacheEnabled" => application_cache_enabled / set_application_cache_enabled: bool;
        "browserConnectionEnabled" => browser_connection_enabled / set_browser_connection_enabled: bool;
        "webStorageEnabled" => web_storage_enabled / set_web_storage_enabled: bool;
        "acceptSslCerts" => accept_ssl_certs / set_accept_ssl_certs: bool;
        "rotatable" => rotatable / set_rotatable: bool;
        "nativeEvents" => native_events / set_native_events: bool;
        "proxy" => proxy / set_proxy: Proxy;
        "unexpectedAlertBehaviour" => unexpected_alert_behaviour / set_unexpected_alert_behaviour: UnexpectedAlertBehaviour;
        "elementScrollBehavior" => element_scroll_behavior / set_element_scroll_behavior: i32;
        "loggingPrefs" => logging_prefs / set_logging_prefs: LoggingPrefs;

        /// Session id some remote ends echo back inside the capabilities
        "webdriver.remote.sessionid" => remote_session_id: String;
        "webdriver.remote.quietExceptions" => quiet_exceptions / set_quiet_exceptions: bool;
    }
}

impl From<JsonObject> for Capabilities {
    fn from(bag: JsonObject) -> Self {
        Self { bag }
    }
}

impl ToJson for Capabilities {
    fn to_json(&self) -> Value {
        self.bag.to_json()
    }
}

impl FromJson for Capabilities {
    fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                bag: JsonObject::from_map(map.clone()),
            }),
            other => Err(type_mismatch("Capabilities", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{from_json, to_json};
    use crate::proxy::ManualProxy;
    use serde_json::json;

    #[test]
    fn test_typed_setters_write_protocol_keys() {
        let mut caps = Capabilities::new();
        caps.set_browser_name(browser::FIREFOX)
            .set_platform(Platform::Linux)
            .set_javascript_enabled(true)
            .set_unexpected_alert_behaviour(UnexpectedAlertBehaviour::Dismiss)
            .set_proxy(ManualProxy::new().http("p:3128"))
            .set_element_scroll_behavior(1);

        assert_eq!(
            to_json(&caps),
            json!({
                "browserName": "firefox",
                "platform": "LINUX",
                "javascriptEnabled": true,
                "unexpectedAlertBehaviour": "dismiss",
                "proxy": {"proxyType": "manual", "httpProxy": "p:3128"},
                "elementScrollBehavior": 1
            })
        );
    }

    #[test]
    fn test_typed_getters_read_server_caps() {
        let caps: Capabilities = from_json(&json!({
            "browserName": "chrome",
            "takesScreenshot": true,
            "platform": "MAC",
            "proxy": {"proxyType": "system"},
            "webdriver.remote.sessionid": "abc",
            "loggingPrefs": {"driver": "FINE"}
        }))
        .unwrap();

        assert_eq!(caps.browser_name().unwrap().as_deref(), Some("chrome"));
        assert_eq!(caps.takes_screenshot().unwrap(), Some(true));
        assert_eq!(caps.handles_alerts().unwrap(), None);
        assert_eq!(caps.platform().unwrap(), Some(Platform::Mac));
        assert_eq!(caps.proxy().unwrap(), Some(Proxy::System));
        assert_eq!(caps.remote_session_id().unwrap().as_deref(), Some("abc"));
        assert_eq!(
            caps.logging_prefs().unwrap().and_then(|p| p.driver()),
            Some(LogLevel::Fine)
        );
    }

    #[test]
    fn test_vendor_keys_pass_through() {
        let caps = Capabilities::new()
            .with("goog:chromeOptions", &json!({"args": ["--headless"]}))
            .with("webdriver.remote.quietExceptions", &true);

        assert!(caps.has("goog:chromeOptions"));
        assert_eq!(caps.quiet_exceptions().unwrap(), Some(true));
        let back: Capabilities = from_json(&to_json(&caps)).unwrap();
        assert_eq!(back, caps);
    }

    #[test]
    fn test_wrong_shape_fails_typed_read() {
        let caps = Capabilities::new().with("platform", &7);
        assert!(caps.platform().unwrap_err().is_decode());

        let err = from_json::<Capabilities>(&json!([])).unwrap_err();
        assert_eq!(err.locations(), vec!["FromJson<Capabilities>"]);
    }

    #[test]
    fn test_logging_prefs_shape() {
        let mut prefs = LoggingPrefs::new();
        prefs
            .set_driver(LogLevel::Warning)
            .set_level(LoggingPrefs::BROWSER, LogLevel::All);
        assert_eq!(to_json(&prefs), json!({"browser": "ALL", "driver": "WARNING"}));
        assert_eq!(from_json::<LoggingPrefs>(&to_json(&prefs)).unwrap(), prefs);
        assert!(from_json::<LoggingPrefs>(&json!({"driver": 3})).is_err());
    }

    #[test]
    fn test_unlisted_server_values_are_kept() {
        let caps: Capabilities = from_json(&json!({
            "platform": "WIN10",
            "unexpectedAlertBehaviour": "accept and notify",
            "loggingPrefs": {"driver": "DEBUG"}
        }))
        .unwrap();

        let platform = caps.platform().unwrap().unwrap();
        assert_eq!(platform, Platform::Other("WIN10".into()));
        assert!(!platform.is_known());
        assert_eq!(
            caps.unexpected_alert_behaviour().unwrap(),
            Some(UnexpectedAlertBehaviour::Other("accept and notify".into()))
        );
        assert_eq!(
            caps.logging_prefs().unwrap().and_then(|p| p.driver()),
            Some(LogLevel::Other("DEBUG".into()))
        );
        assert_eq!(to_json(&caps)["unexpectedAlertBehaviour"], json!("accept and notify"));

        let mut written = Capabilities::new();
        written.set_platform("WIN10");
        assert_eq!(written.as_object().get_raw("platform"), Some(&json!("WIN10")));
    }

    #[test]
    fn test_enum_values_roundtrip() {
        for p in Platform::ALL {
            assert_eq!(from_json::<Platform>(&to_json(p)).unwrap(), *p);
        }
        for b in UnexpectedAlertBehaviour::ALL {
            assert_eq!(from_json::<UnexpectedAlertBehaviour>(&to_json(b)).unwrap(), *b);
        }
        for l in LogLevel::ALL {
            assert_eq!(from_json::<LogLevel>(&to_json(l)).unwrap(), *l);
        }
    }
}
