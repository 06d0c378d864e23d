//! Proxy configuration carried in the `proxy` capability
//!
//! Wire shape is one object: the `proxyType` discriminant plus the fields
//! of that variant, flattened.
//!
//! ```json
//! {"proxyType": "manual", "httpProxy": "proxy:8080", "noProxy": "localhost"}
//! ```

use serde::{Deserialize, Serialize};

use crate::string_enum;

string_enum! {
    /// Value of the `proxyType` key
    pub enum ProxyType {
        Direct => "direct",
        Manual => "manual",
        Pac => "pac",
        Autodetect => "autodetect",
        System => "system",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "proxyType", rename_all = "lowercase")]
pub enum Proxy {
    /// No proxy
    Direct,
    /// Proxy autodetection, usually WPAD
    Autodetect,
    /// Whatever the operating system is configured with
    System,
    /// Proxy autoconfiguration script
    Pac {
        #[serde(rename = "proxyAutoconfigUrl")]
        autoconfig_url: String,
    },
    Manual(ManualProxy),
}

impl Proxy {
    pub fn pac(url: impl Into<String>) -> Self {
        Proxy::Pac {
            autoconfig_url: url.into(),
        }
    }

    pub fn proxy_type(&self) -> ProxyType {
        match self {
            Proxy::Direct => ProxyType::Direct,
            Proxy::Autodetect => ProxyType::Autodetect,
            Proxy::System => ProxyType::System,
            Proxy::Pac { .. } => ProxyType::Pac,
            Proxy::Manual(_) => ProxyType::Manual,
        }
    }
}

impl From<ManualProxy> for Proxy {
    fn from(manual: ManualProxy) -> Self {
        Proxy::Manual(manual)
    }
}

/// Per-protocol proxy hosts; unset fields are left off the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualProxy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ftp_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socks_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socks_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socks_password: Option<String>,
    /// Comma separated hosts that bypass the proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_proxy: Option<String>,
}

impl ManualProxy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn http(mut self, address: impl Into<String>) -> Self {
        self.http_proxy = Some(address.into());
        self
    }

    pub fn ssl(mut self, address: impl Into<String>) -> Self {
        self.ssl_proxy = Some(address.into());
        self
    }

    pub fn ftp(mut self, address: impl Into<String>) -> Self {
        self.ftp_proxy = Some(address.into());
        self
    }

    pub fn socks(
        mut self,
        address: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        self.socks_proxy = Some(address.into());
        self.socks_username = username;
        self.socks_password = password;
        self
    }

    pub fn no_proxy_for(mut self, hosts: impl Into<String>) -> Self {
        self.no_proxy = Some(hosts.into());
        self
    }
}

crate::json_via_serde!(Proxy);
