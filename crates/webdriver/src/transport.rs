//! HTTP transport
//!
//! The protocol layer only needs one capability: send a request, get back a
//! status line and a body. Protocol success is read from the envelope, not
//! from the HTTP status, so the transport never judges responses.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::fmt;
use url::Url;
use wire::{Error, Result};

use crate::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Anything that can carry one request/response pair
///
/// Implementations must not retry; failures are reported as
/// `ErrorKind::Transport`.
pub trait HttpClient: Send + Sync {
    fn send(&self, method: Method, url: &Url, body: Option<&str>) -> Result<HttpResponse>;
}

/// Blocking HTTP connection backed by reqwest
///
/// reqwest pools connections internally, so one instance serves a whole
/// resource tree.
#[derive(Debug, Clone)]
pub struct HttpConnection {
    client: reqwest::blocking::Client,
}

impl HttpConnection {
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::transport("HttpConnection::with_config", e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpClient for HttpConnection {
    fn send(&self, method: Method, url: &Url, body: Option<&str>) -> Result<HttpResponse> {
        let mut request = self
            .client
            .request(method.into(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json;charset=UTF-8")
                .body(body.to_string());
        }

        let response = request
            .send()
            .map_err(|e| Error::transport("HttpConnection::send", e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::transport("HttpConnection::send", format!("reading body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}
