//! Resource tree
//!
//! A resource is an absolute URL plus the transport that reaches it. Child
//! resources are built by path concatenation from their parent; no parent
//! pointer is kept, the URL alone addresses the node.
//!
//! Ownership is fixed when a resource is built:
//! - `Owner`: dropping the handle issues `DELETE` on its own path
//! - `Observer`: dropping the handle has no remote effect
//!
//! Resources are not `Clone`; an owner is the only handle to its remote
//! entity.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;
use wire::{Context, Error, JsonObject, Result, ToJson};

use crate::protocol::Envelope;
use crate::transport::{HttpClient, Method};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Releasing the handle destroys the remote entity
    Owner,
    /// Releasing the handle leaves the remote entity alone
    Observer,
}

pub struct Resource {
    url: Url,
    transport: Arc<dyn HttpClient>,
    ownership: Ownership,
}

impl Resource {
    /// Root of a tree; always an observer
    ///
    /// Query, fragment and trailing separators of `url` are dropped.
    pub fn root(mut url: Url, transport: Arc<dyn HttpClient>) -> Self {
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        Self {
            url,
            transport,
            ownership: Ownership::Observer,
        }
    }

    /// Server-relative path, e.g. `/wd/hub/session/7f`
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn transport(&self) -> &Arc<dyn HttpClient> {
        &self.transport
    }

    pub fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::Get, path, None).map(|e| e.value)
    }

    pub fn post(&self, path: &str, body: &JsonObject) -> Result<Value> {
        self.request(Method::Post, path, Some(body)).map(|e| e.value)
    }

    pub fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::Delete, path, None).map(|e| e.value)
    }

    /// One protocol round trip
    ///
    /// Returns the whole envelope so callers can read protocol extensions
    /// such as the top-level `sessionId`. A non-zero status is already an
    /// error here.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonObject>,
    ) -> Result<Envelope> {
        let url = self.target(path)?;
        let location = || format!("{} {}", method, url.path());
        let body = body.map(|b| b.to_json().to_string());

        tracing::debug!("{} {}", method, url);
        if let Some(body) = &body {
            tracing::trace!("request body: {}", body);
        }

        let response = self
            .transport
            .send(method, &url, body.as_deref())
            .with_context(location)?;
        tracing::trace!("response {}: {}", response.status, response.body);

        Envelope::decode(&response.body)
            .and_then(Envelope::check)
            .with_context(location)
    }

    /// Child resource at `path` below this one
    ///
    /// Exactly one separator ends up between segments, whatever separators
    /// the caller put around them.
    pub fn resolve_child(&self, path: &str, ownership: Ownership) -> Result<Resource> {
        if segments(path).next().is_none() {
            return Err(Error::validation(
                "Resource::resolve_child",
                format!("empty path segment {path:?} below {}", self.path()),
            ));
        }

        Ok(Resource {
            url: self.target(path).context("Resource::resolve_child")?,
            transport: Arc::clone(&self.transport),
            ownership,
        })
    }

    /// Destroy the remote entity now and report the outcome
    ///
    /// Unlike drop-time cleanup, failures are returned. Either way the
    /// handle is consumed and no second `DELETE` follows.
    pub fn release(mut self) -> Result<()> {
        let was_owner = self.ownership == Ownership::Owner;
        self.ownership = Ownership::Observer;
        if !was_owner {
            return Ok(());
        }
        self.delete("").map(|_| ()).context("Resource::release")
    }

    /// Absolute URL of `path` below this resource
    ///
    /// Dot segments and backslashes are refused: the URL parser would
    /// resolve them, moving the target outside this resource.
    fn target(&self, path: &str) -> Result<Url> {
        if let Some(bad) = segments(path).find(|s| is_dot_segment(s) || s.contains('\\')) {
            return Err(Error::validation(
                "Resource::target",
                format!("invalid path segment {bad:?} below {}", self.path()),
            ));
        }
        let mut url = self.url.clone();
        if segments(path).next().is_some() {
            url.set_path(&join_path(self.url.path(), path));
        }
        Ok(url)
    }
}

impl Drop for Resource {
    fn drop(&mut self) {
        if self.ownership != Ownership::Owner {
            return;
        }
        match self.delete("") {
            Ok(_) => tracing::debug!("Released {}", self.path()),
            // teardown must not fail; the remote entity is left to expire
            Err(e) => tracing::warn!("Failed to release {}: {}", self.path(), e),
        }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("url", &self.url.as_str())
            .field("ownership", &self.ownership)
            .finish()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e"
    )
}

/// Concatenate a base path and a relative path with single separators
pub fn join_path(base: &str, relative: &str) -> String {
    let mut joined = base.trim_end_matches('/').to_string();
    for segment in segments(relative) {
        joined.push('/');
        joined.push_str(segment);
    }
    joined
}

/// Build `parent/segment/id` with an explicit ownership
///
/// Callers that create the remote entity ask for `Owner`; callers that only
/// discovered it ask for `Observer`.
pub fn make_sub_resource(
    parent: &Resource,
    segment: &str,
    id: &str,
    ownership: Ownership,
) -> Result<Resource> {
    if id.is_empty() || id.contains(['/', '\\']) || is_dot_segment(id) {
        return Err(Error::validation(
            "make_sub_resource",
            format!("invalid identifier {id:?}"),
        ));
    }
    parent.resolve_child(&format!("{segment}/{id}"), ownership)
}
