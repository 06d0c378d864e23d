//! Client - entry point to a remote end
//!
//! Owns the root of the resource tree. Building a client never touches the
//! network; the first request does.

use std::sync::Arc;
use url::Url;
use wire::{snippet, Capabilities, Context, Error, FromJson, JsonObject, Result};

use crate::config::ClientConfig;
use crate::protocol::{Envelope, SessionId, SessionRef};
use crate::resource::{make_sub_resource, Ownership, Resource};
use crate::session::Session;
use crate::transport::{HttpClient, HttpConnection, Method};

#[derive(Debug)]
pub struct Client {
    resource: Resource,
}

impl Client {
    /// Client for `url` with default settings
    pub fn new(url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpConnection::with_config(&config).context("Client::with_config")?;
        Self::with_transport(&config.url, Arc::new(transport))
    }

    /// Client over any transport
    pub fn with_transport(url: &str, transport: Arc<dyn HttpClient>) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| {
            Error::validation("Client::with_transport", format!("invalid url {url:?}: {e}"))
        })?;
        Ok(Self {
            resource: Resource::root(parsed, transport),
        })
    }

    pub fn url(&self) -> &Url {
        self.resource.url()
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// `GET /status`: build, OS and readiness info, passed through as-is
    pub fn get_status(&self) -> Result<JsonObject> {
        self.resource
            .get("status")
            .and_then(|value| JsonObject::from_json(&value))
            .context("Client::get_status")
    }

    /// `GET /sessions`: every session the server knows about
    ///
    /// The handles are observers; dropping them leaves the sessions running.
    pub fn get_sessions(&self) -> Result<Vec<Session>> {
        self.resource
            .get("sessions")
            .and_then(|value| Vec::<SessionRef>::from_json(&value))
            .and_then(|refs| {
                refs.into_iter()
                    .map(|r| self.make_session(r.id, Ownership::Observer, r.capabilities))
                    .collect::<Result<Vec<_>>>()
            })
            .context("Client::get_sessions")
    }

    /// `POST /session`: start a new session owned by the returned handle
    ///
    /// Dropping the handle ends the remote session.
    pub fn create_session(
        &self,
        desired: &Capabilities,
        required: &Capabilities,
    ) -> Result<Session> {
        let body = JsonObject::new()
            .with("desiredCapabilities", desired)
            .with("requiredCapabilities", required);

        self.resource
            .request(Method::Post, "session", Some(&body))
            .and_then(|envelope| {
                let Envelope {
                    session_id, value, ..
                } = envelope;
                let id = session_id.ok_or_else(|| {
                    Error::decode(
                        "session response",
                        "sessionId",
                        "no string session id",
                        snippet(&value),
                    )
                })?;
                let capabilities = Capabilities::from_json(&value)?;
                let session = self.make_session(id, Ownership::Owner, Some(capabilities))?;
                tracing::info!("Created session {}", session.id());
                Ok(session)
            })
            .context("Client::create_session")
    }

    /// Observer handle for a session id learned elsewhere
    pub fn attach_session(&self, id: &str) -> Result<Session> {
        self.make_session(id.to_string(), Ownership::Observer, None)
            .context("Client::attach_session")
    }

    fn make_session(
        &self,
        id: SessionId,
        ownership: Ownership,
        capabilities: Option<Capabilities>,
    ) -> Result<Session> {
        let resource = make_sub_resource(&self.resource, "session", &id, ownership)?;
        Ok(Session::new(id, resource, capabilities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeTransport;
    use serde_json::json;
    use wire::{browser, ErrorKind};

    const URL: &str = "http://localhost:4444/wd/hub";

    fn client(fake: &Arc<FakeTransport>) -> Client {
        Client::with_transport(URL, fake.clone()).unwrap()
    }

    #[test]
    fn test_construction_is_offline() {
        let fake = FakeTransport::new();
        let c = client(&fake);
        assert_eq!(c.url().as_str(), "http://localhost:4444/wd/hub");
        assert!(fake.requests().is_empty());
        drop(c);
        assert!(fake.requests().is_empty());
    }

    #[test]
    fn test_invalid_url_is_validation_error() {
        let fake = FakeTransport::new();
        let err = Client::with_transport("not a url", fake.clone()).unwrap_err();
        assert!(err.is_validation());
        assert!(Client::new("::").unwrap_err().is_validation());
    }

    #[test]
    fn test_get_status() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"status":0,"value":{"build":{"version":"2.53.1"},"os":{"name":"Linux"}}}"#);

        let status = client(&fake).get_status().unwrap();

        assert_eq!(status.get_raw("build"), Some(&json!({"version": "2.53.1"})));
        assert_eq!(fake.last().unwrap().path, "/wd/hub/status");
    }

    #[test]
    fn test_get_status_rejects_non_object() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"status":0,"value":[1]}"#);

        let err = client(&fake).get_status().unwrap_err();

        assert!(err.is_decode());
        assert_eq!(err.locations(), vec!["FromJson<object>", "Client::get_status"]);
    }

    #[test]
    fn test_get_sessions_are_observers_in_order() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"status":0,"value":[{"id":"s1"},{"id":"s2"}]}"#);
        let c = client(&fake);

        let sessions = c.get_sessions().unwrap();

        let ids: Vec<_> = sessions.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
        assert!(sessions.iter().all(|s| s.ownership() == Ownership::Observer));
        assert_eq!(sessions[1].resource().path(), "/wd/hub/session/s2");

        drop(sessions);
        assert_eq!(fake.count(Method::Delete), 0);
    }

    #[test]
    fn test_get_sessions_bad_entry() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"status":0,"value":[{"id":"s1"},{"id":""}]}"#);

        let err = client(&fake).get_sessions().unwrap_err();

        assert!(err.is_validation());
        assert_eq!(
            err.locations().last().copied(),
            Some("Client::get_sessions")
        );
        assert_eq!(fake.count(Method::Delete), 0);
    }

    #[test]
    fn test_create_session_owns_result() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"sessionId":"abc","status":0,"value":{"browserName":"firefox"}}"#);
        let c = client(&fake);
        let desired = Capabilities::new().with("browserName", browser::FIREFOX);

        let session = c.create_session(&desired, &Capabilities::new()).unwrap();

        assert_eq!(session.id(), "abc");
        assert_eq!(session.ownership(), Ownership::Owner);
        assert_eq!(
            session.capabilities().unwrap().browser_name().unwrap().as_deref(),
            Some("firefox")
        );

        let request = fake.last().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/wd/hub/session");
        assert_eq!(
            request.body,
            Some(json!({
                "desiredCapabilities": {"browserName": "firefox"},
                "requiredCapabilities": {}
            }))
        );

        drop(session);
        assert_eq!(fake.count(Method::Delete), 1);
        assert_eq!(fake.last().unwrap().path, "/wd/hub/session/abc");
    }

    #[test]
    fn test_create_session_needs_session_id() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"status":0,"value":{"browserName":"firefox"}}"#);

        let err = client(&fake)
            .create_session(&Capabilities::new(), &Capabilities::new())
            .unwrap_err();

        assert!(err.is_decode());
        assert_eq!(
            err.locations(),
            vec!["session response", "Client::create_session"]
        );
        assert_eq!(fake.count(Method::Delete), 0);
    }

    #[test]
    fn test_create_session_rejects_non_string_id() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"sessionId":42,"status":0,"value":{"browserName":"firefox"}}"#);

        let err = client(&fake)
            .create_session(&Capabilities::new(), &Capabilities::new())
            .unwrap_err();

        assert!(err.is_decode());
        assert_eq!(
            err.locations(),
            vec!["session response", "Client::create_session"]
        );
        assert_eq!(fake.count(Method::Delete), 0);
    }

    #[test]
    fn test_create_session_needs_capability_object() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"sessionId":"abc","status":0,"value":"firefox"}"#);

        let err = client(&fake)
            .create_session(&Capabilities::new(), &Capabilities::new())
            .unwrap_err();

        assert!(err.is_decode());
        assert_eq!(fake.count(Method::Delete), 0);
    }

    #[test]
    fn test_create_session_protocol_failure() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"status":33,"value":{"message":"no firefox here"}}"#);

        let err = client(&fake)
            .create_session(&Capabilities::new(), &Capabilities::new())
            .unwrap_err();

        assert_eq!(err.protocol_status(), Some(wire::ProtocolStatus::SessionNotCreated));
        assert_eq!(err.protocol_message(), Some("no firefox here"));
    }

    #[test]
    fn test_decode_failure_chain_has_three_frames() {
        let fake = FakeTransport::new();
        fake.reply(r#"{"sessionId":"abc","value":{}}"#);

        let err = client(&fake)
            .create_session(&Capabilities::new(), &Capabilities::new())
            .unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::Decode { .. }));
        assert_eq!(
            err.locations(),
            vec![
                "Envelope::decode",
                "POST /wd/hub/session",
                "Client::create_session"
            ]
        );
        assert_eq!(
            err.to_string(),
            "Client::create_session <- POST /wd/hub/session <- Envelope::decode: \
             cannot decode Envelope: missing status (got {\"sessionId\":\"abc\",\"value\":{}})"
        );
    }

    #[test]
    fn test_attach_session_is_observer() {
        let fake = FakeTransport::new();
        let c = client(&fake);

        let session = c.attach_session("xyz").unwrap();
        assert_eq!(session.ownership(), Ownership::Observer);
        assert!(session.capabilities().is_none());
        drop(session);

        assert!(fake.requests().is_empty());
        assert!(c.attach_session("").unwrap_err().is_validation());
    }
}
