//! In-memory transport for tests
//!
//! Replays queued replies in order and records every request. Once the
//! queue is empty it answers `{"status":0,"value":null}`, so drop-time
//! cleanup in tests always succeeds unless a failure is queued.

use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use url::Url;
use wire::{Error, Result};

use crate::transport::{HttpClient, HttpResponse, Method};

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, body: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        }));
        self
    }

    pub fn reply_json(&self, value: Value) -> &Self {
        self.reply(&value.to_string())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(Error::transport("FakeTransport::send", message)));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    pub fn last(&self) -> Option<Recorded> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl HttpClient for FakeTransport {
    fn send(&self, method: Method, url: &Url, body: Option<&str>) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: url.path().to_string(),
            body: body.map(|b| serde_json::from_str(b).unwrap()),
        });

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(HttpResponse {
                    status: 200,
                    body: r#"{"status":0,"value":null}"#.to_string(),
                })
            })
    }
}
