//! Shared fixtures: a mockito server wired to the real HTTP transport, and a
//! recording transport for asserting exactly what would have been sent.
#![allow(dead_code)]

use ai_lib_openai_compat::{
    AccessConfig, CompatClient, Dialect, HttpMethod, HttpTransport, StaticEnv, Transport,
    TransportError,
};
use async_trait::async_trait;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Test fixture that owns a mock server and a client pointed at it.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
    pub client: CompatClient,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        Self::with_env(StaticEnv::new()).await
    }

    pub async fn with_env(env: StaticEnv) -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        let client = CompatClient::builder()
            .transport(Arc::new(HttpTransport::new(reqwest::Client::new())))
            .env(Arc::new(env))
            .build()
            .expect("client");
        Self {
            server,
            base_url,
            client,
        }
    }

    /// Config for `dialect` with the mock server as host.
    pub fn config(&self, dialect: Dialect) -> AccessConfig {
        AccessConfig::new(dialect)
            .with_api_key("test-key")
            .with_host(self.base_url.clone())
    }

    pub async fn mock_json(
        &mut self,
        method: &str,
        path: impl Into<Matcher>,
        status: usize,
        body: Value,
    ) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Transport that records every call and replays queued responses.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, response: Result<Value, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body: body.cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Null))
    }
}

/// Client over a recording transport with an empty environment.
pub fn recording_client(transport: Arc<RecordingTransport>) -> CompatClient {
    CompatClient::builder()
        .transport(transport)
        .env(Arc::new(StaticEnv::new()))
        .build()
        .expect("client")
}
