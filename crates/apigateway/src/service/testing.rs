use crate::{
    abstract_trait::client::ApiClientTrait,
    client::{ApiMethod, ApiPayload, Download, RequestBody, RequestOptions},
    events::{self, SessionEvent},
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use shared::errors::ClientError;
use std::collections::VecDeque;
use tokio::sync::broadcast;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: ApiMethod,
    pub path: String,
    pub body: Option<Value>,
    pub multipart: bool,
    pub auth: bool,
}

/// Scripted client: answers calls in order from a queue and records them.
pub struct FakeClient {
    pub calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<ApiPayload, ClientError>>>,
    downloads: Mutex<VecDeque<Result<Download, ClientError>>>,
    events: broadcast::Sender<SessionEvent>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
            downloads: Mutex::new(VecDeque::new()),
            events: events::channel().0,
        }
    }

    pub fn respond(self, response: Result<ApiPayload, ClientError>) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    pub fn respond_download(self, response: Result<Download, ClientError>) -> Self {
        self.downloads.lock().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ApiClientTrait for FakeClient {
    async fn request(
        &self,
        method: ApiMethod,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<ApiPayload, ClientError> {
        let (body, multipart) = match body {
            RequestBody::None => (None, false),
            RequestBody::Json(value) => (Some(value), false),
            RequestBody::Multipart(_) => (None, true),
        };
        self.calls.lock().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
            multipart,
            auth: options.auth,
        });
        self.responses
            .lock()
            .pop_front()
            .unwrap_or(Ok(ApiPayload::Empty))
    }

    async fn download(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Download, ClientError> {
        self.calls.lock().push(RecordedCall {
            method: ApiMethod::Get,
            path: path.to_string(),
            body: None,
            multipart: false,
            auth: options.auth,
        });
        self.downloads
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::request_failed(Some(404), "no download scripted")))
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
