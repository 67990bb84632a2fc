mod cache_bust;
mod payload;
mod request;

pub use self::cache_bust::{CACHE_BUST_PARAM, append_query_param, with_cache_bust};
pub use self::payload::{ApiPayload, Download, filename_from_disposition};
pub use self::request::{ApiMethod, RequestBody, RequestOptions};

use crate::{abstract_trait::client::ApiClientTrait, events::SessionEvent};
use async_trait::async_trait;
use reqwest::{
    Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName, HeaderValue},
};
use shared::{
    abstract_trait::DynSessionStore,
    errors::{ClientError, error_message_from_body},
    utils::{Method as MetricMethod, Metrics, Status as MetricStatus},
};
use tokio::{sync::broadcast, time::Instant};
use tracing::{debug, error, info, warn};

/// HTTP client for the dashboard REST API.
///
/// Attaches the bearer token from the session store, stamps every URL with a
/// cache-busting parameter, and turns non-success answers into
/// [`ClientError`]s. A 401 clears the session and publishes
/// [`SessionEvent::AuthorizationLost`]; navigation is left to whoever listens.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: DynSessionStore,
    events: broadcast::Sender<SessionEvent>,
    metrics: Metrics,
    cache_bust: bool,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        session: DynSessionStore,
        events: broadcast::Sender<SessionEvent>,
        metrics: Metrics,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::request_failed(None, format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            events,
            metrics,
            cache_bust: true,
        })
    }

    pub fn with_cache_bust(mut self, enabled: bool) -> Self {
        self.cache_bust = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        if self.cache_bust {
            with_cache_bust(&url)
        } else {
            url
        }
    }

    async fn send(
        &self,
        method: ApiMethod,
        metric: MetricMethod,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        let start = Instant::now();
        let url = self.url_for(path);

        let has_content_type = options.headers.contains_key(CONTENT_TYPE);
        let mut request = self
            .client
            .request(method.as_http(), &url)
            .headers(options.headers);

        if options.auth
            && let Some(token) = self.session.get_token()
        {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => request = request.header(AUTHORIZATION, value),
                Err(e) => warn!("Stored token is not a valid header value: {:?}", e),
            }
        }

        request = match body {
            RequestBody::None => request,
            RequestBody::Json(value) if has_content_type => request.body(value.to_string()),
            RequestBody::Json(value) => request
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        debug!("Sending {method} {url}");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("{method} {path} failed before a response: {:?}", e);
                self.record(metric, MetricStatus::Error, start);
                return Err(ClientError::request_failed(
                    None,
                    format!("Network error: {e}"),
                ));
            }
        };

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("{method} {path} answered 401, clearing session");
            self.record(metric, MetricStatus::Unauthorized, start);
            self.lose_authorization(path);
            return Err(ClientError::AuthorizationLost);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(status.as_u16(), &body);
            error!("{method} {path} failed with {status}: {message}");
            self.record(metric, MetricStatus::Error, start);
            return Err(ClientError::request_failed(Some(status.as_u16()), message));
        }

        info!("{method} {path} -> {status}");
        self.record(metric, MetricStatus::Success, start);
        Ok(response)
    }

    fn lose_authorization(&self, path: &str) {
        if let Err(e) = self.session.clear_session() {
            error!("Failed to clear session after 401: {:?}", e);
        }

        // no subscribers is fine
        let _ = self.events.send(SessionEvent::AuthorizationLost {
            path: path.to_string(),
        });
    }

    fn record(&self, method: MetricMethod, status: MetricStatus, start: Instant) {
        self.metrics
            .record(method, status, start.elapsed().as_secs_f64());
    }
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn request(
        &self,
        method: ApiMethod,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<ApiPayload, ClientError> {
        let response = self
            .send(method, method.as_metric(), path, body, options)
            .await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(ApiPayload::Empty);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                let v = v.to_ascii_lowercase();
                v.contains("application/json") || v.contains("+json")
            })
            .unwrap_or(false);

        let text = response.text().await.map_err(|e| {
            ClientError::request_failed(None, format!("Failed to read response body: {e}"))
        })?;

        if !is_json {
            return Ok(ApiPayload::Text(text));
        }

        if text.trim().is_empty() {
            return Ok(ApiPayload::Empty);
        }

        serde_json::from_str(&text)
            .map(ApiPayload::Json)
            .map_err(|e| {
                ClientError::request_failed(
                    Some(status.as_u16()),
                    format!("Invalid JSON in response: {e}"),
                )
            })
    }

    async fn download(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Download, ClientError> {
        let response = self
            .send(
                ApiMethod::Get,
                MetricMethod::Download,
                path,
                RequestBody::None,
                options,
            )
            .await?;

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let filename = header(CONTENT_DISPOSITION)
            .as_deref()
            .and_then(filename_from_disposition);

        let bytes = response.bytes().await.map_err(|e| {
            ClientError::request_failed(None, format!("Failed to read download body: {e}"))
        })?;

        Ok(Download {
            bytes: bytes.to_vec(),
            content_type,
            filename,
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
