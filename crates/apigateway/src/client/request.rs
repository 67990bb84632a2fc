use reqwest::{
    Method as HttpMethod,
    header::{HeaderMap, HeaderName, HeaderValue},
    multipart::Form,
};
use serde::Serialize;
use serde_json::Value;
use shared::utils::Method as MetricMethod;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ApiMethod {
    pub fn as_http(&self) -> HttpMethod {
        match self {
            ApiMethod::Get => HttpMethod::GET,
            ApiMethod::Post => HttpMethod::POST,
            ApiMethod::Put => HttpMethod::PUT,
            ApiMethod::Delete => HttpMethod::DELETE,
        }
    }

    pub fn as_metric(&self) -> MetricMethod {
        match self {
            ApiMethod::Get => MetricMethod::Get,
            ApiMethod::Post => MetricMethod::Post,
            ApiMethod::Put => MetricMethod::Put,
            ApiMethod::Delete => MetricMethod::Delete,
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_http().as_str())
    }
}

/// Outgoing request body.
///
/// `Json` is sent with an explicit `application/json` content type; a
/// `Multipart` form leaves the header (and its boundary) to the transport.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    None,
    Json(Value),
    Multipart(Form),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }
}

#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Attach the session token. Only an explicit `false` suppresses it.
    pub auth: bool,
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            auth: true,
            headers: HeaderMap::new(),
        }
    }
}

impl RequestOptions {
    pub fn public() -> Self {
        Self {
            auth: false,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}
