use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    /// 204 No Content.
    Empty,
    Json(Value),
    Text(String),
}

impl ApiPayload {
    /// `Empty` becomes `{}`, text becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            ApiPayload::Empty => Value::Object(Map::new()),
            ApiPayload::Json(value) => value,
            ApiPayload::Text(text) => Value::String(text),
        }
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.into_value())
    }
}

/// Binary body of a download along with what the server said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

impl Download {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Extracts the file name from a `Content-Disposition` header value.
///
/// Only the last path component is kept, so the result is always a bare name
/// that stays inside whatever directory it is written to.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| {
            let (key, value) = part.split_once('=')?;
            if !key.trim().eq_ignore_ascii_case("filename") {
                return None;
            }
            safe_file_name(value.trim().trim_matches('"'))
        })
}

fn safe_file_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    match name {
        "" | "." | ".." => None,
        _ if name.contains(':') || name.contains('\0') => None,
        _ => Some(name.to_string()),
    }
}
