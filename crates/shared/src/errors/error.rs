use serde::Deserialize;
use serde_json::Value;

/// Error body shape the API may send back. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl ErrorResponse {
    /// Preference order: `detail`, then `error`, then `message`.
    pub fn message(&self) -> Option<String> {
        [&self.detail, &self.error, &self.message]
            .into_iter()
            .flatten()
            .find_map(render_value)
    }
}

/// Builds a human readable message out of a failed response body.
pub fn error_message_from_body(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body)
        && let Some(message) = parsed.message()
    {
        return message;
    }

    let text = body.trim();
    if text.is_empty() {
        format!("Request failed with status {status}")
    } else {
        text.to_string()
    }
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => non_empty(s),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(render_item).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        Value::Object(map) => ["msg", "message", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str).and_then(non_empty))
            .or_else(|| Some(value.to_string())),
        other => Some(other.to_string()),
    }
}

// validation lists look like [{"loc": ["body", "field"], "msg": "..."}]
fn render_item(item: &Value) -> Option<String> {
    match item {
        Value::Object(map) => {
            let msg = map
                .get("msg")
                .or_else(|| map.get("message"))
                .and_then(Value::as_str)
                .and_then(non_empty)?;
            let field = map
                .get("loc")
                .and_then(Value::as_array)
                .and_then(|loc| loc.last())
                .and_then(|last| match last {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                });
            Some(match field {
                Some(field) => format!("{field}: {msg}"),
                None => msg,
            })
        }
        other => render_value(other),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
