#![allow(dead_code)]

use apigateway::{client::ApiClient, events};
use axum::{
    Json, Router,
    extract::Multipart,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use shared::{
    abstract_trait::DynSessionStore,
    cache::{MemoryStorage, SessionStore},
    domain::{Role, UserProfile},
    utils::Metrics,
};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::broadcast};

pub const VALID_TOKEN: &str = "tok-valid";

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let read = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "authorization": read(header::AUTHORIZATION),
        "content_type": read(header::CONTENT_TYPE),
        "content_type_count": headers.get_all(header::CONTENT_TYPE).iter().count(),
        "body": body,
    }))
}

async fn unauthorized() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Token expired"})))
}

async fn invalid_campaign() -> impl IntoResponse {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"detail": "Invalid campaign"})),
    )
}

async fn conflict() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Agency already exists"})),
    )
}

async fn boom() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal failure")
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn plain_text() -> &'static str {
    "pong"
}

async fn report() -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"pis.csv\"",
            ),
        ],
        "id;cliente\n1;ACME\n",
    )
        .into_response()
}

async fn upload(headers: HeaderMap, mut multipart: Multipart) -> Json<Value> {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        fields.push(json!({"name": name, "file_name": file_name, "size": size}));
    }

    Json(json!({
        "content_type": headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        "fields": fields,
    }))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != "secret" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Bad credentials"})))
            .into_response();
    }

    Json(json!({
        "access_token": VALID_TOKEN,
        "token_type": "bearer",
        "user": {
            "id": 7,
            "email": body["email"],
            "role": " Executivo ",
            "name": "Ana Lima"
        }
    }))
    .into_response()
}

async fn me(headers: HeaderMap) -> Response {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if bearer != Some(VALID_TOKEN) {
        return (StatusCode::UNAUTHORIZED, "not logged in").into_response();
    }

    Json(json!({
        "id": "7",
        "email": "ana@example.com",
        "role": "executivo",
        "name": "Ana L."
    }))
    .into_response()
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", get(echo).post(echo).put(echo).delete(echo))
        .route("/unauthorized", get(unauthorized).post(unauthorized))
        .route("/campanhas", post(invalid_campaign))
        .route("/agencias", post(conflict))
        .route("/boom", get(boom))
        .route("/items/{id}", delete(no_content))
        .route("/ping", get(plain_text))
        .route("/pis/export", get(report))
        .route("/pis/{id}/anexos", post(upload))
        .route("/upload", post(upload))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(no_content))
        .route("/auth/me", get(me))
}

pub async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });

    format!("http://{addr}")
}

/// Address nothing listens on.
pub async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub struct Harness {
    pub client: ApiClient,
    pub session: Arc<SessionStore>,
    pub events: broadcast::Receiver<events::SessionEvent>,
    pub metrics: Metrics,
}

pub fn harness(base_url: &str) -> Harness {
    let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
    let (sender, events) = events::channel();
    let metrics = Metrics::new();

    let client = ApiClient::new(
        base_url,
        session.clone() as DynSessionStore,
        sender,
        metrics.clone(),
    )
    .unwrap();

    Harness {
        client,
        session,
        events,
        metrics,
    }
}

pub fn profile(role: Role) -> UserProfile {
    UserProfile::new("1", "user@example.com", role, "User")
}
