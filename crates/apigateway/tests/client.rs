mod common;

use apigateway::{
    abstract_trait::ApiClientTrait,
    client::{ApiPayload, CACHE_BUST_PARAM, RequestBody, RequestOptions},
    events::SessionEvent,
    navigation::Navigator,
};
use common::{dead_address, harness, profile, spawn_server};
use reqwest::{
    header::{CONTENT_TYPE, HeaderValue},
    multipart::{Form, Part},
};
use serde_json::{Value, json};
use shared::{
    abstract_trait::SessionStoreTrait,
    domain::{LOGIN_PATH, Role},
    errors::ClientError,
    utils::{Method, Status},
};

fn json_payload(payload: ApiPayload) -> Value {
    match payload {
        ApiPayload::Json(value) => value,
        other => panic!("expected JSON payload, got {other:?}"),
    }
}

#[tokio::test]
async fn attaches_bearer_token_and_cache_bust() {
    let base = spawn_server().await;
    let h = harness(&base);
    h.session.set_session("tok-123", &profile(Role::Admin)).unwrap();

    let echo = json_payload(h.client.get("/echo", RequestOptions::default()).await.unwrap());

    assert_eq!(echo["authorization"], "Bearer tok-123");
    let query = echo["query"].as_str().unwrap();
    assert!(query.starts_with(&format!("{CACHE_BUST_PARAM}=")), "{query}");
}

#[tokio::test]
async fn cache_bust_keeps_existing_query() {
    let base = spawn_server().await;
    let h = harness(&base);

    let echo = json_payload(
        h.client
            .get("/echo?page=2", RequestOptions::public())
            .await
            .unwrap(),
    );

    let query = echo["query"].as_str().unwrap();
    assert!(query.starts_with("page=2&_ts="), "{query}");
}

#[tokio::test]
async fn cache_bust_applies_to_writes_and_can_be_disabled() {
    let base = spawn_server().await;
    let h = harness(&base);

    for payload in [
        h.client
            .post("/echo", RequestBody::None, RequestOptions::default())
            .await
            .unwrap(),
        h.client
            .put("/echo", RequestBody::None, RequestOptions::default())
            .await
            .unwrap(),
        h.client.delete("/echo", RequestOptions::default()).await.unwrap(),
    ] {
        let echo = json_payload(payload);
        assert!(echo["query"].as_str().unwrap().starts_with("_ts="));
    }

    let plain = h.client.clone().with_cache_bust(false);
    let echo = json_payload(plain.get("/echo", RequestOptions::default()).await.unwrap());
    assert_eq!(echo["query"], Value::Null);
}

#[tokio::test]
async fn auth_false_suppresses_the_token() {
    let base = spawn_server().await;
    let h = harness(&base);
    h.session.set_session("tok-123", &profile(Role::Opec)).unwrap();

    let echo = json_payload(h.client.get("/echo", RequestOptions::public()).await.unwrap());

    assert_eq!(echo["authorization"], Value::Null);
}

#[tokio::test]
async fn no_session_means_no_token() {
    let base = spawn_server().await;
    let h = harness(&base);

    let echo = json_payload(h.client.get("/echo", RequestOptions::default()).await.unwrap());

    assert_eq!(echo["authorization"], Value::Null);
}

#[tokio::test]
async fn json_bodies_are_sent_as_json() {
    let base = spawn_server().await;
    let h = harness(&base);

    let echo = json_payload(
        h.client
            .post(
                "/echo",
                RequestBody::Json(json!({"cliente": "ACME", "valor": 1500})),
                RequestOptions::default(),
            )
            .await
            .unwrap(),
    );

    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["content_type"], "application/json");
    assert_eq!(echo["content_type_count"], 1);
    let sent: Value = serde_json::from_str(echo["body"].as_str().unwrap()).unwrap();
    assert_eq!(sent, json!({"cliente": "ACME", "valor": 1500}));
}

#[tokio::test]
async fn caller_content_type_is_not_duplicated() {
    let base = spawn_server().await;
    let h = harness(&base);

    let options = RequestOptions::default().with_header(
        CONTENT_TYPE,
        HeaderValue::from_static("application/merge-patch+json"),
    );
    let echo = json_payload(
        h.client
            .put("/echo", RequestBody::Json(json!({"ativo": false})), options)
            .await
            .unwrap(),
    );

    assert_eq!(echo["content_type"], "application/merge-patch+json");
    assert_eq!(echo["content_type_count"], 1);
}

#[tokio::test]
async fn multipart_bodies_keep_transport_content_type() {
    let base = spawn_server().await;
    let h = harness(&base);
    h.session.set_session("tok", &profile(Role::Executivo)).unwrap();

    let form = Form::new()
        .text("descricao", "PI assinada")
        .part("file", Part::bytes(b"%PDF-1.4".to_vec()).file_name("pi.pdf"));

    let result = json_payload(
        h.client
            .post("/upload", RequestBody::Multipart(form), RequestOptions::default())
            .await
            .unwrap(),
    );

    let content_type = result["content_type"].as_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="), "{content_type}");
    assert_eq!(result["fields"][1]["file_name"], "pi.pdf");
    assert_eq!(result["fields"][1]["size"], 8);
}

#[tokio::test]
async fn unauthorized_clears_session_and_rejects() {
    let base = spawn_server().await;
    let mut h = harness(&base);
    h.session.set_session("stale", &profile(Role::Admin)).unwrap();

    let err = h
        .client
        .get("/unauthorized", RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::AuthorizationLost));
    assert!(!h.session.is_authenticated());
    assert_eq!(h.session.get_user(), None);
    assert_eq!(
        h.events.try_recv().unwrap(),
        SessionEvent::AuthorizationLost {
            path: "/unauthorized".to_string()
        }
    );
}

#[tokio::test]
async fn unauthorized_without_session_still_terminates() {
    let base = spawn_server().await;
    let mut h = harness(&base);
    let navigator = Navigator::new("/campanhas");

    let err = h
        .client
        .post("/unauthorized", RequestBody::None, RequestOptions::public())
        .await
        .unwrap_err();

    assert!(err.is_authorization_lost());
    navigator.drain(&mut h.events);
    assert_eq!(navigator.current(), LOGIN_PATH);
    assert_eq!(navigator.take_return_to().as_deref(), Some("/campanhas"));
}

#[tokio::test]
async fn concurrent_unauthorized_calls_are_idempotent() {
    let base = spawn_server().await;
    let mut h = harness(&base);
    h.session.set_session("stale", &profile(Role::Financeiro)).unwrap();
    let navigator = Navigator::new("/faturamento");

    let (a, b) = tokio::join!(
        h.client.get("/unauthorized", RequestOptions::default()),
        h.client.get("/unauthorized", RequestOptions::default()),
    );

    assert!(a.unwrap_err().is_authorization_lost());
    assert!(b.unwrap_err().is_authorization_lost());
    assert!(!h.session.is_authenticated());

    navigator.drain(&mut h.events);
    assert_eq!(navigator.history(), vec!["/faturamento", LOGIN_PATH]);
    assert_eq!(h.metrics.count(Method::Get, Status::Unauthorized), 2);
}

#[tokio::test]
async fn detail_message_is_surfaced() {
    let base = spawn_server().await;
    let h = harness(&base);

    let err = h
        .client
        .post(
            "/campanhas",
            RequestBody::Json(json!({})),
            RequestOptions::default(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert!(err.to_string().contains("Invalid campaign"));
}

#[tokio::test]
async fn error_field_and_raw_text_are_surfaced() {
    let base = spawn_server().await;
    let h = harness(&base);

    let err = h
        .client
        .post("/agencias", RequestBody::None, RequestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Agency already exists");

    let err = h.client.get("/boom", RequestOptions::default()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Internal failure");
}

#[tokio::test]
async fn no_content_is_an_empty_object() {
    let base = spawn_server().await;
    let h = harness(&base);

    let payload = h
        .client
        .delete("/items/1", RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(payload, ApiPayload::Empty);
    assert_eq!(payload.into_value(), json!({}));
}

#[tokio::test]
async fn non_json_is_returned_as_text() {
    let base = spawn_server().await;
    let h = harness(&base);

    let payload = h.client.get("/ping", RequestOptions::default()).await.unwrap();

    assert_eq!(payload, ApiPayload::Text("pong".to_string()));
}

#[tokio::test]
async fn download_returns_bytes_and_file_name() {
    let base = spawn_server().await;
    let h = harness(&base);
    h.session.set_session("tok", &profile(Role::Executivo)).unwrap();

    let download = h
        .client
        .download("/pis/export?format=csv", RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(download.bytes, b"id;cliente\n1;ACME\n".to_vec());
    assert_eq!(download.filename.as_deref(), Some("pis.csv"));
    assert_eq!(download.content_type.as_deref(), Some("text/csv"));
    assert_eq!(h.metrics.count(Method::Download, Status::Success), 1);
}

#[tokio::test]
async fn download_follows_the_same_failure_rules() {
    let base = spawn_server().await;
    let h = harness(&base);
    h.session.set_session("tok", &profile(Role::Executivo)).unwrap();

    let err = h
        .client
        .download("/unauthorized", RequestOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_authorization_lost());
    assert!(!h.session.is_authenticated());

    let err = h
        .client
        .download("/boom", RequestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn network_failures_share_the_error_shape() {
    let base = dead_address().await;
    let h = harness(&base);
    h.session.set_session("tok", &profile(Role::Admin)).unwrap();

    let err = h.client.get("/pis", RequestOptions::default()).await.unwrap_err();

    match err {
        ClientError::RequestFailed { status, message } => {
            assert_eq!(status, None);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(h.session.is_authenticated());
    assert_eq!(h.metrics.count(Method::Get, Status::Error), 1);
}
