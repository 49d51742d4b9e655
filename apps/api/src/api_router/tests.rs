use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::DateTime;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use annalist_application::{ChangeLogService, SystemLogService};
use annalist_domain::{ChangeLogEntry, MutationKind};
use annalist_infrastructure::{
    ConfigContentTypeRegistry, InMemoryChangeLogRepository, InMemoryContentRepository,
    InMemorySystemLogRepository,
};

use crate::state::AppState;

use super::build_router;

fn entry(id: i64) -> ChangeLogEntry {
    let Some(recorded_at) = DateTime::from_timestamp(1_700_000_000 + id, 0) else {
        panic!("timestamp out of range");
    };

    ChangeLogEntry {
        id,
        recorded_at,
        title: format!("Entry {id}"),
        contenttype: "pages".to_owned(),
        contentid: "1".to_owned(),
        mutation: MutationKind::Update,
        diff: None,
        comment: None,
        ownerid: None,
    }
}

async fn seeded_router(entries: Vec<ChangeLogEntry>) -> Router {
    let repository = Arc::new(InMemoryChangeLogRepository::new());
    for seeded in entries {
        repository.append(seeded).await;
    }

    let state = AppState {
        change_log_service: ChangeLogService::new(
            repository,
            Arc::new(ConfigContentTypeRegistry::new(Vec::new())),
            Arc::new(InMemoryContentRepository::new()),
        ),
        system_log_service: SystemLogService::new(Arc::new(InMemorySystemLogRepository::new())),
    };

    let session_layer = SessionManagerLayer::new(MemoryStore::default());
    match build_router(state, "http://localhost:3000", session_layer) {
        Ok(router) => router,
        Err(error) => panic!("failed to build test router: {error}"),
    }
}

fn get(uri: &str, session_cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = session_cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match builder.body(Body::empty()) {
        Ok(request) => request,
        Err(error) => panic!("failed to build request: {error}"),
    }
}

fn header_value(response: &axum::response::Response, name: header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = match axum::body::to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => panic!("failed to read response body: {error}"),
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(error) => panic!("response body is not JSON: {error}"),
    }
}

#[tokio::test]
async fn changelog_clear_redirects_and_flashes_a_notification() {
    let app = seeded_router(vec![entry(1), entry(2)]).await;

    let response = match app.clone().oneshot(get("/changelog?action=clear", None)).await {
        Ok(response) => response,
        Err(error) => panic!("request failed: {error}"),
    };

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        header_value(&response, header::LOCATION).as_deref(),
        Some("/changelog")
    );

    let Some(cookie) = header_value(&response, header::SET_COOKIE) else {
        panic!("expected a session cookie on the redirect");
    };

    let overview = match app.oneshot(get("/changelog", Some(cookie.as_str()))).await {
        Ok(response) => response,
        Err(error) => panic!("request failed: {error}"),
    };
    assert_eq!(overview.status(), StatusCode::OK);

    let body = json_body(overview).await;
    assert_eq!(body["notification"], "The change log has been cleared.");
    assert_eq!(body["entries"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn flash_notification_is_consumed_by_one_render() {
    let app = seeded_router(Vec::new()).await;

    let response = match app.clone().oneshot(get("/changelog?action=trim", None)).await {
        Ok(response) => response,
        Err(error) => panic!("request failed: {error}"),
    };
    assert_eq!(response.status(), StatusCode::FOUND);

    let Some(cookie) = header_value(&response, header::SET_COOKIE) else {
        panic!("expected a session cookie on the redirect");
    };

    let first = match app
        .clone()
        .oneshot(get("/changelog", Some(cookie.as_str())))
        .await
    {
        Ok(response) => response,
        Err(error) => panic!("request failed: {error}"),
    };
    let body = json_body(first).await;
    assert_eq!(body["notification"], "The change log has been trimmed.");

    let second = match app.oneshot(get("/changelog", Some(cookie.as_str()))).await {
        Ok(response) => response,
        Err(error) => panic!("request failed: {error}"),
    };
    let body = json_body(second).await;
    assert_eq!(body["notification"], serde_json::Value::Null);
}

#[tokio::test]
async fn systemlog_clear_redirects_and_flashes_a_notification() {
    let app = seeded_router(Vec::new()).await;

    let response = match app.clone().oneshot(get("/systemlog?action=clear", None)).await {
        Ok(response) => response,
        Err(error) => panic!("request failed: {error}"),
    };

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        header_value(&response, header::LOCATION).as_deref(),
        Some("/systemlog")
    );

    let Some(cookie) = header_value(&response, header::SET_COOKIE) else {
        panic!("expected a session cookie on the redirect");
    };

    let overview = match app.oneshot(get("/systemlog", Some(cookie.as_str()))).await {
        Ok(response) => response,
        Err(error) => panic!("request failed: {error}"),
    };
    assert_eq!(overview.status(), StatusCode::OK);

    let body = json_body(overview).await;
    assert_eq!(body["notification"], "The system log has been cleared.");
}

#[tokio::test]
async fn unknown_action_renders_the_overview() {
    let app = seeded_router(vec![entry(1)]).await;

    let response = match app.oneshot(get("/changelog?action=purge", None)).await {
        Ok(response) => response,
        Err(error) => panic!("request failed: {error}"),
    };

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["entries"].as_array().map(Vec::len), Some(1));
}
