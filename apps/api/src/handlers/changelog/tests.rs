use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::DateTime;

use annalist_application::{ChangeLogService, SystemLogService};
use annalist_domain::{ChangeLogEntry, ContentTypeDefinition, MutationKind};
use annalist_infrastructure::{
    ConfigContentTypeRegistry, InMemoryChangeLogRepository, InMemoryContentRepository,
    InMemorySystemLogRepository,
};

use crate::state::AppState;

use super::{
    ChangeLogListingQuery, change_record_single_handler, change_record_type_listing_handler,
    parse_entry_id,
};

fn entry(id: i64, contenttype: &str, contentid: &str, title: &str) -> ChangeLogEntry {
    let Some(recorded_at) = DateTime::from_timestamp(1_700_000_000 + id, 0) else {
        panic!("timestamp out of range");
    };

    ChangeLogEntry {
        id,
        recorded_at,
        title: title.to_owned(),
        contenttype: contenttype.to_owned(),
        contentid: contentid.to_owned(),
        mutation: MutationKind::Update,
        diff: None,
        comment: None,
        ownerid: None,
    }
}

async fn seeded_state(entries: Vec<ChangeLogEntry>) -> AppState {
    let repository = Arc::new(InMemoryChangeLogRepository::new());
    for seeded in entries {
        repository.append(seeded).await;
    }

    let Ok(pages) = ContentTypeDefinition::new("pages", "Page", "Pages") else {
        panic!("expected valid definition");
    };

    AppState {
        change_log_service: ChangeLogService::new(
            repository,
            Arc::new(ConfigContentTypeRegistry::new(vec![pages])),
            Arc::new(InMemoryContentRepository::new()),
        ),
        system_log_service: SystemLogService::new(Arc::new(InMemorySystemLogRepository::new())),
    }
}

#[test]
fn entry_ids_accept_digits_only() {
    assert_eq!(parse_entry_id("42"), Some(42));
    assert_eq!(parse_entry_id("007"), Some(7));
    assert_eq!(parse_entry_id(""), None);
    assert_eq!(parse_entry_id("-1"), None);
    assert_eq!(parse_entry_id("12a"), None);
    assert_eq!(parse_entry_id("latest"), None);
}

#[tokio::test]
async fn unknown_content_type_listing_responds_with_404() {
    let state = seeded_state(Vec::new()).await;

    let result = change_record_type_listing_handler(
        State(state),
        Path("widgets".to_owned()),
        Query(ChangeLogListingQuery { page: None }),
    )
    .await;

    let Err(error) = result else {
        panic!("expected unknown content type to fail");
    };
    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_entry_responds_with_404() {
    let state = seeded_state(Vec::new()).await;

    let result = change_record_single_handler(
        State(state),
        Path(("pages".to_owned(), "42".to_owned(), "99".to_owned())),
    )
    .await;

    let Err(error) = result else {
        panic!("expected missing entry to fail");
    };
    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_entry_id_responds_with_404() {
    let state = seeded_state(vec![entry(1, "pages", "42", "A page")]).await;

    let result = change_record_single_handler(
        State(state),
        Path(("pages".to_owned(), "42".to_owned(), "latest".to_owned())),
    )
    .await;

    let Err(error) = result else {
        panic!("expected non-numeric id to fail");
    };
    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn type_listing_renders_first_page() {
    let entries = (1..=7)
        .map(|id| entry(id, "pages", "1", "A page"))
        .collect();
    let state = seeded_state(entries).await;

    let result = change_record_type_listing_handler(
        State(state),
        Path("pages".to_owned()),
        Query(ChangeLogListingQuery { page: None }),
    )
    .await;

    let Ok(axum::Json(page)) = result else {
        panic!("expected listing to succeed");
    };
    assert_eq!(page.title, "Pages");
    assert_eq!(page.entries.len(), 5);
    assert_eq!(page.page, Some(1));
    assert_eq!(page.page_count, Some(2));
}
