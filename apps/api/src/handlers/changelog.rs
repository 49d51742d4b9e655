use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use tower_sessions::Session;

use annalist_application::{LogAction, PageParam};
use annalist_core::AppError;
use annalist_domain::LogCategory;

use crate::dto::{
    ChangeLogEntryDetailResponse, ChangeLogEntryResponse, ChangeLogOverviewResponse,
    ChangeLogPageResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{redirect_found, set_flash, take_flash};

#[cfg(test)]
mod tests;

/// Query parameters accepted by the change-log overview.
#[derive(Debug, serde::Deserialize)]
pub struct ChangeLogOverviewQuery {
    pub action: Option<String>,
}

/// Query parameters accepted by change-record listings.
#[derive(Debug, serde::Deserialize)]
pub struct ChangeLogListingQuery {
    pub page: Option<String>,
}

/// GET /changelog: recent change activity, or a clear/trim action.
pub async fn changelog_overview_handler(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ChangeLogOverviewQuery>,
) -> ApiResult<Response> {
    if let Some(action) = LogAction::from_param(query.action.as_deref()) {
        match action {
            LogAction::Clear => state.change_log_service.clear().await?,
            LogAction::Trim => state.change_log_service.trim().await?,
        }

        set_flash(&session, action.notification(LogCategory::Change)).await?;
        return Ok(redirect_found("/changelog"));
    }

    let entries = state.change_log_service.recent_activity().await?;
    let notification = take_flash(&session).await?;

    Ok(Json(ChangeLogOverviewResponse {
        entries: entries
            .into_iter()
            .map(ChangeLogEntryResponse::from)
            .collect(),
        notification,
    })
    .into_response())
}

/// GET /changelog/{contenttype}: listing for every item of one type.
pub async fn change_record_type_listing_handler(
    State(state): State<AppState>,
    Path(contenttype): Path<String>,
    Query(query): Query<ChangeLogListingQuery>,
) -> ApiResult<Json<ChangeLogPageResponse>> {
    // Omitted contentid keeps the panel's historical unset marker.
    listing_response(&state, &contenttype, "0", query).await
}

/// GET /changelog/{contenttype}/{contentid}: listing for one content item.
pub async fn change_record_listing_handler(
    State(state): State<AppState>,
    Path((contenttype, contentid)): Path<(String, String)>,
    Query(query): Query<ChangeLogListingQuery>,
) -> ApiResult<Json<ChangeLogPageResponse>> {
    listing_response(&state, &contenttype, &contentid, query).await
}

async fn listing_response(
    state: &AppState,
    contenttype: &str,
    contentid: &str,
    query: ChangeLogListingQuery,
) -> ApiResult<Json<ChangeLogPageResponse>> {
    let page = PageParam::parse(query.page.as_deref());
    let listing = state
        .change_log_service
        .listing(contenttype, contentid, page)
        .await?;

    Ok(Json(ChangeLogPageResponse::from(listing)))
}

/// GET /changelog/{contenttype}/{contentid}/{id}: one entry with
/// prev/next navigation.
pub async fn change_record_single_handler(
    State(state): State<AppState>,
    Path((contenttype, contentid, id)): Path<(String, String, String)>,
) -> ApiResult<Json<ChangeLogEntryDetailResponse>> {
    let id = parse_entry_id(&id).ok_or_else(|| {
        AppError::NotFound(format!("change log entry '{id}' does not exist"))
    })?;

    let detail = state
        .change_log_service
        .entry_detail(&contenttype, &contentid, id)
        .await?;

    Ok(Json(ChangeLogEntryDetailResponse::from(detail)))
}

/// The id path segment accepts digits only; anything else never names an
/// entry.
fn parse_entry_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    raw.parse::<i64>().ok()
}
