use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use tower_sessions::Session;

use annalist_application::{LogAction, SystemLogFilter};
use annalist_domain::LogCategory;

use crate::dto::{SystemLogEntryResponse, SystemLogOverviewResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{redirect_found, set_flash, take_flash};

/// Query parameters accepted by the system-log overview.
#[derive(Debug, serde::Deserialize)]
pub struct SystemLogOverviewQuery {
    pub action: Option<String>,
    pub level: Option<String>,
    pub context: Option<String>,
}

/// GET /systemlog: recent system activity, or a clear/trim action.
pub async fn systemlog_overview_handler(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SystemLogOverviewQuery>,
) -> ApiResult<Response> {
    if let Some(action) = LogAction::from_param(query.action.as_deref()) {
        match action {
            LogAction::Clear => state.system_log_service.clear().await?,
            LogAction::Trim => state.system_log_service.trim().await?,
        }

        set_flash(&session, action.notification(LogCategory::System)).await?;
        return Ok(redirect_found("/systemlog"));
    }

    let filter = SystemLogFilter {
        level: query.level.filter(|value| !value.is_empty()),
        context: query.context.filter(|value| !value.is_empty()),
    };
    let entries = state.system_log_service.recent_activity(filter).await?;
    let notification = take_flash(&session).await?;

    Ok(Json(SystemLogOverviewResponse {
        entries: entries
            .into_iter()
            .map(SystemLogEntryResponse::from)
            .collect(),
        notification,
    })
    .into_response())
}
