use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tower_sessions::Session;

use annalist_core::AppError;

use crate::dto::HealthResponse;
use crate::error::ApiResult;

pub mod changelog;
pub mod systemlog;

/// Session key holding the one-shot notification shown after clear/trim.
const FLASH_KEY: &str = "log.flash";

/// Stores a one-shot notification for the next overview render.
pub(crate) async fn set_flash(session: &Session, message: String) -> ApiResult<()> {
    session.insert(FLASH_KEY, message).await.map_err(|error| {
        AppError::Internal(format!("failed to store flash message: {error}")).into()
    })
}

/// Takes and clears the pending notification, if any.
pub(crate) async fn take_flash(session: &Session) -> ApiResult<Option<String>> {
    session.remove::<String>(FLASH_KEY).await.map_err(|error| {
        AppError::Internal(format!("failed to read flash message: {error}")).into()
    })
}

/// Post-action redirect back to an overview route.
///
/// 302 Found on purpose: the panel's existing frontend follows the exact
/// status the original backend produced.
pub(crate) fn redirect_found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_owned())],
    )
        .into_response()
}

/// Liveness probe.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
