use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use annalist_core::AppError;

use crate::handlers;
use crate::state::AppState;

#[cfg(test)]
mod tests;

/// Builds the admin log router.
///
/// All log routes are GET, including the clear/trim actions carried by the
/// `action` query flag; the URL surface is wire-compatible with the panel's
/// previous backend. `/changelog` resolves to the overview, so the
/// all-content-types listing scope is reached through the service layer
/// rather than a URL of its own, matching the original route precedence.
pub fn build_router<Store>(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<Store>,
) -> Result<Router, AppError>
where
    Store: SessionStore + Clone,
{
    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/changelog",
            get(handlers::changelog::changelog_overview_handler),
        )
        .route(
            "/changelog/{contenttype}",
            get(handlers::changelog::change_record_type_listing_handler),
        )
        .route(
            "/changelog/{contenttype}/{contentid}",
            get(handlers::changelog::change_record_listing_handler),
        )
        .route(
            "/changelog/{contenttype}/{contentid}/{id}",
            get(handlers::changelog::change_record_single_handler),
        )
        .route(
            "/systemlog",
            get(handlers::systemlog::systemlog_overview_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
