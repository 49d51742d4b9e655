//! Annalist admin log API composition root.

#![forbid(unsafe_code)]

mod api_router;
mod dto;
mod error;
mod handlers;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use annalist_application::{ChangeLogService, SystemLogService};
use annalist_core::{AppError, AppResult};
use annalist_domain::ContentTypeDefinition;
use annalist_infrastructure::{
    ConfigContentTypeRegistry, PostgresChangeLogRepository, PostgresContentRepository,
    PostgresSystemLogRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    let database_url = required_env("DATABASE_URL")?;
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .unwrap_or_else(|_| "false".to_owned())
        .eq_ignore_ascii_case("true");

    let log_retained_entries = env::var("LOG_RETAINED_ENTRIES")
        .ok()
        .map(|value| {
            value.parse::<u32>().map_err(|error| {
                AppError::Validation(format!("invalid LOG_RETAINED_ENTRIES: {error}"))
            })
        })
        .transpose()?;

    let content_types = load_content_types()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let session_store = PostgresStore::new(pool.clone())
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;
    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let change_log_repository = Arc::new(match log_retained_entries {
        Some(retained) => PostgresChangeLogRepository::with_retention(pool.clone(), retained),
        None => PostgresChangeLogRepository::new(pool.clone()),
    });
    let system_log_repository = Arc::new(match log_retained_entries {
        Some(retained) => PostgresSystemLogRepository::with_retention(pool.clone(), retained),
        None => PostgresSystemLogRepository::new(pool.clone()),
    });
    let content_repository = Arc::new(PostgresContentRepository::new(pool.clone()));
    let content_type_registry = Arc::new(ConfigContentTypeRegistry::new(content_types));

    let app_state = AppState {
        change_log_service: ChangeLogService::new(
            change_log_repository,
            content_type_registry,
            content_repository,
        ),
        system_log_service: SystemLogService::new(system_log_repository),
    };

    let app = api_router::build_router(app_state, &frontend_url, session_layer)?;

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Validation(format!("invalid API_HOST: {error}")))?;
    let address = SocketAddr::new(host, api_port);

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "annalist-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

/// Loads content-type definitions from the file named by
/// CONTENT_TYPES_FILE. Content types are configuration; without the file
/// the registry starts empty and every typed listing is a 404.
fn load_content_types() -> AppResult<Vec<ContentTypeDefinition>> {
    let Ok(path) = env::var("CONTENT_TYPES_FILE") else {
        info!("CONTENT_TYPES_FILE not set, starting with an empty content type registry");
        return Ok(Vec::new());
    };

    let raw = std::fs::read_to_string(&path)
        .map_err(|error| AppError::Validation(format!("failed to read {path}: {error}")))?;
    let parsed: Vec<ContentTypeDefinition> = serde_json::from_str(&raw)
        .map_err(|error| AppError::Validation(format!("invalid content types in {path}: {error}")))?;

    parsed
        .into_iter()
        .map(|definition| {
            ContentTypeDefinition::new(
                definition.slug,
                definition.singular_name,
                definition.plural_name,
            )
        })
        .collect()
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
