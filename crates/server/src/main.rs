use std::{any::Any, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use mail_relay::{HttpMailRelay, RelayConfig};
use server_api::{submit_contact, ApiContext};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        contact_route, health_route, ContactAccepted, ContactPayload, ErrorBody, HealthResponse,
    },
};
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

const SHUTDOWN_GRACE: Duration = Duration::from_millis(10_000);
const GENERIC_SERVER_ERROR: &str = "Something went wrong!";
const NOT_FOUND_PAGE: &str = include_str!("../static/404.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings().context("invalid server configuration")?;
    let relay = HttpMailRelay::new(RelayConfig {
        endpoint: settings.relay_url.clone(),
        timeout: settings.relay_timeout,
    })?;
    let relay_endpoint = relay.endpoint().clone();
    let state = AppState {
        api: ApiContext::new(Arc::new(relay)),
        environment: settings.environment,
        static_dir: settings.static_dir.clone(),
        body_limit_bytes: settings.body_limit_bytes,
    };
    let app = build_router(Arc::new(state));

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        %addr,
        environment = ?settings.environment,
        static_dir = %settings.static_dir.display(),
        relay = %relay_endpoint,
        "server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(SHUTDOWN_GRACE))
        .await?;
    info!("server stopped");
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());
    let expose_detail = state.environment.is_development();
    let body_limit = state.body_limit_bytes;

    Router::new()
        .route(health_route(), get(health).fallback(not_found))
        .route(contact_route(), post(contact).fallback(not_found))
        .fallback_service(static_files)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| panic_response(panic, expose_detail),
        ))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

async fn contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<ContactAccepted>, (StatusCode, Json<ErrorBody>)> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(%rejection, "contact body exceeds limit");
            return Err((
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorBody {
                    error: "Request body too large".to_string(),
                }),
            ));
        }
        Err(rejection) => {
            warn!(%rejection, "unreadable contact body");
            ContactPayload::default()
        }
    };

    submit_contact(&state.api, payload)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MissingFields | ErrorCode::InvalidEmail => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::NetworkError | ErrorCode::RelayFailure | ErrorCode::ServerError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(err: ApiError) -> (StatusCode, Json<ErrorBody>) {
    (status_for(err.code), Json(ErrorBody { error: err.message }))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, expose_detail: bool) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        Some(s.clone())
    } else {
        panic.downcast_ref::<&str>().map(|s| s.to_string())
    };
    error!(
        detail = detail.as_deref().unwrap_or("<non-string panic payload>"),
        "request handler panicked"
    );

    let message = match detail {
        Some(detail) if expose_detail => detail,
        _ => GENERIC_SERVER_ERROR.to_string(),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { error: message }),
    )
        .into_response()
}

/// Resolves on Ctrl+C or SIGTERM, then arms a timer that terminates the
/// process if draining in-flight requests takes longer than `grace`.
async fn shutdown_signal(grace: Duration) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, draining connections"),
        _ = terminate => info!("received SIGTERM, draining connections"),
    }

    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        error!(
            grace_ms = grace.as_millis() as u64,
            "connections still open after shutdown grace period, forcing exit"
        );
        std::process::exit(1);
    });
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
