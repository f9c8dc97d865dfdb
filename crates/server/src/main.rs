use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ApiError, ApiException, ErrorCode},
    protocol::{RunScriptRequest, RunScriptResponse, StatusResponse},
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

mod api;
mod app_state;
mod config;
mod runner;

use api::{run_script, run_script_route, ApiContext};
use app_state::AppState;
use config::{load_settings, prepare_script_path, script_exists};
use runner::ProcessScriptRunner;

const MAX_REQUEST_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let script_path = prepare_script_path(&settings.script_path)?;
    if !script_exists(&script_path) {
        warn!(
            script = %script_path.display(),
            "downloader script not found; requests will fail until it is in place"
        );
    }

    let runner = ProcessScriptRunner {
        interpreter: settings.script_interpreter.clone(),
        script_path,
        timeout: settings.script_timeout(),
    };
    let state = AppState {
        api: ApiContext {
            runner: Arc::new(runner),
        },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "script runner listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route(run_script_route(), post(http_run_script))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<StatusResponse> {
    Json(api::status())
}

async fn http_run_script(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RunScriptRequest>, JsonRejection>,
) -> Result<Json<RunScriptResponse>, (StatusCode, Json<ApiError>)> {
    let Json(request) = payload.map_err(|rejection| {
        (
            rejection.status(),
            Json(ApiError::new(rejection.body_text())),
        )
    })?;

    run_script(&state.api, &request)
        .await
        .map(Json)
        .map_err(error_response)
}

fn error_response(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::ScriptLaunch | ErrorCode::ScriptTimeout => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err.into()))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
