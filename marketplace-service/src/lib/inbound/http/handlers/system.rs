use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn ping() -> ApiSuccess<PingData> {
    ApiSuccess::new(StatusCode::OK, PingData { status: "ok" })
}

/// Database state is probed on every call; a failing probe degrades, never errors.
pub async fn health(State(state): State<AppState>) -> ApiSuccess<HealthData> {
    let database_ok = state.health_probe.database_ok().await;

    ApiSuccess::new(
        StatusCode::OK,
        HealthData {
            app: state.app_name.to_string(),
            status: if database_ok { "healthy" } else { "degraded" },
            database: if database_ok { "ok" } else { "error" },
        },
    )
}

pub async fn info(State(state): State<AppState>) -> ApiSuccess<InfoData> {
    ApiSuccess::new(
        StatusCode::OK,
        InfoData {
            app_name: state.app_name.to_string(),
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingData {
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub app: String,
    pub status: &'static str,
    pub database: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoData {
    pub app_name: String,
    pub version: &'static str,
}
