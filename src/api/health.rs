//! Service status and Kubernetes probe endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

/// GET / banner
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub environment: String,
    pub version: &'static str,
}

/// Health response with optional component status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthCheck {
    fn healthy(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            status: HealthStatus::Healthy,
            message: Some(message.into()),
        }
    }

    fn failing(name: &'static str, status: HealthStatus, message: impl Into<String>) -> Self {
        Self {
            name,
            status,
            message: Some(message.into()),
        }
    }
}

pub async fn root(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        environment: state.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Returns 200 whenever the process is serving
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: HealthStatus::Healthy,
            version: env!("CARGO_PKG_VERSION"),
            checks: None,
            latency_ms: None,
        }),
    )
}

pub async fn live_check() -> StatusCode {
    StatusCode::OK
}

/// Readiness: providers configured, vector store reachable
///
/// A missing embedding provider only degrades the service; an unreachable
/// vector store or no completion provider at all makes it unready.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let checks = vec![
        check_completion_providers(&state),
        check_embedding_providers(&state),
        check_vector_store(&state).await,
        HealthCheck::healthy("auth", state.auth_provider.provider_name()),
    ];

    let status = overall_status(&checks);
    let status_code = match status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: Some(checks),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        }),
    )
}

fn overall_status(checks: &[HealthCheck]) -> HealthStatus {
    if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
        HealthStatus::Unhealthy
    } else if checks.iter().any(|c| c.status == HealthStatus::Degraded) {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}

fn provider_list(names: &[crate::domain::ProviderName]) -> String {
    names.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(",")
}

fn check_completion_providers(state: &AppState) -> HealthCheck {
    let configured = state.registry.configured_completion_providers();

    if configured.is_empty() {
        HealthCheck::failing("completion_providers", HealthStatus::Unhealthy, "none configured")
    } else {
        HealthCheck::healthy("completion_providers", provider_list(&configured))
    }
}

fn check_embedding_providers(state: &AppState) -> HealthCheck {
    let configured = state.registry.configured_embedding_providers();

    if configured.is_empty() {
        HealthCheck::failing("embedding_providers", HealthStatus::Degraded, "none configured")
    } else {
        HealthCheck::healthy("embedding_providers", provider_list(&configured))
    }
}

async fn check_vector_store(state: &AppState) -> HealthCheck {
    let store = &state.vector_store;

    match store.health_check().await {
        Ok(true) => HealthCheck::healthy("vector_store", store.store_type()),
        Ok(false) => HealthCheck::failing("vector_store", HealthStatus::Unhealthy, "unreachable"),
        Err(e) => HealthCheck::failing("vector_store", HealthStatus::Unhealthy, e.to_string()),
    }
}
