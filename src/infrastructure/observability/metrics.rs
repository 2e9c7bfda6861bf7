//! Prometheus recorder, scrape route and the gateway's counters

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MetricsConfig;
use crate::domain::UsageStats;

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").expect("valid regex")
});

static NUMERIC_SEGMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d+(/|$)").expect("valid regex"));

const MAX_PATH_LABEL_LEN: usize = 50;

/// Cloneable handle to the installed Prometheus recorder
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Text exposition of every recorded series
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Installs the global recorder. Returns `None` when disabled or when a
/// recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("metrics export is turned off");
        return None;
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .inspect_err(|e| tracing::error!(error = %e, "could not install prometheus recorder"))
        .ok()?;

    gauge!("gateway_build_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
    tracing::info!(path = %config.path, "prometheus scrape route registered");

    Some(PrometheusMetrics {
        handle: Arc::new(handle),
    })
}

/// Router exposing the scrape endpoint at `path`
pub fn create_metrics_router<S>(metrics: PrometheusMetrics, path: &str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(path, get(scrape))
        .with_state(metrics)
}

async fn scrape(State(exporter): State<PrometheusMetrics>) -> impl IntoResponse {
    exporter.render()
}

/// Counts one served HTTP request and observes its latency
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_owned()),
        ("route", path_label(path)),
        ("status", status.to_string()),
    ];

    counter!("gateway_http_requests_total", &labels).increment(1);
    histogram!("gateway_http_request_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("gateway_http_failures_total", &labels).increment(1);
    }
}

/// One completed (or failed) call to an upstream model provider
pub struct ProviderRequestMetric<'a> {
    pub provider: &'a str,
    pub model: &'a str,
    /// `completion` or `embedding`
    pub operation: &'static str,
    pub duration: Duration,
    pub usage: Option<UsageStats>,
}

/// Record a provider request metric; `usage` is `None` for failed calls
pub fn record_provider_request(call: ProviderRequestMetric<'_>) {
    let outcome = if call.usage.is_some() { "ok" } else { "error" };
    let labels = [
        ("provider", call.provider.to_owned()),
        ("model", call.model.to_owned()),
        ("operation", call.operation.to_owned()),
        ("outcome", outcome.to_owned()),
    ];

    counter!("provider_requests_total", &labels).increment(1);
    histogram!("provider_request_seconds", &labels).record(call.duration.as_secs_f64());

    match call.usage {
        Some(usage) => {
            counter!("provider_prompt_units_total", &labels).increment(u64::from(usage.prompt_units));
            counter!("provider_completion_units_total", &labels)
                .increment(u64::from(usage.completion_units));
        }
        None => counter!("provider_errors_total", &labels).increment(1),
    }
}

/// Collapses ids in a path and caps its length for use as a label
fn path_label(path: &str) -> String {
    let collapsed = UUID_PATTERN.replace_all(path, "{id}");
    let collapsed = NUMERIC_SEGMENT_PATTERN.replace_all(&collapsed, "/{id}$1");

    collapsed.chars().take(MAX_PATH_LABEL_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_label_collapses_uuid() {
        let path = "/api/vectordb/documents/550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(path_label(path), "/api/vectordb/documents/{id}");
    }

    #[test]
    fn test_path_label_collapses_numeric_segment() {
        assert_eq!(path_label("/api/vectordb/7/search"), "/api/vectordb/{id}/search");
    }

    #[test]
    fn test_path_label_keeps_static_routes() {
        assert_eq!(path_label("/api/llm/generate"), "/api/llm/generate");
    }

    #[test]
    fn test_path_label_is_capped() {
        let path = "/api/vectordb/documents/search/with/a/route/that/keeps/going/and/going";
        assert_eq!(path_label(path).chars().count(), MAX_PATH_LABEL_LEN);
    }

    #[test]
    fn test_recording_without_recorder_is_a_no_op() {
        record_http_request("GET", "/health", 200, Duration::from_millis(3));
        record_provider_request(ProviderRequestMetric {
            provider: "openai",
            model: "gpt-4o",
            operation: "completion",
            duration: Duration::from_millis(120),
            usage: Some(UsageStats::new(3, 1)),
        });
    }
}
