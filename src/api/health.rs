use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{api::error::ApiError, controller::AppState};

/// A meter reading older than this many poll intervals counts as stale
const STALE_AFTER_POLLS: i64 = 5;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: DateTime<Utc>,
    checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    meter: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_reading_age_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn healthy(age_ms: i64) -> Self {
        Self {
            status: "healthy".to_string(),
            last_reading_age_ms: Some(age_ms),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            last_reading_age_ms: None,
            error: Some(error),
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// The meter is healthy while its poll loop keeps producing fresh readings
fn check_meter(state: &AppState, now: DateTime<Utc>) -> ComponentHealth {
    let latest = state.meter.lock().latest().map(|r| r.timestamp);
    let Some(last) = latest else {
        return ComponentHealth::unhealthy("no meter reading yet".to_string());
    };

    let age_ms = (now - last).num_milliseconds();
    let limit_ms = state.cfg.meter.poll_interval_ms as i64 * STALE_AFTER_POLLS;
    if age_ms > limit_ms {
        ComponentHealth::unhealthy(format!("last meter reading is {} ms old", age_ms))
    } else {
        ComponentHealth::healthy(age_ms)
    }
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let meter = check_meter(&state, Utc::now());
    let healthy = meter.is_healthy();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        timestamp: Utc::now(),
        checks: HealthChecks { meter },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(healthy, "Health check completed");
    (status_code, Json(response))
}

/// GET /health/ready - Ready once the meter has produced a reading
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    match state.meter.lock().latest() {
        Some(_) => Ok(StatusCode::OK),
        None => Err(ApiError::ServiceUnavailable("no meter reading yet".to_string())),
    }
}

/// GET /health/live - Liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
