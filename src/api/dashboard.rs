use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{
    api::{devices::DeviceSummary, error::ApiError, response::ApiResponse},
    controller::AppState,
    domain::{CurrentMetrics, DeviceInventory, HourlyProfilePoint, ProfileSummary},
    simulation::MeterSnapshot,
};

/// Hour of day on the server's wall clock
pub fn wall_clock_hour() -> i64 {
    Local::now().hour() as i64
}

#[derive(Debug, Deserialize)]
pub struct HourQuery {
    /// Hour to evaluate; defaults to the current wall-clock hour
    pub hour: Option<i64>,
}

/// One complete dashboard refresh
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub generated_at: DateTime<Utc>,
    pub current_hour: i64,
    pub metrics: CurrentMetrics,
    pub devices: DeviceInventory,
    pub device_summary: DeviceSummary,
    pub profile: Vec<HourlyProfilePoint>,
    pub profile_summary: ProfileSummary,
    pub meter: MeterSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub current_hour: i64,
    pub points: Vec<HourlyProfilePoint>,
    pub summary: ProfileSummary,
}

/// GET /api/v1/dashboard - Regenerate everything the dashboard shows
pub async fn get_dashboard(
    State(state): State<AppState>,
    query: Result<Query<HourQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let start = Instant::now();
    let Query(q) = query?;
    let current_hour = q.hour.unwrap_or_else(wall_clock_hour);

    let mut sim = state.simulator();
    let devices = sim.list_devices();
    let profile = sim.generate_hourly_profile();
    let metrics = sim.compute_current_metrics(&devices, &profile, current_hour)?;

    let response = DashboardResponse {
        generated_at: Utc::now(),
        current_hour,
        metrics,
        device_summary: DeviceSummary::from_inventory(&devices),
        devices,
        profile_summary: ProfileSummary::from_points(&profile),
        profile,
        meter: state.meter_snapshot(),
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        hour = current_hour,
        grid_power_w = metrics.grid_power_w,
        duration_ms,
        "dashboard refreshed"
    );

    Ok(Json(
        ApiResponse::success(response)
            .with_duration(duration_ms)
            .with_seed(sim.config().random_seed),
    ))
}

/// GET /api/v1/profile - 24-point hourly consumption/solar profile
pub async fn get_profile(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let mut sim = state.simulator();
    let points = sim.generate_hourly_profile();
    let count = points.len();

    let response = ProfileResponse {
        current_hour: wall_clock_hour(),
        summary: ProfileSummary::from_points(&points),
        points,
    };

    Ok(Json(
        ApiResponse::success(response)
            .with_count(count)
            .with_seed(sim.config().random_seed),
    ))
}

/// GET /api/v1/metrics?hour=N - Current metrics for one hour
pub async fn get_metrics(
    State(state): State<AppState>,
    query: Result<Query<HourQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<CurrentMetrics>>, ApiError> {
    let Query(q) = query?;
    let hour = q.hour.unwrap_or_else(wall_clock_hour);

    let mut sim = state.simulator();
    let devices = sim.list_devices();
    let profile = sim.generate_hourly_profile();
    let metrics = sim.compute_current_metrics(&devices, &profile, hour)?;

    Ok(Json(
        ApiResponse::success(metrics).with_seed(sim.config().random_seed),
    ))
}
