use axum::{extract::State, Json};

use crate::{
    api::{error::ApiError, response::ApiResponse},
    controller::AppState,
    simulation::MeterSnapshot,
};

/// GET /api/v1/meter - Latest mains reading, running cost and rolling history
pub async fn get_meter(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MeterSnapshot>>, ApiError> {
    let snapshot = state.meter_snapshot();
    let count = snapshot.history.len();

    Ok(Json(ApiResponse::success(snapshot).with_count(count)))
}
