use axum::{routing::get, Router};

use crate::{
    api::{dashboard, devices, meter},
    controller::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/devices", get(devices::list_devices))
        .route("/devices/:id", get(devices::get_device))
        .route("/profile", get(dashboard::get_profile))
        .route("/metrics", get(dashboard::get_metrics))
        .route("/meter", get(meter::get_meter))
        .with_state(state)
}
