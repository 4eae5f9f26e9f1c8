use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    controller::AppState,
    domain::{all_devices, Device, DeviceInventory, DeviceStatus},
};

/// Device counts by status plus the draw of everything not offline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub total: usize,
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
    pub total_power_w: f64,
}

impl DeviceSummary {
    pub fn from_inventory(inventory: &DeviceInventory) -> Self {
        let mut summary = DeviceSummary {
            total: 0,
            online: 0,
            warning: 0,
            offline: 0,
            total_power_w: 0.0,
        };

        for device in all_devices(inventory) {
            summary.total += 1;
            match device.status {
                DeviceStatus::Online => summary.online += 1,
                DeviceStatus::Warning => summary.warning += 1,
                DeviceStatus::Offline => summary.offline += 1,
            }
            summary.total_power_w += device.effective_power_w();
        }

        summary
    }
}

/// Device list response
#[derive(Debug, Serialize)]
pub struct DeviceListResponse {
    rooms: DeviceInventory,
    summary: DeviceSummary,
}

/// GET /api/v1/devices - Freshly generated inventory grouped by room
pub async fn list_devices(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DeviceListResponse>>, ApiError> {
    let mut sim = state.simulator();
    let rooms = sim.list_devices();
    let summary = DeviceSummary::from_inventory(&rooms);

    Ok(Json(
        ApiResponse::success(DeviceListResponse { rooms, summary })
            .with_count(summary.total)
            .with_seed(sim.config().random_seed),
    ))
}

/// GET /api/v1/devices/:id - One device from a freshly generated inventory
pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Device>>, ApiError> {
    let mut sim = state.simulator();
    let inventory = sim.list_devices();

    let device = all_devices(&inventory)
        .find(|d| d.id == id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Device with ID {} not found", id)))?;

    Ok(Json(ApiResponse::success(device)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{HouseIoTSimulator, SimulatorConfig, StatusWeights};

    #[test]
    fn test_summary_counts() {
        let mut sim = HouseIoTSimulator::new(SimulatorConfig {
            random_seed: Some(21),
            ..Default::default()
        });
        let inventory = sim.list_devices();
        let summary = DeviceSummary::from_inventory(&inventory);

        assert_eq!(summary.total, 11);
        assert_eq!(summary.online + summary.warning + summary.offline, 11);
    }

    #[test]
    fn test_summary_power_ignores_offline() {
        let mut sim = HouseIoTSimulator::new(SimulatorConfig {
            random_seed: Some(21),
            status_weights: StatusWeights {
                online: 0,
                warning: 0,
                offline: 1,
            },
            ..Default::default()
        });
        let summary = DeviceSummary::from_inventory(&sim.list_devices());

        assert_eq!(summary.offline, 11);
        assert_eq!(summary.total_power_w, 0.0);
    }
}
