use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Requested hour is not a valid hour of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid hour {hour}: must be within 0..=23")]
pub struct InvalidHourError {
    pub hour: i64,
}

/// Direction of power flow at the grid connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GridFlow {
    Importing,
    Exporting,
    Balanced,
}

impl GridFlow {
    /// Positive grid power is import, negative is export
    pub fn from_grid_power_w(grid_power_w: f64) -> Self {
        if grid_power_w > 0.0 {
            GridFlow::Importing
        } else if grid_power_w < 0.0 {
            GridFlow::Exporting
        } else {
            GridFlow::Balanced
        }
    }
}

/// Instantaneous household metrics for one hour of the profile.
///
/// `house_consumption_w` is the aggregate estimate taken from the hourly
/// profile. `device_breakdown_w` is the sum over the device list. The two are
/// generated independently and are not expected to match; the difference is
/// exposed as `breakdown_discrepancy_w`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentMetrics {
    pub hour: u8,
    pub house_consumption_w: f64,
    pub device_breakdown_w: f64,
    pub breakdown_discrepancy_w: f64,
    pub solar_generation_w: f64,
    /// Positive when importing, negative when exporting
    pub grid_power_w: f64,
    pub grid_flow: GridFlow,
    pub battery_level_pct: f64,
    pub battery_charging: bool,
    pub net_efficiency_pct: f64,
}
