use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Lower/upper bound (exclusive) of the stable mains voltage band
pub const VOLTAGE_STABLE_MIN_V: f64 = 200.0;
pub const VOLTAGE_STABLE_MAX_V: f64 = 250.0;

/// Load current at or above which the circuit is considered overloaded
pub const OVERLOAD_CURRENT_A: f64 = 15.0;

/// A single poll of the household mains meter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    pub timestamp: DateTime<Utc>,
    pub voltage_v: f64,
    pub current_a: f64,
    pub power_w: f64,
    /// Cumulative energy since the meter was started
    pub energy_kwh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VoltageStatus {
    Stable,
    Warn,
}

impl VoltageStatus {
    pub fn classify(voltage_v: f64) -> Self {
        if voltage_v > VOLTAGE_STABLE_MIN_V && voltage_v < VOLTAGE_STABLE_MAX_V {
            VoltageStatus::Stable
        } else {
            VoltageStatus::Warn
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadStatus {
    Nominal,
    Overload,
}

impl LoadStatus {
    pub fn classify(current_a: f64) -> Self {
        if current_a < OVERLOAD_CURRENT_A {
            LoadStatus::Nominal
        } else {
            LoadStatus::Overload
        }
    }
}

/// Diagnostic panel derived from the latest reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeterDiagnostics {
    pub grid_frequency_hz: f64,
    pub power_factor: f64,
    pub voltage_status: VoltageStatus,
    pub load_status: LoadStatus,
    pub sensor_temperature_c: f64,
    pub last_sync: DateTime<Utc>,
}
