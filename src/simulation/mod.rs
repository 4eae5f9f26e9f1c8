//! # Household Energy Simulation
//!
//! Synthesizes the data behind the dashboard. Nothing here talks to hardware;
//! every figure comes from periodic base curves perturbed by bounded noise.
//!
//! ## Components
//!
//! - **HouseIoTSimulator**: device inventory, 24-point hourly profile and the
//!   derived current metrics
//! - **Catalog**: the fixed reference household (11 devices, 5 rooms)
//! - **Profile**: consumption and solar base curves
//! - **Meter**: polled mains voltage/current readings with cumulative energy
//!
//! ## Usage
//!
//! ```rust
//! use home_energy_dashboard::simulation::{HouseIoTSimulator, SimulatorConfig};
//!
//! let mut sim = HouseIoTSimulator::new(SimulatorConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! });
//!
//! let devices = sim.list_devices();
//! let profile = sim.generate_hourly_profile();
//! let metrics = sim.compute_current_metrics(&devices, &profile, 12).unwrap();
//! assert!(metrics.solar_generation_w > 0.0);
//! ```

pub mod catalog;
pub mod meter;
pub mod metrics;
pub mod profile;

pub use catalog::{DeviceTemplate, CATALOG};
pub use meter::{MeterConfig, MeterSimulator, MeterSnapshot};
pub use metrics::{checked_hour, current_metrics, BatteryConfig};

use chrono::{DateTime, Utc};
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    SeedableRng,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::{Validate, ValidationError};

use crate::domain::{
    CurrentMetrics, DeviceInventory, DeviceStatus, HourlyProfilePoint, InvalidHourError,
};

/// Relative weights of the device statuses drawn each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_status_weights"))]
pub struct StatusWeights {
    pub online: u32,
    pub warning: u32,
    pub offline: u32,
}

impl Default for StatusWeights {
    fn default() -> Self {
        Self {
            online: 85,
            warning: 10,
            offline: 5,
        }
    }
}

impl StatusWeights {
    /// Every device online
    pub fn all_online() -> Self {
        Self {
            online: 1,
            warning: 0,
            offline: 0,
        }
    }

    fn entries(&self) -> [(DeviceStatus, u32); 3] {
        [
            (DeviceStatus::Online, self.online),
            (DeviceStatus::Warning, self.warning),
            (DeviceStatus::Offline, self.offline),
        ]
    }
}

fn validate_status_weights(w: &StatusWeights) -> Result<(), ValidationError> {
    if w.online as u64 + w.warning as u64 + w.offline as u64 == 0 {
        return Err(ValidationError::new("status_weights_all_zero"));
    }
    Ok(())
}

/// Generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
    /// Half-width of the multiplicative noise band (0.1 = ±10%)
    #[validate(range(min = 0.0, max = 0.5))]
    pub noise_fraction: f64,
    /// Overnight consumption floor per hour
    #[validate(range(min = 0.0))]
    pub base_load_kwh: f64,
    /// Additional consumption at the morning/evening peaks
    #[validate(range(min = 0.0))]
    pub peak_amplitude_kwh: f64,
    /// Solar generation at solar noon
    #[validate(range(min = 0.0))]
    pub solar_peak_kwh: f64,
    #[validate(nested)]
    pub status_weights: StatusWeights,
    #[validate(nested)]
    pub battery: BatteryConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            noise_fraction: 0.1, // 10% noise
            base_load_kwh: 0.35,
            peak_amplitude_kwh: 1.6,
            solar_peak_kwh: 3.5,
            status_weights: StatusWeights::default(),
            battery: BatteryConfig::default(),
        }
    }
}

/// Generates device inventories and daily energy profiles for a simulated home.
///
/// Each instance owns its random source. Two simulators built from the same
/// seeded config produce identical output for the same sequence of calls.
pub struct HouseIoTSimulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl HouseIoTSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Build a fresh inventory stamped with the current time
    pub fn list_devices(&mut self) -> DeviceInventory {
        self.list_devices_at(Utc::now())
    }

    /// Build a fresh inventory, grouped by room in catalog order
    pub fn list_devices_at(&mut self, now: DateTime<Utc>) -> DeviceInventory {
        let mut inventory = DeviceInventory::new();

        for template in CATALOG.iter() {
            let status = self.pick_status();
            let jitter = profile::noise_factor(&mut self.rng, self.config.noise_fraction);
            let device = template.instantiate(&mut self.rng, status, jitter, now);
            inventory.entry(template.room).or_default().push(device);
        }

        debug!(
            devices = CATALOG.len(),
            rooms = inventory.len(),
            "generated device inventory"
        );
        inventory
    }

    /// Generate the 24 hourly points for a day, ordered by hour
    pub fn generate_hourly_profile(&mut self) -> Vec<HourlyProfilePoint> {
        let profile = profile::build_profile(
            &mut self.rng,
            self.config.base_load_kwh,
            self.config.peak_amplitude_kwh,
            self.config.solar_peak_kwh,
            self.config.noise_fraction,
        );

        debug!(points = profile.len(), "generated hourly profile");
        profile
    }

    /// Derive current metrics for `current_hour` from generated data
    pub fn compute_current_metrics(
        &self,
        devices: &DeviceInventory,
        hourly_profile: &[HourlyProfilePoint],
        current_hour: i64,
    ) -> Result<CurrentMetrics, InvalidHourError> {
        current_metrics(devices, hourly_profile, current_hour, &self.config.battery)
    }

    fn pick_status(&mut self) -> DeviceStatus {
        let entries = self.config.status_weights.entries();
        match WeightedIndex::new(entries.iter().map(|(_, w)| *w)) {
            Ok(dist) => entries[dist.sample(&mut self.rng)].0,
            Err(_) => DeviceStatus::Online,
        }
    }
}
