//! # Mains Meter Simulation
//!
//! Emulates a smart meter polled at a fixed rate. Each poll draws a voltage and
//! a load current, derives active power from a fixed power factor and
//! integrates it into a cumulative energy counter that persists for the life
//! of the simulator.

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use validator::Validate;

use crate::domain::{LoadStatus, MeterDiagnostics, MeterReading, VoltageStatus};

/// Nominal mains voltage and its standard deviation
pub const NOMINAL_VOLTAGE_V: f64 = 230.0;
pub const VOLTAGE_STD_DEV_V: f64 = 5.0;
/// Floor applied to simulated voltage (brown-out level)
pub const MIN_VOLTAGE_V: f64 = 180.0;

/// Mean household load current and its standard deviation
pub const NOMINAL_CURRENT_A: f64 = 5.0;
pub const CURRENT_STD_DEV_A: f64 = 2.0;
pub const MIN_CURRENT_A: f64 = 0.1;

pub const POWER_FACTOR: f64 = 0.92;
pub const GRID_FREQUENCY_HZ: f64 = 50.02;
pub const SENSOR_TEMPERATURE_C: f64 = 34.0;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MeterConfig {
    /// Produce simulated readings; when false every reading is zero
    pub demo_mode: bool,
    #[validate(range(min = 100, max = 5000))]
    pub poll_interval_ms: u64,
    /// Price per kWh in local currency
    #[validate(range(min = 0.0))]
    pub tariff_per_kwh: f64,
    /// Counter value at startup
    #[validate(range(min = 0.0))]
    pub initial_energy_kwh: f64,
    /// Number of readings kept for the live chart
    #[validate(range(min = 1))]
    pub history_len: usize,
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            demo_mode: true,
            poll_interval_ms: 1000,
            tariff_per_kwh: 7.5,
            initial_energy_kwh: 450.0,
            history_len: 50,
            random_seed: None,
        }
    }
}

/// Everything the live panel shows, cloned out of the simulator
#[derive(Debug, Clone, Serialize)]
pub struct MeterSnapshot {
    pub reading: Option<MeterReading>,
    pub energy_kwh: f64,
    pub cost: f64,
    pub tariff_per_kwh: f64,
    pub diagnostics: Option<MeterDiagnostics>,
    pub history: Vec<MeterReading>,
}

pub struct MeterSimulator {
    config: MeterConfig,
    rng: StdRng,
    energy_kwh: f64,
    history: VecDeque<MeterReading>,
}

impl MeterSimulator {
    pub fn new(config: MeterConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            energy_kwh: config.initial_energy_kwh,
            history: VecDeque::with_capacity(config.history_len),
            config,
            rng,
        }
    }

    /// Take one reading at `now` and fold it into the energy counter
    pub fn poll(&mut self, now: DateTime<Utc>) -> MeterReading {
        let (voltage_v, current_a) = if self.config.demo_mode {
            (
                self.sample(NOMINAL_VOLTAGE_V, VOLTAGE_STD_DEV_V).max(MIN_VOLTAGE_V),
                self.sample(NOMINAL_CURRENT_A, CURRENT_STD_DEV_A).max(MIN_CURRENT_A),
            )
        } else {
            (0.0, 0.0)
        };

        let power_w = voltage_v * current_a * POWER_FACTOR;
        let interval_hours = self.config.poll_interval_ms as f64 / 1000.0 / 3600.0;
        self.energy_kwh += power_w / 1000.0 * interval_hours;

        let reading = MeterReading {
            timestamp: now,
            voltage_v,
            current_a,
            power_w,
            energy_kwh: self.energy_kwh,
        };

        while self.history.len() >= self.config.history_len.max(1) {
            self.history.pop_front();
        }
        self.history.push_back(reading);

        reading
    }

    pub fn latest(&self) -> Option<&MeterReading> {
        self.history.back()
    }

    pub fn history(&self) -> impl Iterator<Item = &MeterReading> {
        self.history.iter()
    }

    pub fn energy_kwh(&self) -> f64 {
        self.energy_kwh
    }

    pub fn cost(&self) -> f64 {
        self.energy_kwh * self.config.tariff_per_kwh
    }

    /// Threshold checks on the latest reading
    pub fn diagnostics(&self) -> Option<MeterDiagnostics> {
        self.latest().map(|r| MeterDiagnostics {
            grid_frequency_hz: GRID_FREQUENCY_HZ,
            power_factor: POWER_FACTOR,
            voltage_status: VoltageStatus::classify(r.voltage_v),
            load_status: LoadStatus::classify(r.current_a),
            sensor_temperature_c: SENSOR_TEMPERATURE_C,
            last_sync: r.timestamp,
        })
    }

    pub fn snapshot(&self) -> MeterSnapshot {
        MeterSnapshot {
            reading: self.latest().copied(),
            energy_kwh: self.energy_kwh,
            cost: self.cost(),
            tariff_per_kwh: self.config.tariff_per_kwh,
            diagnostics: self.diagnostics(),
            history: self.history.iter().copied().collect(),
        }
    }

    fn sample(&mut self, mean: f64, std_dev: f64) -> f64 {
        Normal::new(mean, std_dev)
            .map(|normal| normal.sample(&mut self.rng))
            .unwrap_or(mean)
    }
}
