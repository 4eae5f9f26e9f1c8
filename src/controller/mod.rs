use chrono::Utc;
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{LoadStatus, VoltageStatus};
use crate::simulation::{HouseIoTSimulator, MeterSimulator, MeterSnapshot};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub meter: Arc<Mutex<MeterSimulator>>,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        let meter = MeterSimulator::new(cfg.meter.clone());
        Self {
            cfg: Arc::new(cfg),
            meter: Arc::new(Mutex::new(meter)),
        }
    }

    /// A generator of its own for one request; nothing is shared between refreshes
    pub fn simulator(&self) -> HouseIoTSimulator {
        HouseIoTSimulator::new(self.cfg.simulation.clone())
    }

    pub fn meter_snapshot(&self) -> MeterSnapshot {
        self.meter.lock().snapshot()
    }

    /// Take one meter reading now, logging threshold breaches
    pub fn poll_meter(&self) {
        let (reading, diagnostics) = {
            let mut meter = self.meter.lock();
            let reading = meter.poll(Utc::now());
            (reading, meter.diagnostics())
        };

        debug!(
            voltage_v = reading.voltage_v,
            current_a = reading.current_a,
            power_w = reading.power_w,
            energy_kwh = reading.energy_kwh,
            "meter polled"
        );

        if !self.cfg.meter.demo_mode {
            return;
        }
        if let Some(d) = diagnostics {
            if d.voltage_status == VoltageStatus::Warn {
                warn!(voltage_v = reading.voltage_v, "mains voltage outside stable band");
            }
            if d.load_status == LoadStatus::Overload {
                warn!(current_a = reading.current_a, "load current above overload threshold");
            }
        }
    }

    /// Poll the meter forever at the configured rate
    pub async fn run_meter(&self) {
        let period = Duration::from_millis(self.cfg.meter.poll_interval_ms.max(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.poll_meter();
        }
    }
}

pub fn spawn_controller_tasks(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move { state.run_meter().await })
}
