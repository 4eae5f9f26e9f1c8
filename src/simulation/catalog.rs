//! Fixed device catalog and per-kind attribute generation.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::domain::{
    Device, DeviceAttributes, DeviceKind, DeviceStatus, DishwasherCycle, HvacMode, Room,
};

/// Static description of a catalog device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: DeviceKind,
    pub room: Room,
    pub rated_power_w: f64,
}

/// Reference household: 11 devices across 5 rooms
pub const CATALOG: [DeviceTemplate; 11] = [
    DeviceTemplate {
        id: "lr-tv-01",
        name: "Smart TV",
        kind: DeviceKind::Television,
        room: Room::LivingRoom,
        rated_power_w: 120.0,
    },
    DeviceTemplate {
        id: "lr-thermo-01",
        name: "Smart Thermostat",
        kind: DeviceKind::Thermostat,
        room: Room::LivingRoom,
        rated_power_w: 5.0,
    },
    DeviceTemplate {
        id: "lr-light-01",
        name: "Ceiling Lights",
        kind: DeviceKind::Lighting,
        room: Room::LivingRoom,
        rated_power_w: 60.0,
    },
    DeviceTemplate {
        id: "kt-fridge-01",
        name: "Refrigerator",
        kind: DeviceKind::Refrigerator,
        room: Room::Kitchen,
        rated_power_w: 150.0,
    },
    DeviceTemplate {
        id: "kt-dish-01",
        name: "Dishwasher",
        kind: DeviceKind::Dishwasher,
        room: Room::Kitchen,
        rated_power_w: 1800.0,
    },
    DeviceTemplate {
        id: "bd-ac-01",
        name: "Air Conditioner",
        kind: DeviceKind::AirConditioner,
        room: Room::Bedroom,
        rated_power_w: 1200.0,
    },
    DeviceTemplate {
        id: "bd-lamp-01",
        name: "Bedside Lamp",
        kind: DeviceKind::Lamp,
        room: Room::Bedroom,
        rated_power_w: 10.0,
    },
    DeviceTemplate {
        id: "ss-inv-01",
        name: "Solar Inverter",
        kind: DeviceKind::SolarInverter,
        room: Room::SolarSystem,
        rated_power_w: 25.0,
    },
    DeviceTemplate {
        id: "ss-bat-01",
        name: "Home Battery",
        kind: DeviceKind::HomeBattery,
        room: Room::SolarSystem,
        rated_power_w: 15.0,
    },
    DeviceTemplate {
        id: "ut-heater-01",
        name: "Water Heater",
        kind: DeviceKind::WaterHeater,
        room: Room::Utility,
        rated_power_w: 2000.0,
    },
    DeviceTemplate {
        id: "ut-ev-01",
        name: "EV Charger",
        kind: DeviceKind::EvCharger,
        room: Room::Utility,
        rated_power_w: 7400.0,
    },
];

/// Largest offset subtracted from `now` for devices that are not online
pub const MAX_LAST_SEEN_OFFSET_MINUTES: i64 = 30;

impl DeviceTemplate {
    /// Instantiate this template for one generation cycle
    pub fn instantiate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        status: DeviceStatus,
        power_factor: f64,
        now: DateTime<Utc>,
    ) -> Device {
        let power_consumption_watts = match status {
            DeviceStatus::Offline => 0.0,
            _ => (self.rated_power_w * power_factor).max(0.0),
        };

        let last_seen = match status {
            DeviceStatus::Online => now,
            _ => now - Duration::minutes(rng.gen_range(1..=MAX_LAST_SEEN_OFFSET_MINUTES)),
        };

        Device {
            id: self.id.to_string(),
            name: self.name.to_string(),
            kind: self.kind,
            room: self.room,
            rated_power_w: self.rated_power_w,
            power_consumption_watts,
            status,
            last_seen,
            attributes: random_attributes(self.kind, rng),
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Plausible readings for a device of the given kind
pub fn random_attributes<R: Rng + ?Sized>(kind: DeviceKind, rng: &mut R) -> DeviceAttributes {
    match kind {
        DeviceKind::Television => DeviceAttributes::Television {
            volume: rng.gen_range(5..=40),
            input: ["HDMI1", "HDMI2", "Streaming"][rng.gen_range(0..3)].to_string(),
        },
        DeviceKind::Thermostat => DeviceAttributes::Thermostat {
            temperature_c: round1(rng.gen_range(19.0..=24.0)),
            target_c: 21.0,
            humidity_pct: round1(rng.gen_range(35.0..=55.0)),
        },
        DeviceKind::Lighting => DeviceAttributes::Lighting {
            brightness_pct: rng.gen_range(20..=100),
            color_temp_k: [2700, 3000, 4000][rng.gen_range(0..3)],
        },
        DeviceKind::Refrigerator => DeviceAttributes::Refrigerator {
            temperature_c: round1(rng.gen_range(2.5..=5.0)),
            door_open: rng.gen_bool(0.05),
        },
        DeviceKind::Dishwasher => {
            let cycle = [
                DishwasherCycle::Idle,
                DishwasherCycle::Eco,
                DishwasherCycle::Normal,
                DishwasherCycle::Intensive,
            ][rng.gen_range(0..4)];
            let remaining_min = match cycle {
                DishwasherCycle::Idle => 0,
                _ => rng.gen_range(5..=150),
            };
            DeviceAttributes::Dishwasher { cycle, remaining_min }
        }
        DeviceKind::AirConditioner => DeviceAttributes::AirConditioner {
            temperature_c: round1(rng.gen_range(20.0..=26.0)),
            mode: [HvacMode::Cool, HvacMode::Dry, HvacMode::Fan][rng.gen_range(0..3)],
        },
        DeviceKind::Lamp => DeviceAttributes::Lamp {
            brightness_pct: rng.gen_range(10..=80),
        },
        DeviceKind::SolarInverter => DeviceAttributes::SolarInverter {
            output_w: round1(rng.gen_range(0.0..=5000.0)),
            efficiency_pct: round1(rng.gen_range(94.0..=98.0)),
        },
        DeviceKind::HomeBattery => DeviceAttributes::HomeBattery {
            charge_pct: round1(rng.gen_range(20.0..=100.0)),
            health_pct: round1(rng.gen_range(90.0..=100.0)),
        },
        DeviceKind::WaterHeater => DeviceAttributes::WaterHeater {
            water_temp_c: round1(rng.gen_range(45.0..=65.0)),
        },
        DeviceKind::EvCharger => {
            let connected = rng.gen_bool(0.4);
            DeviceAttributes::EvCharger {
                connected,
                charge_rate_kw: if connected { round1(rng.gen_range(3.7..=7.4)) } else { 0.0 },
            }
        }
    }
}
