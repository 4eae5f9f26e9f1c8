use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString};

/// Room a device is installed in.
///
/// Variant order is the order rooms are presented in, so `BTreeMap<Room, _>`
/// iterates in catalog order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter, EnumString,
)]
pub enum Room {
    #[serde(rename = "Living Room")]
    #[strum(serialize = "Living Room")]
    LivingRoom,
    Kitchen,
    Bedroom,
    #[serde(rename = "Solar System")]
    #[strum(serialize = "Solar System")]
    SolarSystem,
    Utility,
}

/// Reported device state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum DeviceStatus {
    Online,
    Offline,
    Warning,
}

/// Device type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceKind {
    Television,
    Thermostat,
    Lighting,
    Refrigerator,
    Dishwasher,
    AirConditioner,
    Lamp,
    SolarInverter,
    HomeBattery,
    WaterHeater,
    EvCharger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DishwasherCycle {
    Idle,
    Eco,
    Normal,
    Intensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    Cool,
    Dry,
    Fan,
}

/// Kind-specific readings. The tag matches the owning device's [`DeviceKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceAttributes {
    Television {
        volume: u8,
        input: String,
    },
    Thermostat {
        temperature_c: f64,
        target_c: f64,
        humidity_pct: f64,
    },
    Lighting {
        brightness_pct: u8,
        color_temp_k: u32,
    },
    Refrigerator {
        temperature_c: f64,
        door_open: bool,
    },
    Dishwasher {
        cycle: DishwasherCycle,
        remaining_min: u32,
    },
    AirConditioner {
        temperature_c: f64,
        mode: HvacMode,
    },
    Lamp {
        brightness_pct: u8,
    },
    SolarInverter {
        output_w: f64,
        efficiency_pct: f64,
    },
    HomeBattery {
        charge_pct: f64,
        health_pct: f64,
    },
    WaterHeater {
        water_temp_c: f64,
    },
    EvCharger {
        connected: bool,
        charge_rate_kw: f64,
    },
}

impl DeviceAttributes {
    /// Device kind these attributes belong to
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Television { .. } => DeviceKind::Television,
            Self::Thermostat { .. } => DeviceKind::Thermostat,
            Self::Lighting { .. } => DeviceKind::Lighting,
            Self::Refrigerator { .. } => DeviceKind::Refrigerator,
            Self::Dishwasher { .. } => DeviceKind::Dishwasher,
            Self::AirConditioner { .. } => DeviceKind::AirConditioner,
            Self::Lamp { .. } => DeviceKind::Lamp,
            Self::SolarInverter { .. } => DeviceKind::SolarInverter,
            Self::HomeBattery { .. } => DeviceKind::HomeBattery,
            Self::WaterHeater { .. } => DeviceKind::WaterHeater,
            Self::EvCharger { .. } => DeviceKind::EvCharger,
        }
    }
}

/// A simulated household device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub kind: DeviceKind,
    pub room: Room,
    /// Nameplate draw in watts
    pub rated_power_w: f64,
    /// Reported draw in watts. Always 0 while the device is offline.
    pub power_consumption_watts: f64,
    pub status: DeviceStatus,
    pub last_seen: DateTime<Utc>,
    pub attributes: DeviceAttributes,
}

impl Device {
    pub fn is_offline(&self) -> bool {
        self.status == DeviceStatus::Offline
    }

    /// Draw that counts towards household totals
    pub fn effective_power_w(&self) -> f64 {
        if self.is_offline() {
            0.0
        } else {
            self.power_consumption_watts
        }
    }
}

/// Devices grouped by room, rooms in catalog order
pub type DeviceInventory = BTreeMap<Room, Vec<Device>>;

/// Iterate every device in an inventory regardless of room
pub fn all_devices(inventory: &DeviceInventory) -> impl Iterator<Item = &Device> {
    inventory.values().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(status: DeviceStatus) -> Device {
        Device {
            id: "kitchen-fridge".to_string(),
            name: "Refrigerator".to_string(),
            kind: DeviceKind::Refrigerator,
            room: Room::Kitchen,
            rated_power_w: 150.0,
            power_consumption_watts: 150.0,
            status,
            last_seen: Utc::now(),
            attributes: DeviceAttributes::Refrigerator {
                temperature_c: 4.0,
                door_open: false,
            },
        }
    }

    #[test]
    fn test_room_display() {
        assert_eq!(Room::LivingRoom.to_string(), "Living Room");
        assert_eq!(Room::SolarSystem.to_string(), "Solar System");
        assert_eq!("Utility".parse::<Room>().unwrap(), Room::Utility);
    }

    #[test]
    fn test_room_serializes_as_display_name() {
        let json = serde_json::to_string(&Room::LivingRoom).unwrap();
        assert_eq!(json, "\"Living Room\"");
    }

    #[test]
    fn test_device_status_from_str() {
        assert_eq!("online".parse::<DeviceStatus>().unwrap(), DeviceStatus::Online);
        assert_eq!("WARNING".parse::<DeviceStatus>().unwrap(), DeviceStatus::Warning);
        assert!("broken".parse::<DeviceStatus>().is_err());
    }

    #[test]
    fn test_device_kind_display() {
        assert_eq!(DeviceKind::EvCharger.to_string(), "ev_charger");
        assert_eq!(DeviceKind::SolarInverter.to_string(), "solar_inverter");
    }

    #[test]
    fn test_offline_device_has_no_effective_power() {
        let mut d = device(DeviceStatus::Offline);
        assert_eq!(d.effective_power_w(), 0.0);

        d.status = DeviceStatus::Warning;
        assert_eq!(d.effective_power_w(), 150.0);
    }

    #[test]
    fn test_attributes_tagged_by_kind() {
        let d = device(DeviceStatus::Online);
        assert_eq!(d.attributes.kind(), d.kind);

        let json = serde_json::to_value(&d.attributes).unwrap();
        assert_eq!(json["kind"], "refrigerator");
        assert_eq!(json["door_open"], false);
    }
}
