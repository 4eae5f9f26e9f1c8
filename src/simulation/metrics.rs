use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{
    all_devices, point_at, CurrentMetrics, DeviceInventory, GridFlow, HourlyProfilePoint,
    InvalidHourError,
};

/// Home battery model used to derive the displayed charge level
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatteryConfig {
    /// Usable capacity in kWh
    #[validate(range(exclusive_min = 0.0))]
    pub capacity_kwh: f64,
    /// Charge level the current interval starts from
    #[validate(range(min = 0.0, max = 100.0))]
    pub prior_level_pct: f64,
    /// Round-trip efficiency (0.0-1.0)
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub efficiency: f64,
    /// Length of the interval the surplus/deficit is applied over
    #[validate(range(min = 1))]
    pub interval_minutes: u32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 10.0,
            prior_level_pct: 65.0,
            efficiency: 0.95,
            interval_minutes: 15,
        }
    }
}

impl BatteryConfig {
    /// Charge level after absorbing `surplus_w` (negative = deficit) for one interval
    pub fn level_after(&self, surplus_w: f64) -> f64 {
        let hours = self.interval_minutes as f64 / 60.0;
        let energy_kwh = surplus_w / 1000.0 * hours;
        let stored_kwh = if energy_kwh >= 0.0 {
            energy_kwh * self.efficiency
        } else {
            energy_kwh / self.efficiency
        };
        (self.prior_level_pct + stored_kwh / self.capacity_kwh * 100.0).clamp(0.0, 100.0)
    }
}

/// Validate an hour of day given as a signed integer
pub fn checked_hour(hour: i64) -> Result<u8, InvalidHourError> {
    u8::try_from(hour)
        .ok()
        .filter(|h| *h <= 23)
        .ok_or(InvalidHourError { hour })
}

/// Derive the current household metrics for `hour`.
///
/// The profile supplies the aggregate consumption and solar figures; the device
/// list supplies the per-device breakdown. Offline devices contribute nothing.
pub fn current_metrics(
    devices: &DeviceInventory,
    profile: &[HourlyProfilePoint],
    hour: i64,
    battery: &BatteryConfig,
) -> Result<CurrentMetrics, InvalidHourError> {
    let hour_of_day = checked_hour(hour)?;
    let point = point_at(profile, hour_of_day).ok_or(InvalidHourError { hour })?;

    let house_consumption_w = point.consumption_kwh.max(0.0) * 1000.0;
    let solar_generation_w = point.solar_kwh.max(0.0) * 1000.0;
    let device_breakdown_w: f64 = all_devices(devices).map(|d| d.effective_power_w()).sum();

    let grid_power_w = house_consumption_w - solar_generation_w;
    let battery_level_pct = battery.level_after(-grid_power_w);
    let battery_charging = grid_power_w < 0.0 && battery_level_pct < 100.0;

    let net_efficiency_pct = if house_consumption_w > 0.0 {
        (solar_generation_w / house_consumption_w * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    Ok(CurrentMetrics {
        hour: hour_of_day,
        house_consumption_w,
        device_breakdown_w,
        breakdown_discrepancy_w: house_consumption_w - device_breakdown_w,
        solar_generation_w,
        grid_power_w,
        grid_flow: GridFlow::from_grid_power_w(grid_power_w),
        battery_level_pct,
        battery_charging,
        net_efficiency_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Device, DeviceAttributes, DeviceKind, DeviceStatus, Room};
    use chrono::Utc;
    use rstest::rstest;

    fn flat_profile(consumption_kwh: f64, solar_kwh: f64) -> Vec<HourlyProfilePoint> {
        (0..24)
            .map(|hour| HourlyProfilePoint { hour, consumption_kwh, solar_kwh })
            .collect()
    }

    fn lamp(id: &str, watts: f64, status: DeviceStatus) -> Device {
        Device {
            id: id.to_string(),
            name: "Lamp".to_string(),
            kind: DeviceKind::Lamp,
            room: Room::Bedroom,
            rated_power_w: watts,
            power_consumption_watts: watts,
            status,
            last_seen: Utc::now(),
            attributes: DeviceAttributes::Lamp {
                brightness_pct: 50,
            },
        }
    }

    #[rstest]
    #[case(-1, false)]
    #[case(0, true)]
    #[case(12, true)]
    #[case(23, true)]
    #[case(24, false)]
    #[case(i64::MAX, false)]
    fn test_hour_bounds(#[case] hour: i64, #[case] ok: bool) {
        let result = current_metrics(
            &DeviceInventory::new(),
            &flat_profile(1.0, 0.0),
            hour,
            &BatteryConfig::default(),
        );
        assert_eq!(result.is_ok(), ok);
        if let Err(e) = result {
            assert_eq!(e.hour, hour);
        }
    }

    #[test]
    fn test_missing_profile_point_is_invalid_hour() {
        let profile = vec![HourlyProfilePoint {
            hour: 0,
            consumption_kwh: 1.0,
            solar_kwh: 0.0,
        }];
        let err = current_metrics(&DeviceInventory::new(), &profile, 5, &BatteryConfig::default())
            .unwrap_err();
        assert_eq!(err, InvalidHourError {
            hour: 5,
        });
    }

    #[test]
    fn test_offline_devices_excluded_from_breakdown() {
        let mut inventory = DeviceInventory::new();
        inventory.insert(
            Room::Bedroom,
            vec![
                lamp("a", 100.0, DeviceStatus::Online),
                lamp("b", 40.0, DeviceStatus::Warning),
                lamp("c", 500.0, DeviceStatus::Offline),
            ],
        );

        let m = current_metrics(&inventory, &flat_profile(1.0, 0.0), 3, &BatteryConfig::default())
            .unwrap();
        assert_eq!(m.device_breakdown_w, 140.0);
        assert_eq!(m.house_consumption_w, 1000.0);
        assert_eq!(m.breakdown_discrepancy_w, 860.0);
    }

    #[test]
    fn test_export_charges_battery() {
        let m = current_metrics(
            &DeviceInventory::new(),
            &flat_profile(0.5, 3.0),
            12,
            &BatteryConfig::default(),
        )
        .unwrap();

        assert_eq!(m.grid_power_w, -2500.0);
        assert_eq!(m.grid_flow, GridFlow::Exporting);
        assert!(m.battery_charging);
        assert!(m.battery_level_pct > BatteryConfig::default().prior_level_pct);
        assert_eq!(m.net_efficiency_pct, 100.0);
    }

    #[test]
    fn test_import_discharges_battery() {
        let m = current_metrics(
            &DeviceInventory::new(),
            &flat_profile(2.0, 0.5),
            18,
            &BatteryConfig::default(),
        )
        .unwrap();

        assert_eq!(m.grid_power_w, 1500.0);
        assert_eq!(m.grid_flow, GridFlow::Importing);
        assert!(!m.battery_charging);
        assert!(m.battery_level_pct < BatteryConfig::default().prior_level_pct);
        assert!((m.net_efficiency_pct - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_battery_is_not_charging() {
        let battery = BatteryConfig { prior_level_pct: 100.0, ..Default::default() };
        let m = current_metrics(&DeviceInventory::new(), &flat_profile(0.2, 4.0), 12, &battery)
            .unwrap();

        assert_eq!(m.battery_level_pct, 100.0);
        assert!(!m.battery_charging);
    }

    #[test]
    fn test_zero_consumption_has_zero_efficiency() {
        let m = current_metrics(
            &DeviceInventory::new(),
            &flat_profile(0.0, 2.0),
            12,
            &BatteryConfig::default(),
        )
        .unwrap();
        assert_eq!(m.net_efficiency_pct, 0.0);
    }

    #[test]
    fn test_battery_level_clamped() {
        let battery = BatteryConfig {
            capacity_kwh: 1.0,
            prior_level_pct: 5.0,
            interval_minutes: 60,
            ..Default::default()
        };
        assert_eq!(battery.level_after(-10_000.0), 0.0);
        assert_eq!(battery.level_after(10_000.0), 100.0);
    }
}
