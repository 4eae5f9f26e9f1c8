use serde::{Deserialize, Serialize};

/// Number of points in a daily profile
pub const HOURS_PER_DAY: usize = 24;

/// First and last hour (inclusive) in which solar output is produced
pub const DAYLIGHT_START_HOUR: u8 = 6;
pub const DAYLIGHT_END_HOUR: u8 = 18;

/// One hour of expected household energy flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyProfilePoint {
    /// Hour of day, 0-23
    pub hour: u8,
    pub consumption_kwh: f64,
    pub solar_kwh: f64,
}

pub fn is_daylight(hour: u8) -> bool {
    (DAYLIGHT_START_HOUR..=DAYLIGHT_END_HOUR).contains(&hour)
}

/// Find the point for `hour` in a profile
pub fn point_at(profile: &[HourlyProfilePoint], hour: u8) -> Option<&HourlyProfilePoint> {
    profile.iter().find(|p| p.hour == hour)
}

/// Daily totals over a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub total_consumption_kwh: f64,
    pub total_solar_kwh: f64,
    pub peak_consumption_hour: u8,
    pub peak_solar_hour: u8,
}

impl ProfileSummary {
    pub fn from_points(profile: &[HourlyProfilePoint]) -> Self {
        let peak_by = |f: fn(&HourlyProfilePoint) -> f64| {
            profile
                .iter()
                .max_by(|a, b| f(a).total_cmp(&f(b)))
                .map(|p| p.hour)
                .unwrap_or(0)
        };

        Self {
            total_consumption_kwh: profile.iter().map(|p| p.consumption_kwh).sum(),
            total_solar_kwh: profile.iter().map(|p| p.solar_kwh).sum(),
            peak_consumption_hour: peak_by(|p| p.consumption_kwh),
            peak_solar_hour: peak_by(|p| p.solar_kwh),
        }
    }
}
