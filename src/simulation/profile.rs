//! # Daily Profile Curves
//!
//! Deterministic base curves for household consumption and solar generation,
//! perturbed per hour by bounded multiplicative noise.
//!
//! Consumption follows a squared 12-hour cosine, which yields two daily peaks
//! (08:00 and 20:00) and two troughs (02:00 and 14:00) on top of a constant
//! base load. Solar follows a Gaussian bell centred on solar noon, clipped to
//! the daylight window.

use rand::Rng;
use std::f64::consts::PI;

use crate::domain::{is_daylight, HourlyProfilePoint, HOURS_PER_DAY};

/// Hour of the morning consumption peak; the evening peak follows 12 h later
pub const CONSUMPTION_PEAK_HOUR: f64 = 8.0;

/// Hour of maximum solar output
pub const SOLAR_NOON_HOUR: f64 = 12.0;

/// Width (standard deviation, in hours) of the solar bell curve
pub const SOLAR_SIGMA_HOURS: f64 = 3.0;

/// Shape of the twice-daily activity cycle, in [0, 1]
pub fn activity_shape(hour: u8) -> f64 {
    let phase = 2.0 * PI * (hour as f64 - CONSUMPTION_PEAK_HOUR) / 12.0;
    ((1.0 + phase.cos()) / 2.0).powi(2)
}

/// Noise-free consumption for `hour` in kWh
pub fn consumption_curve_kwh(hour: u8, base_load_kwh: f64, peak_amplitude_kwh: f64) -> f64 {
    (base_load_kwh + peak_amplitude_kwh * activity_shape(hour)).max(0.0)
}

/// Noise-free solar generation for `hour` in kWh; zero outside daylight
pub fn solar_curve_kwh(hour: u8, solar_peak_kwh: f64) -> f64 {
    if !is_daylight(hour) {
        return 0.0;
    }
    let offset = hour as f64 - SOLAR_NOON_HOUR;
    solar_peak_kwh.max(0.0) * (-(offset * offset) / (2.0 * SOLAR_SIGMA_HOURS.powi(2))).exp()
}

/// Multiplicative noise factor drawn uniformly from `[1 - fraction, 1 + fraction]`.
///
/// `fraction` is expected within `[0, 1)` so the factor stays positive.
pub fn noise_factor<R: Rng + ?Sized>(rng: &mut R, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return 1.0;
    }
    rng.gen_range((1.0 - fraction)..=(1.0 + fraction))
}

/// Build the 24-point profile, drawing one consumption factor per hour and one
/// solar factor per daylight hour.
pub fn build_profile<R: Rng + ?Sized>(
    rng: &mut R,
    base_load_kwh: f64,
    peak_amplitude_kwh: f64,
    solar_peak_kwh: f64,
    noise_fraction: f64,
) -> Vec<HourlyProfilePoint> {
    (0..HOURS_PER_DAY as u8)
        .map(|hour| {
            let consumption_kwh = consumption_curve_kwh(hour, base_load_kwh, peak_amplitude_kwh)
                * noise_factor(rng, noise_fraction);

            let solar_kwh = if is_daylight(hour) {
                solar_curve_kwh(hour, solar_peak_kwh) * noise_factor(rng, noise_fraction)
            } else {
                0.0
            };

            HourlyProfilePoint {
                hour,
                consumption_kwh,
                solar_kwh,
            }
        })
        .collect()
}
