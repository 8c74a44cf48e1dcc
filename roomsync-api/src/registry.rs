//! Closed vocabularies and bounds for room state.
//!
//! Every validity decision about device names, climate ranges and modes is
//! made here so the server never re-implements it.

use crate::models::{Device, Mode};

pub const TEMPERATURE_MIN: i32 = 16;
pub const TEMPERATURE_MAX: i32 = 30;
pub const FAN_SPEED_MIN: i32 = 1;
pub const FAN_SPEED_MAX: i32 = 5;

pub const DEFAULT_TEMPERATURE: i32 = TEMPERATURE_MIN;
pub const DEFAULT_FAN_SPEED: i32 = FAN_SPEED_MIN;

/// Exact, case-sensitive membership in the device set.
pub fn is_valid_device(name: &str) -> bool {
    name.parse::<Device>().is_ok()
}

/// Maps any input to a mode, falling back to [`Mode::Cool`].
pub fn normalize_mode(input: &str) -> Mode {
    let input = input.trim();

    Mode::ALL
        .into_iter()
        .find(|mode| mode.as_str().eq_ignore_ascii_case(input))
        .unwrap_or_default()
}

pub fn clamp_temperature(value: i64) -> i32 {
    clamp(value, TEMPERATURE_MIN, TEMPERATURE_MAX)
}

pub fn clamp_fan_speed(value: i64) -> i32 {
    clamp(value, FAN_SPEED_MIN, FAN_SPEED_MAX)
}

fn clamp(value: i64, min: i32, max: i32) -> i32 {
    // lossless, bounds are i32
    value.clamp(i64::from(min), i64::from(max)) as i32
}
