use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Device, Mode, RoomState};
use crate::registry::{DEFAULT_FAN_SPEED, DEFAULT_TEMPERATURE};

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToggleDeviceRequest {
    /// Device key, e.g. `l1` or `swing_h`
    #[serde(default)]
    pub device: String,
}

/// Climate settings; out-of-range values are clamped, unknown modes become `cool`.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClimateRequest {
    #[serde(default = "default_temperature", deserialize_with = "lenient_temperature")]
    pub temperature: i64,
    #[serde(default = "default_fan_speed", deserialize_with = "lenient_fan_speed")]
    pub fan_speed: i64,
    #[serde(default)]
    pub mode: String,
}

impl Default for UpdateClimateRequest {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            fan_speed: default_fan_speed(),
            mode: String::new(),
        }
    }
}

fn default_temperature() -> i64 {
    i64::from(DEFAULT_TEMPERATURE)
}

fn default_fan_speed() -> i64 {
    i64::from(DEFAULT_FAN_SPEED)
}

/// Any JSON value a client may send for a climate number.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientInt {
    Signed(i64),
    Unsigned(u64),
    // integers beyond u64 arrive here too
    Float(f64),
    Other(IgnoredAny),
}

impl LenientInt {
    /// Saturates numbers into `i64`; non-numbers yield `fallback`.
    fn saturate(self, fallback: i64) -> i64 {
        match self {
            LenientInt::Signed(value) => value,
            LenientInt::Unsigned(value) => i64::try_from(value).unwrap_or(i64::MAX),
            LenientInt::Float(value) if value.is_nan() => fallback,
            // `as` saturates at the i64 bounds
            LenientInt::Float(value) => value as i64,
            LenientInt::Other(_) => fallback,
        }
    }
}

fn lenient_temperature<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(LenientInt::deserialize(deserializer)?.saturate(default_temperature()))
}

fn lenient_fan_speed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(LenientInt::deserialize(deserializer)?.saturate(default_fan_speed()))
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomStateResponse {
    /// Always `true`
    pub ok: bool,
    pub state: RoomState,
}

impl From<RoomState> for RoomStateResponse {
    fn from(state: RoomState) -> Self {
        Self { ok: true, state }
    }
}

/// Vocabularies accepted by the room endpoints.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCatalogResponse {
    pub devices: Vec<Device>,
    pub modes: Vec<Mode>,
}

impl Default for DeviceCatalogResponse {
    fn default() -> Self {
        Self {
            devices: Device::ALL.to_vec(),
            modes: Mode::ALL.to_vec(),
        }
    }
}
