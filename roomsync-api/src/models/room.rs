use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Id;
use crate::registry;

/// On/off device installed in every room.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    /// Light bank 1
    L1,
    /// Light bank 2
    L2,
    /// Light bank 3
    L3,
    /// Light bank 4
    L4,
    Projector,
    /// Air-conditioning power
    Ac,
    /// Vertical swing motor
    SwingV,
    /// Horizontal swing motor
    SwingH,
}

impl Device {
    pub const ALL: [Device; 8] = [
        Device::L1,
        Device::L2,
        Device::L3,
        Device::L4,
        Device::Projector,
        Device::Ac,
        Device::SwingV,
        Device::SwingH,
    ];

    /// Persisted column name and wire key of the device.
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::L1 => "l1",
            Device::L2 => "l2",
            Device::L3 => "l3",
            Device::L4 => "l4",
            Device::Projector => "projector",
            Device::Ac => "ac",
            Device::SwingV => "swing_v",
            Device::SwingH => "swing_h",
        }
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDeviceError(pub String);

impl Display for UnknownDeviceError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "unknown device `{}`", self.0)
    }
}

impl std::error::Error for UnknownDeviceError {}

impl FromStr for Device {
    type Err = UnknownDeviceError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Device::ALL
            .into_iter()
            .find(|device| device.as_str() == input)
            .ok_or_else(|| UnknownDeviceError(input.to_string()))
    }
}

/// Air-conditioning operating mode.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Cool,
    Auto,
    Dry,
    Fan,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Cool, Mode::Auto, Mode::Dry, Mode::Fan];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Cool => "cool",
            Mode::Auto => "auto",
            Mode::Dry => "dry",
            Mode::Fan => "fan",
        }
    }
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        registry::normalize_mode(value)
    }
}

impl From<String> for Mode {
    fn from(value: String) -> Self {
        registry::normalize_mode(&value)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One boolean per [`Device`], all off by default.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStates {
    pub l1: bool,
    pub l2: bool,
    pub l3: bool,
    pub l4: bool,
    pub projector: bool,
    pub ac: bool,
    pub swing_v: bool,
    pub swing_h: bool,
}

impl DeviceStates {
    pub fn get(&self, device: Device) -> bool {
        match device {
            Device::L1 => self.l1,
            Device::L2 => self.l2,
            Device::L3 => self.l3,
            Device::L4 => self.l4,
            Device::Projector => self.projector,
            Device::Ac => self.ac,
            Device::SwingV => self.swing_v,
            Device::SwingH => self.swing_h,
        }
    }

    pub fn set(&mut self, device: Device, on: bool) {
        *self.slot_mut(device) = on;
    }

    /// Flips the device and returns its new value.
    pub fn toggle(&mut self, device: Device) -> bool {
        let slot = self.slot_mut(device);
        *slot = !*slot;
        *slot
    }

    fn slot_mut(&mut self, device: Device) -> &mut bool {
        match device {
            Device::L1 => &mut self.l1,
            Device::L2 => &mut self.l2,
            Device::L3 => &mut self.l3,
            Device::L4 => &mut self.l4,
            Device::Projector => &mut self.projector,
            Device::Ac => &mut self.ac,
            Device::SwingV => &mut self.swing_v,
            Device::SwingH => &mut self.swing_h,
        }
    }
}

/// Full device state of a single room.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    /// Room identifier
    pub room_id: Id,
    /// On/off devices, flattened into the record
    #[serde(flatten)]
    pub devices: DeviceStates,
    /// Target temperature in Celsius, 16 to 30
    pub temperature: i32,
    /// Fan speed level, 1 to 5
    pub fan_speed: i32,
    /// Air-conditioning mode
    pub mode: Mode,
}

impl RoomState {
    /// A room with every device off and climate settings at their defaults.
    pub fn new(room_id: Id) -> Self {
        Self {
            room_id,
            devices: DeviceStates::default(),
            temperature: registry::DEFAULT_TEMPERATURE,
            fan_speed: registry::DEFAULT_FAN_SPEED,
            mode: Mode::default(),
        }
    }
}
