use roomsync_api::models::{Device, DeviceStates, RoomState};
use roomsync_api::registry;

use super::Table;

/// Persisted row of `room_states`; column names match the wire keys.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RoomStateRow {
    pub room_id: i32,
    pub l1: bool,
    pub l2: bool,
    pub l3: bool,
    pub l4: bool,
    pub projector: bool,
    pub ac: bool,
    pub swing_v: bool,
    pub swing_h: bool,
    pub temperature: i32,
    pub fan_speed: i32,
    pub mode: String,
}

impl From<RoomStateRow> for RoomState {
    fn from(row: RoomStateRow) -> Self {
        RoomState {
            room_id: row.room_id,
            devices: DeviceStates {
                l1: row.l1,
                l2: row.l2,
                l3: row.l3,
                l4: row.l4,
                projector: row.projector,
                ac: row.ac,
                swing_v: row.swing_v,
                swing_h: row.swing_h,
            },
            temperature: registry::clamp_temperature(row.temperature.into()),
            fan_speed: registry::clamp_fan_speed(row.fan_speed.into()),
            mode: registry::normalize_mode(&row.mode),
        }
    }
}

impl From<&RoomState> for RoomStateRow {
    fn from(state: &RoomState) -> Self {
        let devices = &state.devices;

        RoomStateRow {
            room_id: state.room_id,
            l1: devices.get(Device::L1),
            l2: devices.get(Device::L2),
            l3: devices.get(Device::L3),
            l4: devices.get(Device::L4),
            projector: devices.get(Device::Projector),
            ac: devices.get(Device::Ac),
            swing_v: devices.get(Device::SwingV),
            swing_h: devices.get(Device::SwingH),
            temperature: state.temperature,
            fan_speed: state.fan_speed,
            mode: state.mode.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct RoomStateTable;

impl Table for RoomStateTable {
    fn name(&self) -> &'static str {
        "room_states"
    }

    fn create(&self) -> String {
        let columns = self
            .columns()
            .into_iter()
            .map(|(name, definition)| format!("{name} {definition}"))
            .collect::<Vec<_>>()
            .join(",\n                ");

        format!(
            r#"
            CREATE TABLE IF NOT EXISTS room_states (
                room_id INTEGER PRIMARY KEY CHECK (room_id > 0),
                {columns}
            );
            "#
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS room_states;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }

    fn columns(&self) -> Vec<(&'static str, &'static str)> {
        let mut columns: Vec<(&'static str, &'static str)> = Device::ALL
            .iter()
            .map(|device| (device.as_str(), "BOOLEAN NOT NULL DEFAULT FALSE"))
            .collect();

        columns.push(("temperature", "INTEGER NOT NULL DEFAULT 16"));
        columns.push(("fan_speed", "INTEGER NOT NULL DEFAULT 1"));
        columns.push(("mode", "TEXT NOT NULL DEFAULT 'cool'"));

        columns
    }
}

#[cfg(test)]
mod tests {
    use roomsync_api::models::Mode;

    use super::*;

    #[test]
    fn test_create_statement_declares_every_device() {
        let statement = RoomStateTable.create();

        for device in Device::ALL {
            assert!(
                statement.contains(&format!("{device} BOOLEAN NOT NULL DEFAULT FALSE")),
                "missing column for {device}"
            );
        }
        assert!(statement.contains("mode TEXT NOT NULL DEFAULT 'cool'"));
    }

    #[test]
    fn test_row_conversion_repairs_out_of_range_values() {
        let row = RoomStateRow {
            room_id: 3,
            l1: true,
            l2: false,
            l3: false,
            l4: true,
            projector: false,
            ac: true,
            swing_v: false,
            swing_h: false,
            temperature: 45,
            fan_speed: 0,
            mode: String::from("turbo"),
        };

        let state = RoomState::from(row);

        assert_eq!(state.temperature, 30);
        assert_eq!(state.fan_speed, 1);
        assert_eq!(state.mode, Mode::Cool);
        assert!(state.devices.l1 && state.devices.l4 && state.devices.ac);

        let back = RoomStateRow::from(&state);
        assert_eq!(back.mode, "cool");
        assert!(back.l4);
    }
}
