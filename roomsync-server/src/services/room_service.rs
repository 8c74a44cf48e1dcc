use std::sync::Arc;

use roomsync_api::models::{Device, RoomState};
use roomsync_api::registry;

use crate::errors::RoomError;
use crate::repositories::RoomStateRepository;

/// Entry point for reading and changing room device state.
///
/// Every call re-reads the persisted record; nothing is cached between calls.
#[derive(Clone)]
pub struct RoomService {
    repository: Arc<RoomStateRepository>,
}

impl RoomService {
    pub fn new(repository: Arc<RoomStateRepository>) -> Self {
        Self { repository }
    }

    /// Returns the room's state, creating the default record on first access.
    pub async fn get_state(&self, room_id: i32) -> Result<RoomState, RoomError> {
        Self::check_room_id(room_id)?;

        self.repository.ensure_exists(room_id).await?;
        self.repository.find_by_room_id(room_id).await
    }

    /// Flips one on/off device. Unknown names are rejected before storage is touched.
    pub async fn toggle_device(&self, room_id: i32, device_name: &str) -> Result<RoomState, RoomError> {
        Self::check_room_id(room_id)?;

        let device: Device = device_name.parse().map_err(|_| {
            tracing::warn!(room_id, device = device_name, "rejected toggle of unknown device");
            RoomError::InvalidDevice
        })?;

        self.repository.ensure_exists(room_id).await?;

        let state = self
            .repository
            .apply_update(room_id, |state| {
                state.devices.toggle(device);
            })
            .await?;

        tracing::debug!(room_id, %device, on = state.devices.get(device), "device toggled");

        Ok(state)
    }

    /// Sets the climate triple; inputs are clamped and normalized, never rejected.
    pub async fn update_climate(
        &self,
        room_id: i32,
        temperature: i64,
        fan_speed: i64,
        mode: &str,
    ) -> Result<RoomState, RoomError> {
        Self::check_room_id(room_id)?;

        let temperature = registry::clamp_temperature(temperature);
        let fan_speed = registry::clamp_fan_speed(fan_speed);
        let mode = registry::normalize_mode(mode);

        self.repository.ensure_exists(room_id).await?;

        let state = self
            .repository
            .apply_update(room_id, |state| {
                state.temperature = temperature;
                state.fan_speed = fan_speed;
                state.mode = mode;
            })
            .await?;

        tracing::debug!(room_id, temperature, fan_speed, %mode, "climate updated");

        Ok(state)
    }

    fn check_room_id(room_id: i32) -> Result<(), RoomError> {
        if room_id <= 0 {
            return Err(RoomError::InvalidRoomId);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use roomsync_api::models::{DeviceStates, Mode};

    use crate::tests::{setup_file_db, setup_test_db};

    use super::*;

    async fn setup_service() -> RoomService {
        let storage = setup_test_db().await;
        RoomService::new(Arc::new(RoomStateRepository::new(storage)))
    }

    #[tokio::test]
    async fn test_first_access_returns_defaults() {
        let service = setup_service().await;

        let state = service.get_state(1).await.unwrap();

        assert_eq!(state.room_id, 1);
        assert_eq!(state.devices, DeviceStates::default());
        assert_eq!(state.temperature, 16);
        assert_eq!(state.fan_speed, 1);
        assert_eq!(state.mode, Mode::Cool);
    }

    #[tokio::test]
    async fn test_non_positive_room_id_is_rejected() {
        let service = setup_service().await;

        assert!(matches!(service.get_state(0).await, Err(RoomError::InvalidRoomId)));
        assert!(matches!(
            service.toggle_device(-4, "l1").await,
            Err(RoomError::InvalidRoomId)
        ));
        assert!(matches!(
            service.update_climate(0, 20, 2, "dry").await,
            Err(RoomError::InvalidRoomId)
        ));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let service = setup_service().await;
        service.update_climate(1, 21, 3, "auto").await.unwrap();

        for device in Device::ALL {
            let before = service.get_state(1).await.unwrap();

            let once = service.toggle_device(1, device.as_str()).await.unwrap();
            assert_ne!(once, before, "{device} did not change");

            let twice = service.toggle_device(1, device.as_str()).await.unwrap();
            assert_eq!(twice, before, "{device} did not restore");
        }
    }

    #[tokio::test]
    async fn test_toggle_changes_only_the_named_device() {
        let service = setup_service().await;
        let before = service.get_state(1).await.unwrap();

        let after = service.toggle_device(1, "l1").await.unwrap();

        assert!(after.devices.l1);
        let mut expected = before.clone();
        expected.devices.l1 = true;
        assert_eq!(after, expected);
    }

    #[tokio::test]
    async fn test_unknown_device_is_rejected_without_writing() {
        let service = setup_service().await;
        service.toggle_device(1, "projector").await.unwrap();
        let before = service.get_state(1).await.unwrap();

        let result = service.toggle_device(1, "heater").await;

        assert!(matches!(result, Err(RoomError::InvalidDevice)));
        assert_eq!(service.get_state(1).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_unknown_device_does_not_create_room() {
        let storage = setup_test_db().await;
        let repository = Arc::new(RoomStateRepository::new(storage));
        let service = RoomService::new(repository.clone());

        let _ = service.toggle_device(8, "heater").await;

        assert!(matches!(
            repository.find_by_room_id(8).await,
            Err(RoomError::RoomNotFound(8))
        ));
    }

    #[tokio::test]
    async fn test_climate_is_clamped_at_lower_bound() {
        let service = setup_service().await;

        let state = service.update_climate(1, 5, 99, "party").await.unwrap();

        assert_eq!(state.temperature, 16);
        assert_eq!(state.fan_speed, 5);
        assert_eq!(state.mode, Mode::Cool);
    }

    #[tokio::test]
    async fn test_climate_is_clamped_at_upper_bound() {
        let service = setup_service().await;

        let state = service.update_climate(1, 99, 0, "dry").await.unwrap();

        assert_eq!(state.temperature, 30);
        assert_eq!(state.fan_speed, 1);
        assert_eq!(state.mode, Mode::Dry);
    }

    #[tokio::test]
    async fn test_climate_leaves_devices_untouched() {
        let service = setup_service().await;
        service.toggle_device(1, "ac").await.unwrap();
        service.toggle_device(1, "swing_h").await.unwrap();

        let state = service.update_climate(1, 24, 4, "fan").await.unwrap();

        assert!(state.devices.ac);
        assert!(state.devices.swing_h);
        assert!(!state.devices.l1);
        assert_eq!(service.get_state(1).await.unwrap(), state);
    }

    #[tokio::test]
    async fn test_rooms_are_independent() {
        let service = setup_service().await;
        let room_two = service.get_state(2).await.unwrap();

        service.toggle_device(1, "l3").await.unwrap();
        service.update_climate(1, 28, 5, "auto").await.unwrap();

        assert_eq!(service.get_state(2).await.unwrap(), room_two);
        assert!(service.get_state(1).await.unwrap().devices.l3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_are_not_lost() {
        let service = setup_service().await;

        for count in [16usize, 17] {
            let before = service.get_state(1).await.unwrap().devices.l1;

            let handles: Vec<_> = (0..count)
                .map(|_| {
                    let service = service.clone();
                    tokio::spawn(async move { service.toggle_device(1, "l1").await })
                })
                .collect();

            for handle in handles {
                handle.await.unwrap().unwrap();
            }

            let after = service.get_state(1).await.unwrap().devices.l1;
            assert_eq!(after, before ^ (count % 2 == 1), "{count} toggles");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_of_different_devices_all_apply() {
        let service = setup_service().await;

        let handles: Vec<_> = Device::ALL
            .into_iter()
            .map(|device| {
                let service = service.clone();
                tokio::spawn(async move { service.toggle_device(3, device.as_str()).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let state = service.get_state(3).await.unwrap();
        for device in Device::ALL {
            assert!(state.devices.get(device), "{device} lost its toggle");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_rooms_on_a_file_pool() {
        let (storage, _dir) = setup_file_db(10).await;
        let service = RoomService::new(Arc::new(RoomStateRepository::new(storage)));

        let mut handles = Vec::new();
        for room_id in 1..=6 {
            for _ in 0..room_id {
                let service = service.clone();
                handles.push(tokio::spawn(async move {
                    service.toggle_device(room_id, "ac").await
                }));
            }

            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.update_climate(room_id, 20 + i64::from(room_id), 2, "dry").await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for room_id in 1..=6 {
            let state = service.get_state(room_id).await.unwrap();
            assert_eq!(state.devices.ac, room_id % 2 == 1, "room {room_id}");
            assert_eq!(state.temperature, 20 + room_id);
            assert_eq!(state.fan_speed, 2);
            assert_eq!(state.mode, Mode::Dry);
        }
    }
}
