use std::sync::Arc;

use roomsync_api::models::RoomState;
use roomsync_api::registry;
use sqlx::{Error, Pool, Sqlite, Transaction};

use crate::configs::Storage;
use crate::errors::RoomError;
use crate::models::RoomStateRow;
use crate::repositories::RoomLocks;

/// Durable per-room state with atomic read-modify-write.
///
/// `apply_update` calls on one room are serialized by that room's lock and run
/// inside a single transaction; calls on different rooms take different locks.
pub struct RoomStateRepository {
    storage: Arc<Storage>,
    locks: RoomLocks,
}

impl RoomStateRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            storage,
            locks: RoomLocks::new(),
        }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl RoomStateRepository {
    /// Creates the default record for `room_id` unless one exists.
    pub async fn ensure_exists(&self, room_id: i32) -> Result<(), Error> {
        sqlx::query("INSERT OR IGNORE INTO room_states (room_id) VALUES ($1)")
            .bind(room_id)
            .execute(self.storage.get_pool())
            .await?;

        Ok(())
    }

    pub async fn find_by_room_id(&self, room_id: i32) -> Result<RoomState, RoomError> {
        let row: Option<RoomStateRow> =
            sqlx::query_as("SELECT * FROM room_states WHERE room_id = $1")
                .bind(room_id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        row.map(RoomState::from)
            .ok_or(RoomError::RoomNotFound(room_id))
    }

    /// Reads the record, applies `mutator` and persists the result as one unit.
    pub async fn apply_update<F>(&self, room_id: i32, mutator: F) -> Result<RoomState, RoomError>
    where
        F: FnOnce(&mut RoomState),
    {
        let _guard = self.locks.acquire(room_id).await;

        // take the write lock up front, a deferred read lock cannot be upgraded
        // while another room's writer holds the database
        let mut tx = self.storage.get_pool().begin_with("BEGIN IMMEDIATE").await?;

        let row: Option<RoomStateRow> =
            sqlx::query_as("SELECT * FROM room_states WHERE room_id = $1")
                .bind(room_id)
                .fetch_optional(&mut *tx)
                .await?;

        let mut state = row
            .map(RoomState::from)
            .ok_or(RoomError::RoomNotFound(room_id))?;

        mutator(&mut state);

        // the record key and ranges are not the mutator's to change
        state.room_id = room_id;
        state.temperature = registry::clamp_temperature(state.temperature.into());
        state.fan_speed = registry::clamp_fan_speed(state.fan_speed.into());

        Self::update(&state, &mut tx).await?;

        tx.commit().await?;

        Ok(state)
    }

    async fn update(state: &RoomState, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), Error> {
        let row = RoomStateRow::from(state);

        sqlx::query(
            r#"
            UPDATE room_states
            SET l1 = $1, l2 = $2, l3 = $3, l4 = $4, projector = $5, ac = $6,
                swing_v = $7, swing_h = $8, temperature = $9, fan_speed = $10, mode = $11
            WHERE room_id = $12
            "#,
        )
        .bind(row.l1)
        .bind(row.l2)
        .bind(row.l3)
        .bind(row.l4)
        .bind(row.projector)
        .bind(row.ac)
        .bind(row.swing_v)
        .bind(row.swing_h)
        .bind(row.temperature)
        .bind(row.fan_speed)
        .bind(&row.mode)
        .bind(row.room_id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }
}
