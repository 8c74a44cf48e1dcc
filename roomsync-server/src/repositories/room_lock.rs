use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// One async mutex per room, created on first use.
///
/// Entries are never evicted: rooms are never deleted, so the map is bounded
/// by the number of rooms ever touched.
#[derive(Default)]
pub struct RoomLocks {
    locks: RwLock<HashMap<i32, Arc<Mutex<()>>>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until the caller is the only holder of `room_id`'s lock.
    pub async fn acquire(&self, room_id: i32) -> OwnedMutexGuard<()> {
        self.lock_for(room_id).await.lock_owned().await
    }

    async fn lock_for(&self, room_id: i32) -> Arc<Mutex<()>> {
        {
            let locks = self.locks.read().await;
            if let Some(lock) = locks.get(&room_id) {
                return Arc::clone(lock);
            }
        }

        let mut locks = self.locks.write().await;
        Arc::clone(locks.entry(room_id).or_default())
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.locks.read().await.len()
    }
}
