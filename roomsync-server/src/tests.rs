//! Fixtures shared by unit and integration tests.

use std::sync::Arc;

use tempfile::TempDir;

use crate::configs::{Database, SchemaManager, Storage};
use crate::models::User;
use crate::repositories::UserRepository;
use crate::services::AuthService;

pub async fn setup_test_db() -> Arc<Storage> {
    let database = Database {
        url: String::from("sqlite::memory:"),
        clean_start: true,
        max_connections: 1,
        busy_timeout: 5,
        migration_path: None,
    };

    Arc::new(
        Storage::new(database, SchemaManager::default())
            .await
            .unwrap(),
    )
}

/// File backed storage with a real connection pool. Keep the returned
/// directory alive for as long as the storage is used.
pub async fn setup_file_db(max_connections: u32) -> (Arc<Storage>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rooms.db");

    let database = Database {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        clean_start: true,
        max_connections,
        busy_timeout: 5,
        migration_path: None,
    };

    let storage = Storage::new(database, SchemaManager::default())
        .await
        .unwrap();

    (Arc::new(storage), dir)
}

pub async fn create_test_user(storage: Arc<Storage>, username: &str, password: &str) -> User {
    let hash = AuthService::new().hash(password).unwrap();
    let repository = UserRepository::new(storage);

    let mut tx = repository.get_pool().begin().await.unwrap();
    let id = repository.create(username, &hash, &mut tx).await.unwrap();
    tx.commit().await.unwrap();

    repository.find_by_id(id).await.unwrap().unwrap()
}
