use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Error, SqlitePool};

use crate::configs::schema::SchemaManager;
use crate::configs::settings::Database;

/// Process-wide database handle; schema is prepared once when it is built.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(database: Database, schema_manager: SchemaManager) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&database.url)?
            .busy_timeout(Duration::from_secs(database.busy_timeout));

        let pool = SqlitePoolOptions::new()
            .min_connections(1) // in memory db might drop connection when 0
            .max_connections(database.max_connections.max(1))
            .connect_with(options)
            .await?;

        Self::with_pool(pool, &database, &schema_manager).await
    }

    pub async fn with_pool(
        pool: SqlitePool,
        database: &Database,
        schema_manager: &SchemaManager,
    ) -> Result<Self, Error> {
        Self::create_schema(&pool, schema_manager, database).await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_schema(
        pool: &SqlitePool,
        schema: &SchemaManager,
        database: &Database,
    ) -> Result<(), Error> {
        if database.clean_start {
            // Clean migration history
            sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
                .execute(pool)
                .await?;

            for statement in schema.dispose_schema() {
                sqlx::query(&statement).execute(pool).await?;
            }

            tracing::warn!("perform a clean boot: clean and recreate schema");
        }

        for statement in schema.create_schema() {
            sqlx::query(&statement).execute(pool).await?;
        }

        Self::reconcile_columns(pool, schema).await?;

        if let Some(migration_path) = database.migration_path.clone() {
            let mut pool_connection = pool.acquire().await?;
            let migrator = Migrator::new(Path::new(&migration_path)).await?;
            migrator.run(&mut pool_connection).await?;

            tracing::info!("database migration success");
        }

        Ok(())
    }

    async fn reconcile_columns(pool: &SqlitePool, schema: &SchemaManager) -> Result<(), Error> {
        for table in schema.tables() {
            let columns = table.columns();
            if columns.is_empty() {
                continue;
            }

            let existing: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info($1)")
                    .bind(table.name())
                    .fetch_all(pool)
                    .await?;

            for (column, definition) in columns {
                if existing.iter().any(|name| name == column) {
                    continue;
                }

                let statement = format!(
                    "ALTER TABLE {} ADD COLUMN {} {}",
                    table.name(),
                    column,
                    definition
                );
                sqlx::query(&statement).execute(pool).await?;

                tracing::info!(table = table.name(), column, "added missing column");
            }
        }

        Ok(())
    }
}
