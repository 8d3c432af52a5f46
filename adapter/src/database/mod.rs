use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

pub mod model;

fn make_sqlite_connect_options(cfg: &DatabaseConfig) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(&cfg.filename)
        .create_if_missing(true)
}

#[derive(Clone)]
pub struct ConnectionPool(SqlitePool);

impl ConnectionPool {
    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &SqlitePool {
        &self.0
    }

    pub async fn begin(&self) -> AppResult<sqlx::Transaction<'_, sqlx::Sqlite>> {
        self.0.begin().await.map_err(AppError::TransactionError)
    }

    /// Idempotent schema bootstrap, run once at process start.
    ///
    /// The unique indexes enforce the (spot, date) and (plate, date)
    /// invariants at the store, so a writer racing past the in-transaction
    /// pre-check fails the insert atomically instead of producing a duplicate.
    pub async fn setup_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reservations (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                name          TEXT    NOT NULL,
                license_plate TEXT    NOT NULL,
                spot_number   INTEGER NOT NULL,
                date          TEXT    NOT NULL
            )
            "#,
        )
        .execute(self.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS reservations_spot_date
            ON reservations (spot_number, date)
            "#,
        )
        .execute(self.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS reservations_plate_date
            ON reservations (license_plate, date)
            "#,
        )
        .execute(self.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> ConnectionPool {
    ConnectionPool(SqlitePool::connect_lazy_with(make_sqlite_connect_options(
        cfg,
    )))
}
