use backon::{ExponentialBuilder, Retryable};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::VaultError;

pub type SqlitePool = Pool<Sqlite>;

/// Open the pool, retrying with exponential backoff while the database is unreachable.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, VaultError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let retry_policy = ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(200))
        .with_max_times(5);

    let pool = (|| {
        let opts = connect_opts.clone();
        async move {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(opts)
                .await
        }
    })
    .retry(retry_policy)
    .notify(|err: &sqlx::Error, dur: Duration| {
        warn!(error = %err, retry_in_ms = dur.as_millis() as u64, "database connect failed; retrying");
    })
    .await?;

    Ok(pool)
}

/// Apply the embedded `migrations/` in version order.
pub async fn migrate(pool: &SqlitePool) -> Result<(), VaultError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("database migrations applied");
    Ok(())
}
