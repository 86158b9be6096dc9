//! Database layer: connection pool, entities, repository.

pub mod entities;
pub mod repository;

pub use repository::{InteractionFilter, InteractionRecord, Paged, Repository, SourceRecord};

use crate::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Build the connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(&config.url);
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(true);

    Database::connect(opts).await
}
