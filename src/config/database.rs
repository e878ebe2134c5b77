//! Credential database configuration for the `BotVips` client core.
//!
//! This module handles the `SQLite` connection backing the on-device
//! credential store and creates its table using `SeaORM`. Table creation
//! uses `Schema::create_table_from_entity` so the database schema always
//! matches the entity definition without manual SQL.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

use crate::entities::Credential;
use crate::errors::Result;

/// Gets the credential database URL from the environment or returns the
/// default local `SQLite` path.
///
/// Looks for `BOTVIPS_CREDENTIALS_DB` (a `.env` file is honored when
/// present) and falls back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("BOTVIPS_CREDENTIALS_DB")
        .unwrap_or_else(|_| "sqlite://data/botvips_credentials.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the credential `SQLite` database.
///
/// Uses [`get_database_url`] to resolve the location, so the store can be
/// relocated (or pointed at `sqlite::memory:` in tests) via the
/// environment.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates the credential table using `SeaORM`'s schema generation from the
/// entity definition.
///
/// Safe to call on every startup: table creation statements are built with
/// `IF NOT EXISTS`, so an already-initialized store is left untouched.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut credential_table = schema.create_table_from_entity(Credential);
    credential_table.if_not_exists();

    db.execute(builder.build(&credential_table)).await?;

    Ok(())
}
