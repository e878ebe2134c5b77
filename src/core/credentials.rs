//! Device-local credential persistence.
//!
//! The store is a small key-value table holding the bearer token, the
//! serialized user profile, and the last push token acknowledged by the
//! backend. It is exposed as a trait so the session manager and push
//! synchronizer stay independent of the storage backend; the shipped
//! implementation persists through `SeaORM` into `SQLite`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set,
    TransactionTrait,
};
use tracing::{debug, instrument};

use crate::entities::{Credential, credential};
use crate::errors::Result;

/// Well-known credential keys.
pub mod keys {
    /// Bearer token of the signed-in user.
    pub const USER_TOKEN: &str = "user_token";
    /// JSON-serialized [`crate::api::types::UserProfile`].
    pub const USER_DATA: &str = "user_data";
    /// Last push token the backend acknowledged.
    pub const LAST_PUSH_TOKEN_SENT: &str = "last_push_token_sent";
}

/// Durable key-value storage for client credentials.
///
/// Writes are not concurrent by construction (one logical session per
/// device), so implementations need durability and atomicity for
/// [`set_many`](CredentialStore::set_many), not locking.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Reads the value for `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Writes every pair or none of them.
    async fn set_many(&self, pairs: &[(&str, &str)]) -> Result<()>;

    /// Removes `key`. Removing an absent key is a no-op success.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Credential store backed by the local `SQLite` database.
#[derive(Debug, Clone)]
pub struct SqliteCredentialStore {
    db: DatabaseConnection,
}

impl SqliteCredentialStore {
    /// Wraps an established connection. The schema must already exist, see
    /// [`crate::config::database::create_tables`].
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Inserts or replaces one key-value pair on any connection type, so the
/// same logic serves single writes and transactions.
async fn upsert<C: ConnectionTrait>(conn: &C, key: &str, value: &str) -> Result<()> {
    match Credential::find_by_id(key.to_owned()).one(conn).await? {
        Some(existing) => {
            let mut record = existing.into_active_model();
            record.value = Set(value.to_owned());
            record.updated_at = Set(Utc::now().naive_utc());
            record.update(conn).await?;
        }
        None => {
            let record = credential::ActiveModel {
                key: Set(key.to_owned()),
                value: Set(value.to_owned()),
                updated_at: Set(Utc::now().naive_utc()),
            };
            record.insert(conn).await?;
        }
    }

    Ok(())
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = Credential::find_by_id(key.to_owned())
            .one(&self.db)
            .await?
            .map(|record| record.value);
        debug!("credential '{}' present: {}", key, value.is_some());
        Ok(value)
    }

    // Values are secrets; log keys only.
    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        upsert(&self.db, key, value).await?;
        debug!("stored credential '{}'", key);
        Ok(())
    }

    #[instrument(skip(self, pairs))]
    async fn set_many(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let txn = self.db.begin().await?;
        for (key, value) in pairs {
            upsert(&txn, key, value).await?;
        }
        txn.commit().await?;
        debug!("stored {} credentials atomically", pairs.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<()> {
        Credential::delete_by_id(key.to_owned())
            .exec(&self.db)
            .await?;
        debug!("deleted credential '{}'", key);
        Ok(())
    }
}
