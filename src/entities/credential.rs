//! Credential entity - Stores key-value pairs for the device-local secure
//! credential store: the bearer token, the serialized user profile, and the
//! last push token acknowledged by the backend.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Credential database model - stores one key-value credential pair
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "credentials")]
pub struct Model {
    /// Credential key (e.g., `"user_token"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Credential value stored as string
    pub value: String,
    /// When this credential was last written
    pub updated_at: DateTime,
}

/// `Credential` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
