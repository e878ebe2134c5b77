//! Entity module - Contains the SeaORM entity definitions for the on-device
//! credential database. Each entity has a Model struct for data and an
//! Entity struct for operations.

pub mod credential;

// Re-export specific types to avoid conflicts
pub use credential::{Column as CredentialColumn, Entity as Credential, Model as CredentialModel};
