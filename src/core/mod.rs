//! Core client logic.
//!
//! Framework-agnostic components consumed by the presentation layer:
//! credential persistence, the session lifecycle, push-token
//! synchronization, dashboard queries, and money display helpers.

/// Credential store trait, keys, and the `SQLite` implementation
pub mod credentials;
/// Dashboard query service and result normalization
pub mod dashboard;
/// Minor-currency-unit display formatting
pub mod money;
/// Push-token acquisition and de-duplicated backend delivery
pub mod push;
/// Authenticated-session lifecycle and state publishing
pub mod session;
