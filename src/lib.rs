//! `BotVips` client core - session, push registration, and dashboard logic
//!
//! This crate provides the non-visual core of the `BotVips` mobile dashboard
//! client: the authenticated-session lifecycle backed by an on-device
//! credential store, best-effort push-token registration, and the metrics
//! dashboard query service. The presentation layer (screens, navigation,
//! charts) consumes these components and is out of scope here.
//!
//! # Wiring example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use botvips_core::api::ApiClient;
//! use botvips_core::config::{api::ApiConfig, database};
//! use botvips_core::core::credentials::{CredentialStore, SqliteCredentialStore};
//! use botvips_core::core::dashboard::DashboardService;
//! use botvips_core::core::push::{PushTokenProvider, PushTokenSynchronizer};
//! use botvips_core::core::session::SessionManager;
//!
//! /// Platform capability stub; a real app bridges the native push API here.
//! #[derive(Debug)]
//! struct NoPush;
//!
//! #[async_trait::async_trait]
//! impl PushTokenProvider for NoPush {
//!     async fn request_token(&self) -> Option<String> {
//!         None
//!     }
//! }
//!
//! # async fn wire() -> botvips_core::errors::Result<()> {
//! let config = ApiConfig::from_env()?;
//! let db = database::create_connection().await?;
//! database::create_tables(&db).await?;
//!
//! let store: Arc<dyn CredentialStore> = Arc::new(SqliteCredentialStore::new(db));
//! let api = Arc::new(ApiClient::new(&config, Arc::clone(&store))?);
//! let push = Arc::new(PushTokenSynchronizer::new(
//!     Arc::new(NoPush),
//!     Arc::clone(&api),
//!     Arc::clone(&store),
//!     config.push_token_timeout,
//! ));
//!
//! let sessions = SessionManager::new(Arc::clone(&store), Arc::clone(&api), push);
//! let dashboards = DashboardService::new(api, sessions.subscribe());
//!
//! // Resolve the persisted session before any screen asks for data.
//! sessions.restore().await;
//! # Ok(())
//! # }
//! ```

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Backend HTTP client - endpoint bindings and wire data types
pub mod api;
/// Configuration management for the API endpoint and credential store
pub mod config;
/// Core client logic - session lifecycle, push sync, dashboard queries
pub mod core;
/// SeaORM entity definitions for the on-device credential store
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
