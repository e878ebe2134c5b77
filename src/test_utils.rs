//! Shared test utilities for the `BotVips` client core.
//!
//! Provides common helpers for setting up in-memory credential stores,
//! wiring managers against an `httpmock` backend, and building canned
//! backend payloads.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use httpmock::Method::POST;
use httpmock::{Mock, MockServer};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::api::{ApiClient, SIGN_IN_PATH};
use crate::config::api::ApiConfig;
use crate::core::credentials::{CredentialStore, SqliteCredentialStore};
use crate::core::push::{PushTokenProvider, PushTokenSynchronizer};
use crate::core::session::SessionManager;
use crate::errors::Result;

/// Initializes tracing output for tests; repeated calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` credential store with the table
/// initialized. This is the standard storage setup for all tests.
pub async fn setup_store() -> Result<Arc<dyn CredentialStore>> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(Arc::new(SqliteCredentialStore::new(db)))
}

/// Configuration pointed at a mock server, with timeouts short enough for
/// tests.
#[must_use]
pub fn test_config(base_url: &str) -> ApiConfig {
    ApiConfig::new(base_url)
        .with_request_timeout(Duration::from_secs(2))
        .with_push_token_timeout(Duration::from_millis(100))
}

/// Push provider that answers immediately with a fixed outcome.
#[derive(Debug, Clone)]
pub struct StaticPushProvider {
    token: Option<String>,
}

impl StaticPushProvider {
    /// Provider that yields the given device token.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }

    /// Provider simulating denied permission: yields no token.
    #[must_use]
    pub const fn denied() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl PushTokenProvider for StaticPushProvider {
    async fn request_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Push provider that hangs far beyond any acquisition timeout, simulating
/// an emulator stuck on the permission prompt.
#[derive(Debug)]
pub struct NeverPushProvider;

#[async_trait]
impl PushTokenProvider for NeverPushProvider {
    async fn request_token(&self) -> Option<String> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        None
    }
}

/// Canned successful sign-in response body.
#[must_use]
pub fn sign_in_body(token: &str, name: &str, email: &str) -> serde_json::Value {
    json!({
        "token": token,
        "name": name,
        "email": email,
        "fee": 0.05,
        "stripeAccountId": "acct_test"
    })
}

/// Mocks a successful sign-in for `email` on the given server.
///
/// The mock matches on the e-mail inside the request body, so several
/// sign-in mocks can coexist for different users.
pub fn mock_sign_in<'a>(
    server: &'a MockServer,
    token: &str,
    name: &str,
    email: &str,
) -> Mock<'a> {
    let body = sign_in_body(token, name, email);
    let email = email.to_string();
    server.mock(move |when, then| {
        when.method(POST).path(SIGN_IN_PATH).body_contains(email);
        then.status(200).json_body(body);
    })
}

/// Canned dashboard response body with the given daily graph points, in
/// BRL and with totals derived from the points.
#[must_use]
pub fn dashboard_body(points: &[(&str, i64)]) -> serde_json::Value {
    let billing: i64 = points.iter().map(|(_, value)| value).sum();
    let average_ticket = billing.checked_div(points.len() as i64).unwrap_or(0);
    let graphs: Vec<serde_json::Value> = points
        .iter()
        .map(|(label, value)| json!({ "label": label, "value": value }))
        .collect();

    json!({
        "generalDashboard": {
            "billing": billing,
            "billingToday": 0,
            "billingMonth": billing,
            "averageTicketValue": average_ticket,
            "createdOrdersCount": points.len(),
            "paidOrdersCount": points.len(),
            "pendingOrdersCount": 0,
            "conversionRate": 100.0,
            "graphs": graphs,
            "currency": "BRL"
        },
        "internationalDashboards": []
    })
}

/// Sets up a session manager against the mock server with a fresh
/// in-memory store and a permission-denied push provider.
pub async fn setup_manager(
    server: &MockServer,
) -> Result<(SessionManager, Arc<dyn CredentialStore>)> {
    let store = setup_store().await?;
    setup_manager_with_store(server, store).await
}

/// Sets up a session manager sharing an existing store, simulating a
/// process restart over the same device storage.
pub async fn setup_manager_with_store(
    server: &MockServer,
    store: Arc<dyn CredentialStore>,
) -> Result<(SessionManager, Arc<dyn CredentialStore>)> {
    build_manager(server, store, Arc::new(StaticPushProvider::denied()))
}

/// Sets up a session manager whose push provider yields the given device
/// token.
pub async fn setup_manager_with_push_token(
    server: &MockServer,
    token: &str,
) -> Result<(SessionManager, Arc<dyn CredentialStore>)> {
    let store = setup_store().await?;
    build_manager(
        server,
        store,
        Arc::new(StaticPushProvider::with_token(token)),
    )
}

fn build_manager(
    server: &MockServer,
    store: Arc<dyn CredentialStore>,
    provider: Arc<dyn PushTokenProvider>,
) -> Result<(SessionManager, Arc<dyn CredentialStore>)> {
    let config = test_config(&server.url(""));
    let api = Arc::new(ApiClient::new(&config, Arc::clone(&store))?);
    let push = Arc::new(PushTokenSynchronizer::new(
        provider,
        Arc::clone(&api),
        Arc::clone(&store),
        config.push_token_timeout,
    ));
    let manager = SessionManager::new(Arc::clone(&store), api, push);
    Ok((manager, store))
}
