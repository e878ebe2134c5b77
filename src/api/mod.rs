//! HTTP client for the `BotVips` backend.
//!
//! [`ApiClient`] wraps a `reqwest` client configured with the request
//! timeout and base URL from [`crate::config::api::ApiConfig`]. Before every
//! request it reads the bearer token from the credential store and attaches
//! an `Authorization` header when one is present, mirroring the request
//! interceptor of the reference client.

/// Wire data types (camelCase serde contracts)
pub mod types;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::api::ApiConfig;
use crate::core::credentials::{CredentialStore, keys};
use crate::errors::{Error, Result};
use self::types::{
    DashboardRequest, DashboardResult, PushTokenRequest, SignInRequest, SignInResponse,
    SignUpRequest,
};

// Endpoint paths match the deployed backend routes verbatim, including the
// historical "singin"/"singup" spellings it still serves.
/// Path of the sign-in endpoint.
pub const SIGN_IN_PATH: &str = "/user/singin";
/// Path of the registration endpoint.
pub const SIGN_UP_PATH: &str = "/user/singup";
/// Path of the push-token registration endpoint.
pub const PUSH_TOKEN_PATH: &str = "/user/record/push-token";
/// Path of the dashboard metrics endpoint.
pub const DASHBOARD_PATH: &str = "/user/dashboard";

/// Client for the `BotVips` backend API.
///
/// Cheap to share behind an `Arc`; the underlying `reqwest::Client` pools
/// connections internally.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Builds a client from the configuration, reading bearer tokens from
    /// the given credential store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ApiConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    /// Calls `POST /user/singin` and parses the token-plus-profile payload.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse> {
        let response = self.post_json(SIGN_IN_PATH, request).await?;
        parse_json(response).await
    }

    /// Calls `POST /user/singup`. A successful registration returns no
    /// body; error bodies are user-displayable strings and surface inside
    /// `Error::Api`.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<()> {
        let response = self.post_json(SIGN_UP_PATH, request).await?;
        expect_success(response).await
    }

    /// Calls `POST /user/record/push-token`.
    pub async fn record_push_token(&self, request: &PushTokenRequest) -> Result<()> {
        let response = self.post_json(PUSH_TOKEN_PATH, request).await?;
        expect_success(response).await
    }

    /// Calls `POST /user/dashboard` and parses the metrics payload.
    pub async fn dashboard(&self, request: &DashboardRequest) -> Result<DashboardResult> {
        let response = self.post_json(DASHBOARD_PATH, request).await?;
        parse_json(response).await
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let mut request = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body);

        if let Some(token) = self.bearer_token().await {
            request = request.bearer_auth(token);
        }

        debug!("POST {path}");
        Ok(request.send().await?)
    }

    /// Reads the stored bearer token. A store failure degrades to an
    /// unauthenticated request rather than aborting the call.
    async fn bearer_token(&self) -> Option<String> {
        match self.store.get(keys::USER_TOKEN).await {
            Ok(token) => token,
            Err(e) => {
                warn!("credential store read failed, sending request without token: {e}");
                None
            }
        }
    }
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(Into::into)
}

async fn expect_success(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(())
}
