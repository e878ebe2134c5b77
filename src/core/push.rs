//! Push-token acquisition and backend registration.
//!
//! Push registration is a best-effort side channel: user-facing flows must
//! never be blocked or failed by push-infrastructure unavailability. The
//! synchronizer bounds token acquisition with a timeout, skips backend
//! delivery when the token was already acknowledged, and swallows every
//! delivery failure after logging it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::api::types::PushTokenRequest;
use crate::core::credentials::{CredentialStore, keys};
use crate::errors::Result;

/// Platform capability that yields an opaque device push token.
///
/// Implementations bridge the platform notification API. Returning `None`
/// means permission was denied or the device cannot receive pushes; it is
/// not an error.
#[async_trait]
pub trait PushTokenProvider: Send + Sync + std::fmt::Debug {
    /// Requests a device push token, asking for permission if needed.
    async fn request_token(&self) -> Option<String>;
}

/// De-duplicates push-token delivery to the backend.
///
/// Delivery is idempotent per device/token pair: the last token the backend
/// acknowledged is persisted under
/// [`keys::LAST_PUSH_TOKEN_SENT`], and an unchanged token short-circuits
/// without a network call.
#[derive(Debug)]
pub struct PushTokenSynchronizer {
    provider: Arc<dyn PushTokenProvider>,
    api: Arc<ApiClient>,
    store: Arc<dyn CredentialStore>,
    acquire_timeout: Duration,
}

impl PushTokenSynchronizer {
    /// Creates a synchronizer. `acquire_timeout` bounds how long
    /// [`obtain_token`](Self::obtain_token) waits on the platform provider.
    #[must_use]
    pub fn new(
        provider: Arc<dyn PushTokenProvider>,
        api: Arc<ApiClient>,
        store: Arc<dyn CredentialStore>,
        acquire_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            api,
            store,
            acquire_timeout,
        }
    }

    /// Requests a device push token, bounded by the acquisition timeout.
    ///
    /// Timeouts and denied permissions yield `None` rather than an error,
    /// so callers degrade to "no push" silently. Emulators without push
    /// support hang on the permission prompt, which is what the timeout
    /// cuts short.
    pub async fn obtain_token(&self) -> Option<String> {
        match timeout(self.acquire_timeout, self.provider.request_token()).await {
            Ok(Some(token)) => {
                debug!("obtained device push token");
                Some(token)
            }
            Ok(None) => {
                debug!("push token unavailable (permission denied or unsupported device)");
                None
            }
            Err(_) => {
                warn!(
                    "timed out waiting for a device push token after {:?}",
                    self.acquire_timeout
                );
                None
            }
        }
    }

    /// Delivers `token` for `usermail` unless the backend already has it.
    ///
    /// Returns whether a delivery was made. The new token is persisted as
    /// acknowledged only after the backend accepts it, so a failed delivery
    /// is retried on the next sign-in or session restore.
    pub async fn sync_if_needed(&self, usermail: &str, token: &str) -> Result<bool> {
        let last_sent = self.store.get(keys::LAST_PUSH_TOKEN_SENT).await?;
        if last_sent.as_deref() == Some(token) {
            debug!("push token unchanged, skipping backend delivery");
            return Ok(false);
        }

        self.api
            .record_push_token(&PushTokenRequest {
                usermail: usermail.to_string(),
                push_token: token.to_string(),
            })
            .await?;
        self.store.set(keys::LAST_PUSH_TOKEN_SENT, token).await?;

        info!("push token registered with the backend");
        Ok(true)
    }

    /// Obtains a token and synchronizes it, swallowing every failure.
    ///
    /// This is the entry point the session manager spawns after sign-in and
    /// session restore; nothing here may propagate to the caller.
    pub async fn register(&self, usermail: &str) {
        let Some(token) = self.obtain_token().await else {
            return;
        };

        if let Err(e) = self.sync_if_needed(usermail, &token).await {
            warn!("push token registration failed, will retry on next sign-in: {e}");
        }
    }
}
