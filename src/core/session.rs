//! Authenticated-session lifecycle.
//!
//! [`SessionManager`] owns the session state machine: `Unknown` at boot,
//! resolved to `Authenticated` or `Unauthenticated` by [`restore`]
//! (exactly once per app start), and moved between the resolved states by
//! [`sign_in`] and [`sign_out`]. State changes are published through a
//! `tokio::sync::watch` channel so consumers receive the current session
//! as an explicit dependency instead of reading ambient globals.
//!
//! [`restore`]: SessionManager::restore
//! [`sign_in`]: SessionManager::sign_in
//! [`sign_out`]: SessionManager::sign_out

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::api::types::{SignInRequest, SignUpRequest, UserProfile};
use crate::core::credentials::{CredentialStore, keys};
use crate::core::push::PushTokenSynchronizer;
use crate::errors::{Error, Result};

/// Generic sign-in failure message. Backend detail is logged, never shown.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Login failed. Check your credentials.";

/// Fallback registration failure message for transport errors, where no
/// backend detail exists to surface.
pub const SIGN_UP_FAILED_MESSAGE: &str = "Could not create the account. Try again.";

/// The authenticated identity and credential held for the current login.
///
/// Never mutated in place; a fresh sign-in replaces the whole value.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque bearer credential
    pub token: String,
    /// Profile of the signed-in user
    pub user: UserProfile,
}

/// Where the client is in the authentication lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Boot state: the persisted session has not been inspected yet.
    #[default]
    Unknown,
    /// A user is signed in.
    Authenticated(Session),
    /// No user is signed in.
    Unauthenticated,
}

impl SessionState {
    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Whether the boot-time restore has resolved this state.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The current session, when authenticated.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Owns the session state machine and the persisted credentials.
///
/// All other components observe the session read-only via
/// [`subscribe`](Self::subscribe); only this manager writes the
/// `user_token` and `user_data` keys.
#[derive(Debug)]
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    api: Arc<ApiClient>,
    push: Arc<PushTokenSynchronizer>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Creates a manager in the `Unknown` state.
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStore>,
        api: Arc<ApiClient>,
        push: Arc<PushTokenSynchronizer>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            store,
            api,
            push,
            state,
        }
    }

    /// Subscribes to session state changes. The receiver immediately sees
    /// the current state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// A snapshot of the current session state.
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Restores the persisted session from the credential store.
    ///
    /// Publishes `Authenticated` when both the token and a parseable
    /// profile are present, `Unauthenticated` otherwise. This operation
    /// always terminates without an error: storage failures and corrupt
    /// profiles are logged and resolve to `Unauthenticated`, so the app
    /// always leaves the `Unknown` loading state. A restored session also
    /// re-triggers push registration in the background.
    pub async fn restore(&self) -> SessionState {
        debug!("restoring persisted session");

        let token = self.read_or_none(keys::USER_TOKEN).await;
        let profile_json = self.read_or_none(keys::USER_DATA).await;

        let next = match (token, profile_json) {
            (Some(token), Some(profile_json)) => {
                match serde_json::from_str::<UserProfile>(&profile_json) {
                    Ok(user) => {
                        info!(email = %user.email, "restored stored session");
                        SessionState::Authenticated(Session { token, user })
                    }
                    Err(e) => {
                        warn!("stored profile is unreadable, treating as signed out: {e}");
                        SessionState::Unauthenticated
                    }
                }
            }
            _ => {
                debug!("no stored session found");
                SessionState::Unauthenticated
            }
        };

        self.state.send_replace(next.clone());

        if let SessionState::Authenticated(session) = &next {
            self.spawn_push_registration(session.user.email.clone());
        }

        next
    }

    /// Signs in against the backend and persists the session.
    ///
    /// Token and profile are written atomically: if either write fails the
    /// sign-in is not considered complete and no state is published. Every
    /// failure surfaces as [`Error::Auth`] with one generic message; the
    /// cause is logged. Push registration is spawned as a detached task and
    /// can never fail the sign-in.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let session = match self.try_sign_in(email, password).await {
            Ok(session) => session,
            Err(e) => {
                warn!("sign-in failed: {e}");
                return Err(Error::Auth {
                    message: SIGN_IN_FAILED_MESSAGE.to_string(),
                });
            }
        };

        info!(email = %session.user.email, "signed in");
        self.state
            .send_replace(SessionState::Authenticated(session.clone()));
        self.spawn_push_registration(session.user.email.clone());

        Ok(session)
    }

    /// Registers a new account. No session is established; the user signs
    /// in afterwards.
    ///
    /// Registration errors are meaningful to the user ("email already in
    /// use"), so backend error bodies surface verbatim as
    /// [`Error::Registration`].
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        affiliate_code: Option<&str>,
    ) -> Result<()> {
        let request = SignUpRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            affiliate_indication: affiliate_code.map(ToString::to_string),
        };

        match self.api.sign_up(&request).await {
            Ok(()) => {
                info!(%email, "account registered");
                Ok(())
            }
            Err(Error::Api { body, .. }) if !body.is_empty() => {
                Err(Error::Registration { message: body })
            }
            Err(e) => {
                warn!("sign-up failed without backend detail: {e}");
                Err(Error::Registration {
                    message: SIGN_UP_FAILED_MESSAGE.to_string(),
                })
            }
        }
    }

    /// Signs out: deletes the persisted credentials and publishes an empty
    /// session. Calling while already signed out is a no-op success.
    pub async fn sign_out(&self) -> Result<()> {
        self.store.delete(keys::USER_TOKEN).await?;
        self.store.delete(keys::USER_DATA).await?;
        self.state.send_replace(SessionState::Unauthenticated);
        info!("signed out");
        Ok(())
    }

    async fn try_sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .api
            .sign_in(&SignInRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        let profile_json = serde_json::to_string(&response.user)?;
        self.store
            .set_many(&[
                (keys::USER_TOKEN, response.token.as_str()),
                (keys::USER_DATA, profile_json.as_str()),
            ])
            .await?;

        Ok(Session {
            token: response.token,
            user: response.user,
        })
    }

    /// Fire-and-forget push registration with its own error boundary. The
    /// session flows never await this task.
    fn spawn_push_registration(&self, usermail: String) {
        let push = Arc::clone(&self.push);
        drop(tokio::spawn(async move {
            push.register(&usermail).await;
        }));
    }

    async fn read_or_none(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("credential store read failed during restore: {e}");
                None
            }
        }
    }
}
