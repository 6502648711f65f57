//! Account operations: registration, login, and session state.

use super::{StoreClient, parser};
use crate::constants::endpoints;
use demoblaze_core::{Error, RequestSpec, Result, SecretString};
use serde_json::json;
use tracing::{debug, info};

impl StoreClient {
    /// Registers a new account.
    ///
    /// The backend reports rejections (such as an already-taken username) as
    /// HTTP 200 with an in-band message; those surface as authentication
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank credentials without touching the
    /// network, and an authentication error when the backend rejects the
    /// registration.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<()> {
        validate_credentials(username, password)?;

        let spec = RequestSpec::post(endpoints::SIGNUP)
            .with_json(json!({ "username": username, "password": password }));
        let body = self.call(spec).await?;

        if let Some(message) = parser::error_message(&body) {
            return Err(Error::authentication(message));
        }
        info!(username, "Registered new account");
        Ok(())
    }

    /// Logs in and stores the session token on this client.
    ///
    /// The token stays private to this instance; subsequent calls on the
    /// same client belong to the same logical user session.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank credentials without touching the
    /// network, and an authentication error for wrong credentials, unknown
    /// users, or a response without a token.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use demoblaze_api::store::StoreClient;
    /// # async fn example() -> demoblaze_core::Result<()> {
    /// let store = StoreClient::builder().build()?;
    /// store.login("shopper", "hunter2").await?;
    /// assert!(store.is_authenticated().await);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        validate_credentials(username, password)?;

        let spec = RequestSpec::post(endpoints::LOGIN)
            .with_json(json!({ "username": username, "password": password }));
        let body = self.call(spec).await?;

        if let Some(message) = parser::error_message(&body) {
            return Err(Error::authentication(message));
        }
        let token = parser::extract_auth_token(&body).ok_or_else(|| {
            Error::authentication("login response did not include an auth token")
        })?;

        *self.token.write().await = Some(SecretString::from(token));
        info!(username, "Login succeeded, session token stored");
        Ok(())
    }

    /// Returns a copy of the stored session token, if logged in.
    pub async fn auth_token(&self) -> Option<SecretString> {
        self.token.read().await.clone()
    }

    /// Whether this client currently holds a session token.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Drops the stored session token.
    ///
    /// Later calls behave like an anonymous session until the next
    /// [`login`](Self::login).
    pub async fn clear_session(&self) {
        let dropped = self.token.write().await.take();
        if dropped.is_some() {
            debug!("Cleared stored session token");
        }
    }
}

fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::validation("username must not be empty"));
    }
    if password.is_empty() {
        return Err(Error::validation("password must not be empty"));
    }
    Ok(())
}
