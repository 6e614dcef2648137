//! The login→logout session flow.

use crate::client::Client;
use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use vendepass_protocol::ResponseEnvelope;

/// Login credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("pedrocosta", "senhaSegura79")
    }
}

/// How a login→logout session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Both exchanges completed.
    LoggedOut {
        login: ResponseEnvelope,
        logout: ResponseEnvelope,
    },
    /// Login completed but carried no `Data.token`; logout was not attempted.
    TokenNotFound { login: ResponseEnvelope },
    /// The login exchange failed; nothing else was sent.
    LoginFailed(ClientError),
    /// Login completed but the logout exchange failed.
    LogoutFailed {
        login: ResponseEnvelope,
        error: ClientError,
    },
}

impl SessionOutcome {
    /// Returns the login response, if the login exchange completed.
    pub fn login(&self) -> Option<&ResponseEnvelope> {
        match self {
            SessionOutcome::LoggedOut { login, .. }
            | SessionOutcome::TokenNotFound { login }
            | SessionOutcome::LogoutFailed { login, .. } => Some(login),
            SessionOutcome::LoginFailed(_) => None,
        }
    }

    pub fn is_logged_out(&self) -> bool {
        matches!(self, SessionOutcome::LoggedOut { .. })
    }
}

/// Logs in, then logs out with the token from the login response.
///
/// Issues at most two exchanges. A failed login or a missing token ends the
/// session without contacting the server again.
pub async fn run_session(client: &Client, credentials: &Credentials) -> SessionOutcome {
    tracing::debug!("Logging in as {}", credentials.username);

    let login = match client
        .login(&credentials.username, &credentials.password)
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!("Login exchange failed: {}", e);
            return SessionOutcome::LoginFailed(e);
        }
    };

    let token = match login.token() {
        Some(token) => token.to_string(),
        None => {
            tracing::debug!("Login response carried no token");
            return SessionOutcome::TokenNotFound { login };
        }
    };

    match client.logout(&token).await {
        Ok(logout) => SessionOutcome::LoggedOut { login, logout },
        Err(error) => {
            tracing::warn!("Logout exchange failed: {}", error);
            SessionOutcome::LogoutFailed { login, error }
        }
    }
}
