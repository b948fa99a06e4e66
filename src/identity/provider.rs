use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

/// Errors that can occur during identity operations.
#[derive(Debug)]
pub enum IdentityError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The provider returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
    /// The user declined the authorization request.
    Denied,
    /// The device code expired before the user approved it.
    Expired,
    /// No ambient token is available for the silent flow.
    NoToken,
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::Network(msg) => write!(f, "network error: {msg}"),
            IdentityError::Api { status, message } => {
                write!(f, "identity provider error (HTTP {status}): {message}")
            }
            IdentityError::Parse(msg) => write!(f, "parse error: {msg}"),
            IdentityError::Denied => write!(f, "authorization denied by user"),
            IdentityError::Expired => write!(f, "authorization request expired"),
            IdentityError::NoToken => write!(f, "no ambient access token available"),
        }
    }
}

impl std::error::Error for IdentityError {}

/// An authenticated session. Held in memory only; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
}

/// Mid-flow instruction for the user: where to go and what to enter.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInNotice {
    pub verification_url: String,
    pub user_code: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Runs the interactive sign-in flow to completion, sending user-facing
    /// instructions (verification URL, user code) to the provided channel.
    async fn interactive_sign_in(
        &self,
        notices: Sender<SignInNotice>,
    ) -> Result<Session, IdentityError>;

    /// Attempts a sign-in with no user interaction, e.g. by validating an
    /// ambient token. Expected to fail quietly when nothing is available.
    async fn silent_sign_in(&self) -> Result<Session, IdentityError>;

    /// Invalidates the session token provider-side. Local session state is
    /// cleared by the caller regardless of the outcome.
    async fn sign_out(&self, session: Session) -> Result<(), IdentityError>;
}
