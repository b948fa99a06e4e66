//! Google identity provider.
//!
//! Interactive sign-in uses the OAuth 2.0 device-authorization grant
//! (RFC 8628): request a device code, show the user a verification URL and
//! a short code, then poll the token endpoint until the user approves,
//! declines, or the code expires. Only the public client id is sent.
//!
//! Silent sign-in is the one-tap analog: validate an ambient token against
//! the tokeninfo endpoint, failing quietly when none is present.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::mpsc::Sender;

use super::provider::{IdentityError, IdentityProvider, Session, SignInNotice};

const DEFAULT_BASE_URL: &str = "https://oauth2.googleapis.com";
const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
const SIGN_IN_SCOPE: &str = "openid email";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_url: String,
    /// Seconds until the device code expires.
    expires_in: u64,
    /// Polling interval in seconds.
    #[serde(default)]
    interval: Option<u64>,
}

/// Token endpoint response. Carries either a token or a polling error code
/// (`authorization_pending`, `slow_down`, `access_denied`, `expired_token`).
#[derive(Deserialize, Debug)]
struct TokenPollResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct GoogleIdentity {
    client_id: String,
    base_url: String,
    /// Pre-issued token for the silent flow (from the environment).
    ambient_token: Option<String>,
    client: reqwest::Client,
}

impl GoogleIdentity {
    /// Creates a new Google identity provider.
    ///
    /// # Arguments
    /// * `client_id` - Public OAuth client identifier
    /// * `base_url` - Optional custom base URL (defaults to Google's OAuth endpoint)
    /// * `ambient_token` - Pre-issued access token for the silent flow, if any
    pub fn new(client_id: String, base_url: Option<String>, ambient_token: Option<String>) -> Self {
        Self {
            client_id,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ambient_token,
            client: reqwest::Client::new(),
        }
    }

    /// Requests a device code and the user-facing verification details.
    async fn request_device_code(&self) -> Result<DeviceCodeResponse, IdentityError> {
        let response = self
            .client
            .post(format!("{}/device/code", self.base_url))
            .form(&[("client_id", self.client_id.as_str()), ("scope", SIGN_IN_SCOPE)])
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Device code request failed: {} - {}", status, message);
            return Err(IdentityError::Api { status, message });
        }

        response
            .json::<DeviceCodeResponse>()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))
    }

    /// One poll of the token endpoint.
    async fn poll_token(&self, device_code: &str) -> Result<Poll, IdentityError> {
        let response = self
            .client
            .post(format!("{}/token", self.base_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("device_code", device_code),
                ("grant_type", DEVICE_GRANT_TYPE),
            ])
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        // Pending/denied outcomes arrive as 4xx with a JSON error code, so
        // the status alone does not decide anything here.
        let poll: TokenPollResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;

        if let Some(access_token) = poll.access_token {
            return Ok(Poll::Granted(Session { access_token }));
        }

        match poll.error.as_deref() {
            Some("authorization_pending") | None => Ok(Poll::Pending),
            Some("slow_down") => Ok(Poll::SlowDown),
            Some("access_denied") => Err(IdentityError::Denied),
            Some("expired_token") => Err(IdentityError::Expired),
            Some(other) => Err(IdentityError::Api {
                status: 400,
                message: other.to_string(),
            }),
        }
    }
}

/// Outcome of one token poll while the user decides.
enum Poll {
    Granted(Session),
    Pending,
    /// RFC 8628: the server wants a longer interval between polls.
    SlowDown,
}

#[async_trait]
impl IdentityProvider for GoogleIdentity {
    fn name(&self) -> &str {
        "google"
    }

    async fn interactive_sign_in(
        &self,
        notices: Sender<SignInNotice>,
    ) -> Result<Session, IdentityError> {
        let device = self.request_device_code().await?;
        info!(
            "Device code issued (user_code: {}, expires_in: {}s)",
            device.user_code, device.expires_in
        );

        // The receiver dropping just means nobody is showing instructions
        // anymore; the flow itself keeps going.
        let _ = notices
            .send(SignInNotice {
                verification_url: device.verification_url.clone(),
                user_code: device.user_code.clone(),
            })
            .await;

        let mut interval = device.interval.unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        let mut remaining = device.expires_in;

        loop {
            match self.poll_token(&device.device_code).await? {
                Poll::Granted(session) => {
                    info!("Interactive sign-in complete");
                    return Ok(session);
                }
                Poll::Pending => {
                    debug!("Authorization pending, polling again in {interval}s")
                }
                Poll::SlowDown => {
                    interval += 5;
                    debug!("Server asked to slow down, new interval {interval}s");
                }
            }

            if remaining < interval {
                return Err(IdentityError::Expired);
            }
            remaining -= interval;
            tokio::time::sleep(Duration::from_secs(interval)).await;
        }
    }

    async fn silent_sign_in(&self) -> Result<Session, IdentityError> {
        let token = match &self.ambient_token {
            Some(t) => t.clone(),
            None => return Err(IdentityError::NoToken),
        };

        let response = self
            .client
            .get(format!("{}/tokeninfo", self.base_url))
            .query(&[("access_token", token.as_str())])
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            debug!("Ambient token rejected: {} - {}", status, message);
            return Err(IdentityError::Api { status, message });
        }

        info!("Silent sign-in complete");
        Ok(Session { access_token: token })
    }

    async fn sign_out(&self, session: Session) -> Result<(), IdentityError> {
        let response = self
            .client
            .post(format!("{}/revoke", self.base_url))
            .form(&[("token", session.access_token.as_str())])
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Token revocation failed: {} - {}", status, message);
            return Err(IdentityError::Api { status, message });
        }

        info!("Token revoked");
        Ok(())
    }
}
