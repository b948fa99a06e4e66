//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Phase, READY_STATUS};
use crate::identity::Session;

/// A fully resolved config with the stock defaults, pointing nowhere.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        app_name: "OhMyGPT".to_string(),
        app_logo: None,
        theme_color: "#22c55e".to_string(),
        summary: "Ask me any thing you want.".to_string(),
        example_input: "Ask me any thing.".to_string(),
        google_client_id: "test-client-id".to_string(),
        endpoint: "http://localhost:0".to_string(),
        access_token: None,
    }
}

pub fn test_session() -> Session {
    Session {
        access_token: "test-token".to_string(),
    }
}

/// Creates a fresh, unauthenticated App.
pub fn test_app() -> App {
    App::new(test_config())
}

/// Creates an App that has already completed a sign-in flow.
pub fn signed_in_app() -> App {
    let mut app = test_app();
    app.phase = Phase::Idle;
    app.session = Some(test_session());
    app.status_message = String::from(READY_STATUS);
    app
}
