//! # Actions
//!
//! Everything that can happen in OhMyGPT becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! A response chunk arrives? That's `Action::StreamChunk(text)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing what I/O (if any) the
//! caller should perform. No side effects here beyond logging. I/O happens
//! in the TUI event loop.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: feed a sequence of actions, assert on
//! the resulting state. And debuggable: log every action, replay the
//! exact session.

use log::{debug, info, warn};

use crate::core::state::{App, Phase, READY_STATUS, SIGNED_OUT_STATUS};
use crate::identity::Session;

#[derive(Debug)]
pub enum Action {
    /// User requested a sign-in from the sign-in surface.
    SignInRequested,
    /// Interactive flow needs the user to visit a URL and enter a code.
    SignInPrompt {
        verification_url: String,
        user_code: String,
    },
    /// A sign-in flow (interactive or silent) completed successfully.
    SignedIn(Session),
    /// A sign-in flow failed. Diagnostic only; state is unchanged.
    SignInFailed(String),
    /// User signed out. Resets everything client-side.
    SignOut,
    /// User submitted the input field (raw contents, possibly empty).
    Submit(String),
    /// One decoded chunk of streamed response text.
    StreamChunk(String),
    /// The response body was exhausted.
    StreamDone,
    /// The request failed (non-success status, missing body, transport).
    StreamFailed(String),
    Quit,
}

/// I/O the event loop must perform after a state transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Start the interactive sign-in flow.
    SpawnSignIn,
    /// Issue the generation request with the effective prompt.
    SpawnRequest(String),
    /// Best-effort provider-side token revocation for this session.
    RevokeSession(Session),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::SignInRequested => {
            if app.phase != Phase::Unauthenticated {
                debug!("Sign-in requested while already signed in, ignoring");
                return Effect::None;
            }
            app.status_message = String::from("Signing in...");
            Effect::SpawnSignIn
        }

        Action::SignInPrompt {
            verification_url,
            user_code,
        } => {
            if app.phase == Phase::Unauthenticated {
                app.status_message =
                    format!("Visit {verification_url} and enter code {user_code}");
            }
            Effect::None
        }

        Action::SignedIn(session) => {
            if app.phase != Phase::Unauthenticated {
                debug!("Duplicate sign-in completion, ignoring");
                return Effect::None;
            }
            info!("Signed in");
            app.session = Some(session);
            app.phase = Phase::Idle;
            app.status_message = String::from(READY_STATUS);
            Effect::None
        }

        Action::SignInFailed(reason) => {
            // Non-fatal: reported on the diagnostic channel only, the user
            // must re-invoke sign-in. No retry.
            warn!("Sign-in failed: {reason}");
            if app.phase == Phase::Unauthenticated {
                app.status_message = String::from(SIGNED_OUT_STATUS);
            }
            Effect::None
        }

        Action::SignOut => {
            info!("Signing out");
            app.phase = Phase::Unauthenticated;
            app.result = None;
            app.status_message = String::from(SIGNED_OUT_STATUS);
            match app.session.take() {
                Some(session) => Effect::RevokeSession(session),
                None => Effect::None,
            }
        }

        Action::Submit(raw) => match app.phase {
            Phase::Unauthenticated => {
                warn!("Submission while signed out, rejecting");
                Effect::None
            }
            // A disabled control is not enough: reject in-flight
            // re-submission here, where it cannot be bypassed.
            Phase::Streaming => {
                warn!("Submission while a stream is in flight, rejecting");
                Effect::None
            }
            Phase::Idle => {
                let prompt = app.effective_prompt(&raw);
                app.result = Some(String::new());
                app.phase = Phase::Streaming;
                app.status_message = String::from("Generating...");
                Effect::SpawnRequest(prompt)
            }
        },

        Action::StreamChunk(text) => {
            if app.phase != Phase::Streaming {
                debug!("Dropping stale chunk ({} bytes)", text.len());
                return Effect::None;
            }
            app.result.get_or_insert_with(String::new).push_str(&text);
            Effect::None
        }

        Action::StreamDone => {
            if app.phase != Phase::Streaming {
                debug!("StreamDone outside of a stream, ignoring");
                return Effect::None;
            }
            info!(
                "Stream finished ({} bytes accumulated)",
                app.result.as_deref().map_or(0, str::len)
            );
            app.phase = Phase::Idle;
            app.status_message = String::from(READY_STATUS);
            Effect::None
        }

        Action::StreamFailed(reason) => {
            // The busy state clears on every exit path; the buffer is left
            // at its current value. No retry, no partial-result recovery.
            warn!("Request failed: {reason}");
            if app.phase == Phase::Streaming {
                app.phase = Phase::Idle;
                app.status_message = String::from(READY_STATUS);
            }
            Effect::None
        }
    }
}
