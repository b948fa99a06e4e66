//! # Application State
//!
//! Core business state for OhMyGPT. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── phase: Phase              // Unauthenticated | Idle | Streaming
//! ├── session: Option<Session>  // provider token while signed in
//! ├── result: Option<String>    // accumulated response text
//! ├── status_message: String    // status bar text
//! └── config: ResolvedConfig    // display values, example prompt, endpoint
//! ```
//!
//! The phase is one explicit enum rather than independent `signed_in` /
//! `receiving` booleans, so invalid combinations (streaming while signed
//! out) cannot be represented. `result` distinguishes "no request yet
//! issued" (`None`) from "request in flight or completed" (`Some`), even
//! when the accumulated text is still empty.
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::ResolvedConfig;
use crate::identity::Session;

/// Composite UI phase. Transitions are owned by `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Everything except the sign-in surface is unreachable.
    Unauthenticated,
    /// Signed in, no stream in flight. Submission allowed.
    Idle,
    /// A stream read loop is active. Submission rejected.
    Streaming,
}

pub const SIGNED_OUT_STATUS: &str = "Please sign in to continue";
pub const READY_STATUS: &str = "Ready";

pub struct App {
    pub phase: Phase,
    pub session: Option<Session>,
    /// `None` until the first request is issued; reset to `Some("")` at
    /// each submission and appended to per received chunk.
    pub result: Option<String>,
    pub status_message: String,
    pub config: ResolvedConfig,
}

impl App {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            phase: Phase::Unauthenticated,
            session: None,
            result: None,
            status_message: String::from(SIGNED_OUT_STATUS),
            config,
        }
    }

    /// True while a stream read loop is active. Gates re-submission.
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Streaming
    }

    /// The prompt actually sent: the typed text if non-empty, else the
    /// configured example prompt. No trimming.
    pub fn effective_prompt(&self, raw: &str) -> String {
        if raw.is_empty() {
            self.config.example_input.clone()
        } else {
            raw.to_string()
        }
    }
}
