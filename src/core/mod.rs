//! # Core Application Logic
//!
//! This module contains OhMyGPT's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Config (settings)    │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                        ┌────────────┐
//!                        │    TUI     │
//!                        │  Adapter   │
//!                        │ (ratatui)  │
//!                        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Layered settings with defaults
//! - [`state`]: The `App` struct and the explicit session/stream phase
//! - [`action`]: The `Action` enum and the `update()` reducer

pub mod action;
pub mod config;
pub mod state;
