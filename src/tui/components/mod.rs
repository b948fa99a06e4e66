//! # TUI Components
//!
//! UI building blocks for the terminal interface.
//!
//! Stateless components receive all data as props and just render:
//! - `TitleBar`: app name, summary, and status line
//! - `SignInView`: full-screen sign-in surface shown while unauthenticated
//!
//! Stateful components manage local state and emit events:
//! - `InputBox`: prompt text entry with placeholder and cursor handling
//! - `ResultView` + `ResultViewState`: streamed result text with scrolling
//!
//! Each component file contains its state types, event types, rendering
//! logic, and tests.

mod input_box;
mod result_view;
mod sign_in;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use result_view::{ResultView, ResultViewState};
pub use sign_in::SignInView;
pub use title_bar::TitleBar;
