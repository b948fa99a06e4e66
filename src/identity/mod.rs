//! # Identity Gate
//!
//! Sign-in gating via a third-party identity provider. Nothing past the
//! sign-in surface is reachable until a flow completes successfully.
//!
//! The [`IdentityProvider`] trait is the seam: flows are async operations
//! returning a `Result` rather than fire-and-forget callbacks, so the
//! caller awaits the outcome and updates session state in one place.
//! [`GoogleIdentity`] implements it with the OAuth 2.0 device-authorization
//! grant (interactive) and an ambient-token probe (silent), configured by
//! a single public client identifier.
//!
//! The gate holds no expiry knowledge: a [`Session`] is a one-shot value
//! set by a completed flow, not a continuously validated token.

mod google;
mod provider;

pub use google::GoogleIdentity;
pub use provider::{IdentityError, IdentityProvider, Session, SignInNotice};
