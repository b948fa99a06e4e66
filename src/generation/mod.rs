//! # Generation Stream
//!
//! Client for the upstream text-generation endpoint. One request in, a
//! sequence of incremental text chunks out.
//!
//! The response body is treated as an opaque stream of byte chunks: each
//! chunk is decoded to text and forwarded immediately, in receipt order,
//! with no framing or delimiter protocol assumed. Accumulation happens in
//! the core reducer, not here.

mod client;
mod types;

pub use client::{GenerationClient, GenerationError};
pub use types::GenerationRequest;
