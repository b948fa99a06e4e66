use serde::{Deserialize, Serialize};

/// JSON payload for the generation endpoint: `{"input": "..."}`.
///
/// `input` carries the effective prompt - the typed text, or the configured
/// example prompt when the input field was empty at submit time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub input: String,
}

impl GenerationRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}
