use std::fmt;

use log::{debug, info, warn};
use tokio::sync::mpsc::Sender;

use super::types::GenerationRequest;

/// Errors that can occur while requesting or consuming a generation stream.
#[derive(Debug)]
pub enum GenerationError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The endpoint returned a non-success status. The result buffer is
    /// left untouched by the caller.
    Api { status: u16, message: String },
    /// Success status but the body carried no readable chunks.
    EmptyBody,
    /// The mpsc channel was closed (the UI dropped the receiver).
    ChannelClosed,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Network(msg) => write!(f, "network error: {msg}"),
            GenerationError::Api { status, message } => {
                write!(f, "generation endpoint error (HTTP {status}): {message}")
            }
            GenerationError::EmptyBody => write!(f, "response carried no readable body"),
            GenerationError::ChannelClosed => write!(f, "channel closed"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// HTTP client for the generation endpoint.
pub struct GenerationClient {
    base_url: String,
    client: reqwest::Client,
}

impl GenerationClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Issues the generation request and streams decoded response text to
    /// the provided channel, one send per received chunk, in receipt order.
    ///
    /// Runs until the body is exhausted. No timeout, no retry: a failure
    /// surfaces once and the caller decides nothing beyond going idle.
    pub async fn stream_generation(
        &self,
        request: &GenerationRequest,
        sender: Sender<String>,
    ) -> Result<(), GenerationError> {
        info!(
            "Generation request: {} bytes of input",
            request.input.len()
        );

        let mut response = self
            .client
            .post(format!("{}/api/request", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        debug!("Generation response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Generation endpoint error: {} - {}", status, message);
            return Err(GenerationError::Api { status, message });
        }

        let mut chunk_count = 0usize;
        let mut total_len = 0usize;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?
        {
            // One decode per chunk. A multibyte sequence split across a
            // chunk boundary decodes lossily, same as the transport-naive
            // decoder this mirrors.
            let text = String::from_utf8_lossy(&chunk).into_owned();
            chunk_count += 1;
            total_len += text.len();
            debug!("Chunk {} received ({} bytes)", chunk_count, chunk.len());

            if sender.send(text).await.is_err() {
                warn!("Chunk send failed: receiver dropped");
                return Err(GenerationError::ChannelClosed);
            }
        }

        if chunk_count == 0 {
            warn!("Response had success status but no readable body");
            return Err(GenerationError::EmptyBody);
        }

        info!(
            "Stream exhausted: {} chunks, {} content bytes",
            chunk_count, total_len
        );
        Ok(())
    }
}
