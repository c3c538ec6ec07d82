//! The dispatch boundary.
//!
//! Every request is validated, forwarded to the [`GenerativeClient`] at most
//! once, and resolved to a [`DispatchOutcome`]. Nothing raised by a
//! collaborator gets past [`Dispatcher`].

mod outcome;

pub use outcome::{DispatchOutcome, OutcomeStatus};

use anyhow::{Result, anyhow};
use std::sync::Arc;

use crate::client::{GenerativeClient, ImageMimeType, ImagePrompt, Message};
use crate::consts::{DEFAULT_IMAGE_INSTRUCTION, DEFAULT_IMAGE_LOCATOR};
use crate::source::ByteSource;

pub const EMPTY_TEXT: &str = "Input text cannot be empty.";
pub const EMPTY_MESSAGES: &str = "Messages list cannot be null or empty.";
pub const IMAGE_READ_FAILED: &str = "Failed to read image file";
pub const TEXT_FAILED: &str = "Text prompt failed.";
pub const IMAGE_FAILED: &str = "Image prompt failed.";

/// One inbound request, by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptRequest {
    /// `None` stands for a missing value.
    Text { text: Option<String> },
    /// The image and its instruction come from [`DispatchConfig`].
    Image,
    Conversation { turns: Option<Vec<Message>> },
}

/// Fixed inputs of the image shape.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub image_locator: String,
    pub image_instruction: String,
    pub image_mime: ImageMimeType,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            image_locator: DEFAULT_IMAGE_LOCATOR.to_string(),
            image_instruction: DEFAULT_IMAGE_INSTRUCTION.to_string(),
            image_mime: ImageMimeType::Jpeg,
        }
    }
}

/// Validates requests and forwards them to the client. Cheap to clone;
/// holds no per-request state.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn GenerativeClient>,
    source: Arc<dyn ByteSource>,
    config: Arc<DispatchConfig>,
}

impl Dispatcher {
    pub fn new(
        client: Arc<dyn GenerativeClient>,
        source: Arc<dyn ByteSource>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            client,
            source,
            config: Arc::new(config),
        }
    }

    /// Route a request to the matching handler.
    pub async fn handle(&self, request: PromptRequest) -> DispatchOutcome {
        match request {
            PromptRequest::Text { text } => self.handle_text_prompt(text.as_deref()).await,
            PromptRequest::Image => self.handle_image_prompt().await,
            PromptRequest::Conversation { turns } => {
                self.handle_conversation_prompt(turns.as_deref()).await
            }
        }
    }

    pub async fn handle_text_prompt(&self, text: Option<&str>) -> DispatchOutcome {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return log_outcome("text", DispatchOutcome::rejected(EMPTY_TEXT));
        };

        let result = self.client.submit_text(text).await;
        log_outcome("text", resolve(result, TEXT_FAILED))
    }

    pub async fn handle_image_prompt(&self) -> DispatchOutcome {
        let image_bytes = match self.read_image().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return log_outcome(
                    "image",
                    DispatchOutcome::rejected(format!("{IMAGE_READ_FAILED}: {e}")),
                );
            }
        };

        let prompt = ImagePrompt {
            instruction: self.config.image_instruction.clone(),
            image_bytes,
            mime_type: self.config.image_mime,
        };

        let result = self.client.submit_image(&prompt).await;
        log_outcome("image", resolve(result, IMAGE_FAILED))
    }

    pub async fn handle_conversation_prompt(&self, turns: Option<&[Message]>) -> DispatchOutcome {
        let Some(turns) = turns.filter(|t| !t.is_empty()) else {
            return log_outcome("conversation", DispatchOutcome::rejected(EMPTY_MESSAGES));
        };

        let result = self.client.submit_conversation(turns).await;
        log_outcome("conversation", resolve(result, TEXT_FAILED))
    }

    async fn read_image(&self) -> Result<Vec<u8>> {
        let bytes = self
            .source
            .read_all_bytes(&self.config.image_locator)
            .await?;
        if bytes.is_empty() {
            return Err(anyhow!("image is empty"));
        }
        Ok(bytes)
    }
}

/// Map a client result onto an outcome. An empty payload counts as no
/// result.
fn resolve(result: Result<Option<String>>, failed: &str) -> DispatchOutcome {
    match result {
        Ok(Some(payload)) if !payload.is_empty() => DispatchOutcome::accepted(payload),
        Ok(_) => DispatchOutcome::rejected(failed),
        Err(e) => DispatchOutcome::faulted(&e),
    }
}

fn log_outcome(shape: &str, outcome: DispatchOutcome) -> DispatchOutcome {
    match &outcome {
        DispatchOutcome::Accepted { payload } => {
            tracing::debug!(shape, bytes = payload.len(), "prompt accepted");
        }
        DispatchOutcome::Rejected { reason } => {
            tracing::warn!(shape, %reason, "prompt rejected");
        }
        DispatchOutcome::Faulted { message } => {
            tracing::error!(shape, %message, "prompt faulted");
        }
    }
    outcome
}
