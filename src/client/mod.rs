pub mod gemini;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A single turn in a conversation. Opaque to the dispatch layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            content: content.into(),
        }
    }
}

/// Image encodings the remote model accepts inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMimeType {
    #[default]
    Jpeg,
    Png,
    Webp,
    Heic,
    Heif,
}

impl ImageMimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
            ImageMimeType::Webp => "image/webp",
            ImageMimeType::Heic => "image/heic",
            ImageMimeType::Heif => "image/heif",
        }
    }
}

/// An image plus the instruction describing what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrompt {
    pub instruction: String,
    pub image_bytes: Vec<u8>,
    pub mime_type: ImageMimeType,
}

/// The remote generative model. Could be Gemini, a stub, or a test script.
///
/// `Ok(None)` means the call completed but produced nothing usable.
/// `Err` means the call itself failed.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn submit_text(&self, text: &str) -> Result<Option<String>>;
    async fn submit_image(&self, prompt: &ImagePrompt) -> Result<Option<String>>;
    async fn submit_conversation(&self, turns: &[Message]) -> Result<Option<String>>;
}
