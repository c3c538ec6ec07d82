//! Where image bytes come from.
//!
//! The dispatcher only knows the [`ByteSource`] trait. [`FsByteSource`]
//! reads from the local file system.

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Produces the full contents behind a locator.
#[async_trait]
pub trait ByteSource: Send + Sync {
    async fn read_all_bytes(&self, locator: &str) -> Result<Vec<u8>>;
}

/// Reads locators as file-system paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsByteSource;

#[async_trait]
impl ByteSource for FsByteSource {
    async fn read_all_bytes(&self, locator: &str) -> Result<Vec<u8>> {
        tokio::fs::read(locator)
            .await
            .with_context(|| format!("cannot read {locator}"))
    }
}
