use async_trait::async_trait;
use brandpulse_core::{RawMention, Source};

use crate::error::SourceError;

/// One platform adapter: searches a single platform for brand mentions.
///
/// Implementations validate their own records (required fields present,
/// parseable timestamps) before returning them. Errors returned here are
/// contained by the orchestrator and degrade to an empty batch.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// The platform this provider collects from.
    fn source(&self) -> Source;

    /// Search the platform for mentions of `brand`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on network failure, a non-success API
    /// response, or missing credentials.
    async fn fetch(&self, brand: &str) -> Result<Vec<RawMention>, SourceError>;
}
