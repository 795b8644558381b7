//! Composite provider trait.

use crate::composite::types::{CompositeRequest, CompositeResult};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Backend kind for a composite provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini image models.
    Gemini,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

/// Trait for services that can merge a guest photo into a base photo.
///
/// One attempt per call; no retries or cancellation. Implementations hold no
/// per-call state, so a provider can be shared across calls freely.
#[async_trait]
pub trait CompositeProvider: Send + Sync {
    /// Runs one composite generation, returning the merged image and the
    /// prompt that produced it, or a typed failure.
    async fn generate_composite(&self, request: &CompositeRequest) -> Result<CompositeResult>;

    /// Returns the kind of this provider.
    fn kind(&self) -> ProviderKind;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str {
        match self.kind() {
            ProviderKind::Gemini => "Gemini (Google)",
        }
    }

    /// Checks if the provider is reachable and authenticated.
    async fn health_check(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_display() {
        assert_eq!(ProviderKind::Gemini.to_string(), "gemini");
    }
}
