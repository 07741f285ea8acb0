use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

/// Infrastructure provider owning inventory shown in the console.
///
/// Entities keep only a weak reference to their provider.
#[async_trait]
pub trait Provider: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Key the provider is known by in test data.
    fn key(&self) -> &str;

    /// Ask the console to re-sync the provider's inventory relationships.
    async fn refresh_provider_relationships(&self) -> Result<()>;
}
