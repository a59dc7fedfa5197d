//! Identity port yielding the wallet's active accounts.

use crate::dashboard::domain::AccountAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityProviderResult<T> = Result<T, IdentityProviderError>;

/// Source of the accounts the user has connected.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns connected accounts. The first entry is the active identity;
    /// an empty list means no wallet is connected.
    async fn active_accounts(&self) -> IdentityProviderResult<Vec<AccountAddress>>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    /// The wallet could not be queried.
    #[error("identity provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityProviderError {
    /// Wraps a provider failure.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
