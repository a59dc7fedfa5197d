//! In-memory identity provider with a configurable account list.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::dashboard::{
    domain::AccountAddress,
    ports::{IdentityProvider, IdentityProviderError, IdentityProviderResult},
};

/// Identity provider returning a fixed, replaceable list of accounts.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    state: Arc<RwLock<IdentityState>>,
}

#[derive(Debug, Default)]
struct IdentityState {
    accounts: Vec<AccountAddress>,
    failure: Option<String>,
}

fn provider_error(message: impl Into<String>) -> IdentityProviderError {
    IdentityProviderError::provider(std::io::Error::other(message.into()))
}

impl StaticIdentityProvider {
    /// Creates a provider with `account` connected.
    #[must_use]
    pub fn connected(account: AccountAddress) -> Self {
        Self::with_accounts(vec![account])
    }

    /// Creates a provider with no connected account.
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Creates a provider returning `accounts` in order.
    #[must_use]
    pub fn with_accounts(accounts: Vec<AccountAddress>) -> Self {
        Self {
            state: Arc::new(RwLock::new(IdentityState {
                accounts,
                failure: None,
            })),
        }
    }

    /// Replaces the connected accounts.
    ///
    /// # Errors
    ///
    /// Returns provider errors when lock acquisition fails.
    pub fn set_accounts(&self, accounts: Vec<AccountAddress>) -> IdentityProviderResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| provider_error(err.to_string()))?;
        state.accounts = accounts;
        Ok(())
    }

    /// Makes subsequent queries fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns provider errors when lock acquisition fails.
    pub fn set_unavailable(&self, message: impl Into<String>) -> IdentityProviderResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| provider_error(err.to_string()))?;
        state.failure = Some(message.into());
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn active_accounts(&self) -> IdentityProviderResult<Vec<AccountAddress>> {
        let state = self
            .state
            .read()
            .map_err(|err| provider_error(err.to_string()))?;
        if let Some(message) = &state.failure {
            return Err(provider_error(message.clone()));
        }
        Ok(state.accounts.clone())
    }
}
