//! Narrowing of ledger tasks to those owned by the active account.

use crate::dashboard::{
    domain::{AccountAddress, Task},
    ports::{IdentityProvider, IdentityProviderError},
};
use std::sync::Arc;
use thiserror::Error;

/// The active account could not be determined.
#[derive(Debug, Clone, Error)]
pub enum IdentityUnavailableError {
    /// No wallet account is connected.
    #[error("no wallet account is connected")]
    NoActiveAccount,

    /// The wallet could not be queried.
    #[error(transparent)]
    Provider(#[from] IdentityProviderError),
}

/// Resolves the active account and filters tasks by owner.
pub struct OwnershipFilter<I>
where
    I: IdentityProvider,
{
    identity: Arc<I>,
}

impl<I> OwnershipFilter<I>
where
    I: IdentityProvider,
{
    /// Creates a filter backed by `identity`.
    #[must_use]
    pub const fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Returns the active account, the first connected one.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityUnavailableError::NoActiveAccount`] when no account
    /// is connected, or the provider's failure.
    pub async fn active_identity(&self) -> Result<AccountAddress, IdentityUnavailableError> {
        self.identity
            .active_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(IdentityUnavailableError::NoActiveAccount)
    }
}

/// Keeps the tasks whose provider is `owner`, compared case-insensitively.
///
/// The result is a subset of `tasks` in the original order.
#[must_use]
pub fn filter_owned(tasks: Vec<Task>, owner: &AccountAddress) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| task.is_owned_by(owner))
        .collect()
}
