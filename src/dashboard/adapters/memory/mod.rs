//! In-memory adapters for dashboard ports.

mod identity;
mod ledger;

pub use identity::StaticIdentityProvider;
pub use ledger::{InMemoryLedger, LedgerCall, LedgerTaskSeed};
