//! Port contracts for the owner dashboard.
//!
//! Ports define infrastructure-agnostic interfaces to the ledger and the
//! wallet used by dashboard services.

pub mod identity;
pub mod ledger;

pub use identity::{IdentityProvider, IdentityProviderError, IdentityProviderResult};
pub use ledger::{
    LedgerError, LedgerGateway, LedgerResult, LedgerSubmissionRecord, LedgerTaskRecord,
    PendingTransaction, TransactionReceipt,
};
