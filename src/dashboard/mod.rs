//! Owner dashboard for ledger-backed bounty tasks.
//!
//! This module enumerates every task the ledger knows about, joins each task
//! with its freelancer submissions, narrows the result to tasks owned by the
//! active account, and drives the two owner actions (approving a submission
//! and cancelling a task) as submit, confirm, resynchronize cycles. The ledger
//! stays the source of truth: local state is only ever replaced by a fresh
//! read, never patched. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
