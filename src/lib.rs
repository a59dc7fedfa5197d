//! Bountydesk: owner dashboard for a decentralized bounty marketplace.
//!
//! This crate keeps a task owner's view of an on-chain bounty ledger in
//! step with the chain. It enumerates ledger tasks, joins them with their
//! freelancer submissions, narrows them to the connected account, and
//! drives owner actions through submit, confirm and resynchronize cycles.
//!
//! # Architecture
//!
//! Bountydesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the ledger and wallet
//! - **Adapters**: Concrete implementations of ports (in-memory ledger, etc.)
//!
//! # Modules
//!
//! - [`dashboard`]: Task synchronization, classification and owner actions

pub mod dashboard;
