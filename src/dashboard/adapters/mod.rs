//! Adapter implementations for dashboard ports.

pub mod memory;
pub mod record_layout;

pub use record_layout::{LedgerValue, RecordDecodeError, TaskRecordLayout};
