//! Application services for the owner dashboard.

mod aggregator;
mod config;
mod dashboard;
mod error;
mod notice;
mod ownership;

pub use aggregator::{AggregationError, TaskAggregator};
pub use config::DashboardConfig;
pub use dashboard::{MutationOutcome, TaskDashboardService, TaskSnapshot};
pub use error::{
    MutationFailed, MutationFailureReason, PreconditionViolation, SyncError, TransactionError,
};
pub use notice::{DashboardNotice, MutationAction};
pub use ownership::{IdentityUnavailableError, OwnershipFilter, filter_owned};
