//! Domain model for the owner dashboard.
//!
//! Tasks and submissions are read-only projections of ledger state. The
//! domain validates what the ledger hands back, classifies tasks for display,
//! and partitions them into dashboard tabs, without touching any
//! infrastructure.

mod board;
mod bounty;
mod error;
mod ids;
mod lifecycle;
mod task;

pub use board::{TaskBoard, TaskCard};
pub use bounty::Bounty;
pub use error::DashboardDomainError;
pub use ids::{AccountAddress, TaskId};
pub use lifecycle::TaskLifecycle;
pub use task::{Submission, Task, TaskData, TaskStatus};
