//! Identifier types for the dashboard domain.

use super::DashboardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Ledger-assigned task identifier.
///
/// Identifier zero is reserved by the ledger for unset slots, so a `TaskId`
/// is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardDomainError::InvalidTaskId`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, DashboardDomainError> {
        if value == 0 {
            return Err(DashboardDomainError::InvalidTaskId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for TaskId {
    type Error = DashboardDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskId> for u64 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ledger account address.
///
/// Addresses are compared and hashed case-insensitively, so `0xABC` and
/// `0xabc` name the same account. The original spelling is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Creates a validated account address.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardDomainError::EmptyAddress`] when the value is blank
    /// and [`DashboardDomainError::InvalidAddress`] when it contains interior
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, DashboardDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(DashboardDomainError::EmptyAddress);
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(DashboardDomainError::InvalidAddress(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as originally spelled.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `other` names this account, ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl PartialEq for AccountAddress {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for AccountAddress {}

impl Hash for AccountAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_usize(self.0.len());
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = DashboardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountAddress> for String {
    fn from(address: AccountAddress) -> Self {
        address.0
    }
}

impl AsRef<str> for AccountAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
