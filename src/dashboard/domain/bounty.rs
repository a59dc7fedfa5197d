//! Escrowed bounty amounts.

use super::DashboardDomainError;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bounty amount in the ledger's smallest unit.
///
/// Amounts are 256-bit unsigned integers, matching the ledger's word size, and
/// are never converted to floating point.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Bounty(U256);

impl Bounty {
    /// A zero bounty.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wraps an amount expressed in base units.
    #[must_use]
    pub const fn from_base_units(amount: U256) -> Self {
        Self(amount)
    }

    /// Returns the amount in base units.
    #[must_use]
    pub const fn base_units(self) -> U256 {
        self.0
    }

    /// Returns `true` when no funds are escrowed.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts, clamping at the maximum representable value.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl From<u64> for Bounty {
    fn from(amount: u64) -> Self {
        Self(U256::from(amount))
    }
}

impl From<u128> for Bounty {
    fn from(amount: u128) -> Self {
        Self(U256::from(amount))
    }
}

impl FromStr for Bounty {
    type Err = DashboardDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        U256::from_str_radix(value.trim(), 10)
            .map(Self)
            .map_err(|_| DashboardDomainError::InvalidBounty(value.to_owned()))
    }
}

impl fmt::Display for Bounty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
