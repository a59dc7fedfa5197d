//! Field map between positional ledger tuples and named task records.
//!
//! Contract reads return task structs as positional tuples. Adapters decode
//! them through a [`TaskRecordLayout`] so that a layout change fails loudly
//! instead of shifting values into the wrong fields.

use crate::dashboard::ports::LedgerTaskRecord;
use alloy_primitives::U256;
use thiserror::Error;

/// A single positional value in a ledger tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerValue {
    /// Unsigned integer word.
    Uint(U256),
    /// Boolean flag.
    Bool(bool),
    /// UTF-8 string.
    Text(String),
    /// Account address.
    Address(String),
}

impl LedgerValue {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Uint(_) => "uint",
            Self::Bool(_) => "bool",
            Self::Text(_) => "string",
            Self::Address(_) => "address",
        }
    }
}

/// Errors raised while decoding a positional task tuple.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordDecodeError {
    /// The tuple has fewer positions than the layout requires.
    #[error("layout v{version} expects {expected} fields, tuple has {actual}")]
    ShortTuple {
        /// Layout version used for decoding.
        version: u16,
        /// Minimum field count.
        expected: usize,
        /// Observed field count.
        actual: usize,
    },

    /// A field holds a value of the wrong kind.
    #[error("field {field} at index {index} expected {expected}, found {found}")]
    FieldKind {
        /// Field name.
        field: &'static str,
        /// Tuple position.
        index: usize,
        /// Expected value kind.
        expected: &'static str,
        /// Observed value kind.
        found: &'static str,
    },

    /// An integer field does not fit its target width.
    #[error("field {field} value {value} exceeds 64 bits")]
    Overflow {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: U256,
    },
}

/// Named positions of task fields in a ledger tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRecordLayout {
    /// Layout version.
    pub version: u16,
    /// Number of positions in an encoded tuple.
    pub arity: usize,
    /// Position of the task identifier.
    pub id: usize,
    /// Position of the owner address.
    pub provider: usize,
    /// Position of the description.
    pub description: usize,
    /// Position of the bounty amount.
    pub bounty: usize,
    /// Position of the completion flag.
    pub is_completed: usize,
    /// Position of the cancellation flag.
    pub is_cancelled: usize,
    /// Position of the deadline.
    pub deadline: usize,
}

impl TaskRecordLayout {
    /// Layout of the current task contract. Position 6 is not read.
    pub const V1: Self = Self {
        version: 1,
        arity: 8,
        id: 0,
        provider: 1,
        description: 2,
        bounty: 3,
        is_completed: 4,
        is_cancelled: 5,
        deadline: 7,
    };

    /// Decodes a positional tuple into a named record.
    ///
    /// Extra trailing positions are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDecodeError`] when the tuple is too short, a field has
    /// the wrong kind, or an integer does not fit in 64 bits.
    pub fn decode(&self, tuple: &[LedgerValue]) -> Result<LedgerTaskRecord, RecordDecodeError> {
        if tuple.len() < self.arity {
            return Err(RecordDecodeError::ShortTuple {
                version: self.version,
                expected: self.arity,
                actual: tuple.len(),
            });
        }

        Ok(LedgerTaskRecord {
            id: narrow("id", uint_at(tuple, self.id, "id")?)?,
            provider: address_at(tuple, self.provider, "provider")?,
            description: text_at(tuple, self.description, "description")?,
            bounty: uint_at(tuple, self.bounty, "bounty")?,
            is_completed: bool_at(tuple, self.is_completed, "is_completed")?,
            is_cancelled: bool_at(tuple, self.is_cancelled, "is_cancelled")?,
            deadline: narrow("deadline", uint_at(tuple, self.deadline, "deadline")?)?,
        })
    }

    /// Encodes a named record into a positional tuple. Unread positions are
    /// filled with zero words.
    #[must_use]
    pub fn encode(&self, record: &LedgerTaskRecord) -> Vec<LedgerValue> {
        let mut tuple = vec![LedgerValue::Uint(U256::ZERO); self.arity];
        let fields = [
            (self.id, LedgerValue::Uint(U256::from(record.id))),
            (self.provider, LedgerValue::Address(record.provider.clone())),
            (self.description, LedgerValue::Text(record.description.clone())),
            (self.bounty, LedgerValue::Uint(record.bounty)),
            (self.is_completed, LedgerValue::Bool(record.is_completed)),
            (self.is_cancelled, LedgerValue::Bool(record.is_cancelled)),
            (self.deadline, LedgerValue::Uint(U256::from(record.deadline))),
        ];
        for (index, value) in fields {
            if let Some(slot) = tuple.get_mut(index) {
                *slot = value;
            }
        }
        tuple
    }
}

fn field_at<'a>(
    tuple: &'a [LedgerValue],
    index: usize,
    field: &'static str,
    expected: &'static str,
) -> Result<&'a LedgerValue, RecordDecodeError> {
    tuple.get(index).ok_or(RecordDecodeError::FieldKind {
        field,
        index,
        expected,
        found: "nothing",
    })
}

const fn kind_error(
    field: &'static str,
    index: usize,
    expected: &'static str,
    value: &LedgerValue,
) -> RecordDecodeError {
    RecordDecodeError::FieldKind {
        field,
        index,
        expected,
        found: value.kind(),
    }
}

fn uint_at(
    tuple: &[LedgerValue],
    index: usize,
    field: &'static str,
) -> Result<U256, RecordDecodeError> {
    match field_at(tuple, index, field, "uint")? {
        LedgerValue::Uint(value) => Ok(*value),
        other => Err(kind_error(field, index, "uint", other)),
    }
}

fn bool_at(
    tuple: &[LedgerValue],
    index: usize,
    field: &'static str,
) -> Result<bool, RecordDecodeError> {
    match field_at(tuple, index, field, "bool")? {
        LedgerValue::Bool(value) => Ok(*value),
        other => Err(kind_error(field, index, "bool", other)),
    }
}

fn text_at(
    tuple: &[LedgerValue],
    index: usize,
    field: &'static str,
) -> Result<String, RecordDecodeError> {
    match field_at(tuple, index, field, "string")? {
        LedgerValue::Text(value) => Ok(value.clone()),
        other => Err(kind_error(field, index, "string", other)),
    }
}

fn address_at(
    tuple: &[LedgerValue],
    index: usize,
    field: &'static str,
) -> Result<String, RecordDecodeError> {
    match field_at(tuple, index, field, "address")? {
        LedgerValue::Address(value) => Ok(value.clone()),
        other => Err(kind_error(field, index, "address", other)),
    }
}

fn narrow(field: &'static str, value: U256) -> Result<u64, RecordDecodeError> {
    u64::try_from(value).map_err(|_| RecordDecodeError::Overflow { field, value })
}
