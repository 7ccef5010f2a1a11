mod compare;


use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error as ThisError;
use ulid::Ulid;

pub use compare::{canonical_cmp, strict_order_cmp};

///
/// NonFiniteFloat
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("non-finite float is not a value")]
pub struct NonFiniteFloat;

///
/// Float64
///
/// Total-ordered, finite 64-bit float wrapper.
/// NaN and infinities are rejected at construction (and through serde)
/// so `Value` stays `Eq` and canonical ordering stays deterministic.
///

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Float64(f64);

impl Float64 {
    /// Wrap a finite float; returns `None` for NaN or infinities.
    #[must_use]
    pub fn try_new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Float64 {}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Float64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Float64> for f64 {
    fn from(value: Float64) -> Self {
        value.get()
    }
}

impl TryFrom<f64> for Float64 {
    type Error = NonFiniteFloat;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(NonFiniteFloat)
    }
}

///
/// Value
///
/// Runtime scalar transported through source elements, tuple slots, and
/// forwarded filter predicates.
///
/// Null → the member's value is absent (i.e., SQL NULL).
/// List → ordered many-cardinality transport; order is preserved.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Date(NaiveDate),
    Float64(Float64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Text(String),
    Timestamp(DateTime<Utc>),
    Uint(u64),
    Ulid(Ulid),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text convenience constructor.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Canonical variant rank used by [`canonical_cmp`].
    ///
    /// Mixed-variant comparisons are rank-only; there is no cross-variant
    /// numeric coercion in canonical ordering.
    #[must_use]
    pub(crate) const fn canonical_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Uint(_) => 3,
            Self::Float64(_) => 4,
            Self::Text(_) => 5,
            Self::Blob(_) => 6,
            Self::Date(_) => 7,
            Self::Timestamp(_) => 8,
            Self::Ulid(_) => 9,
            Self::List(_) => 10,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Ulid> for Value {
    fn from(value: Ulid) -> Self {
        Self::Ulid(value)
    }
}
