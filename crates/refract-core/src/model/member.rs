use crate::{model::entity::EntityId, value::Value};
use std::fmt::{self, Display};

///
/// MemberId
/// Positional identifier of a member within its declaring type.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MemberId(pub usize);

///
/// MemberRef
///
/// Identity of one resolved schema member: declaring type plus member
/// position. Selection dedup compares `MemberRef` identity, never
/// textual names.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MemberRef {
    pub entity: EntityId,
    pub member: MemberId,
}

impl MemberRef {
    #[must_use]
    pub const fn new(entity: EntityId, member: MemberId) -> Self {
        Self { entity, member }
    }
}

impl Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.entity.0, self.member.0)
    }
}

///
/// ScalarKind
///
/// Minimal scalar type surface needed by the projection compiler.
/// Aligned with `Value` variants; this is a lossy projection of the
/// full schema-layer type system.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarKind {
    Blob,
    Bool,
    Date,
    Float64,
    Int,
    Text,
    Timestamp,
    Uint,
    Ulid,
}

impl ScalarKind {
    /// True when a literal value inhabits this scalar kind.
    /// `Null` inhabits every kind.
    #[must_use]
    pub const fn admits(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Blob, Value::Blob(_))
                | (Self::Bool, Value::Bool(_))
                | (Self::Date, Value::Date(_))
                | (Self::Float64, Value::Float64(_))
                | (Self::Int, Value::Int(_))
                | (Self::Text, Value::Text(_))
                | (Self::Timestamp, Value::Timestamp(_))
                | (Self::Uint, Value::Uint(_))
                | (Self::Ulid, Value::Ulid(_))
                | (_, Value::Null)
        )
    }
}

///
/// Cardinality
/// Navigation target cardinality.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cardinality {
    One,
    Many,
}

impl Cardinality {
    #[must_use]
    pub const fn is_many(self) -> bool {
        matches!(self, Self::Many)
    }
}

///
/// MemberKind
///
/// Runtime shape of one declared member. Structural members (scalar and
/// complex) carry values; navigation members reach other elements.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemberKind {
    Scalar(ScalarKind),
    Complex(EntityId),
    Navigation {
        target: EntityId,
        cardinality: Cardinality,
    },
}

impl MemberKind {
    /// True for scalar and complex members (value-carrying).
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Complex(_))
    }

    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(self, Self::Navigation { .. })
    }
}

///
/// Member
/// One declared member of an entity or complex type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
}

impl Member {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_kinds_admit_matching_literals_and_null() {
        assert!(ScalarKind::Text.admits(&Value::text("x")));
        assert!(ScalarKind::Uint.admits(&Value::Uint(3)));
        assert!(ScalarKind::Uint.admits(&Value::Null));
        assert!(!ScalarKind::Uint.admits(&Value::Int(3)));
        assert!(!ScalarKind::Bool.admits(&Value::text("true")));
    }
}
