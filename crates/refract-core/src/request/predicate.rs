use crate::{model::MemberRef, value::Value};
use std::ops::{BitAnd, BitOr};

///
/// Predicate AST
///
/// Pure, schema-resolved representation of request filters. The
/// projection compiler never evaluates, validates, or rewrites these;
/// they are forwarded verbatim to the external operator builder as part
/// of the scope directives.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Contains,
    StartsWith,
    EndsWith,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparePredicate {
    pub member: MemberRef,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub const fn new(member: MemberRef, op: CompareOp, value: Value) -> Self {
        Self { member, op, value }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
}

impl Predicate {
    #[must_use]
    pub const fn eq(member: MemberRef, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(member, CompareOp::Eq, value))
    }

    #[must_use]
    pub const fn ne(member: MemberRef, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(member, CompareOp::Ne, value))
    }

    #[must_use]
    pub const fn lt(member: MemberRef, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(member, CompareOp::Lt, value))
    }

    #[must_use]
    pub const fn lte(member: MemberRef, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(member, CompareOp::Lte, value))
    }

    #[must_use]
    pub const fn gt(member: MemberRef, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(member, CompareOp::Gt, value))
    }

    #[must_use]
    pub const fn gte(member: MemberRef, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(member, CompareOp::Gte, value))
    }

    #[must_use]
    pub fn is_in(member: MemberRef, values: Vec<Value>) -> Self {
        Self::Compare(ComparePredicate::new(
            member,
            CompareOp::In,
            Value::List(values),
        ))
    }

    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        match self {
            Self::And(mut children) => {
                children.push(rhs);
                Self::And(children)
            }
            other => Self::And(vec![other, rhs]),
        }
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        match self {
            Self::Or(mut children) => {
                children.push(rhs);
                Self::Or(children)
            }
            other => Self::Or(vec![other, rhs]),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, MemberId};

    fn member(position: usize) -> MemberRef {
        MemberRef::new(EntityId(0), MemberId(position))
    }

    #[test]
    fn bitand_flattens_into_one_and_group() {
        let predicate = Predicate::eq(member(0), Value::Uint(1))
            & Predicate::gt(member(1), Value::Uint(2))
            & Predicate::lt(member(2), Value::Uint(9));

        let Predicate::And(children) = predicate else {
            panic!("expected an AND group");
        };
        assert_eq!(children.len(), 3);
    }

    #[test]
    fn bitor_wraps_distinct_groups() {
        let left = Predicate::eq(member(0), Value::Uint(1)) & Predicate::eq(member(1), Value::Uint(2));
        let predicate = left | Predicate::eq(member(2), Value::Uint(3));

        let Predicate::Or(children) = predicate else {
            panic!("expected an OR group");
        };
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], Predicate::And(_)));
    }

    #[test]
    fn in_lists_are_value_lists() {
        let predicate = Predicate::is_in(member(0), vec![Value::Uint(1), Value::Uint(2)]);

        let Predicate::Compare(compare) = predicate else {
            panic!("expected a compare");
        };
        assert_eq!(compare.op, CompareOp::In);
        assert_eq!(
            compare.value,
            Value::List(vec![Value::Uint(1), Value::Uint(2)])
        );
    }
}
