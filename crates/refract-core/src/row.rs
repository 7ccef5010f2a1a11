//! Module: row
//! Responsibility: execution-time interpretation of projection plans —
//! flat tuple rows and the generic row-builder.
//! Does not own: sequence semantics for forwarded directives (the
//! external operator builder implements [`SequenceOps`]) or wire output.
//! Boundary: rows consumed by the external serializer alongside the
//! assembly tree.

use crate::{
    compile::{NestedShape, ProjectionPlan, SlotReader, SourceDirective, ValuePath},
    element::{Element, ElementField},
    model::MemberRef,
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use thiserror::Error as ThisError;

///
/// ProjectError
///
/// Row-builder failures: element/plan shape disagreements and operator
/// failures surfaced through [`SequenceOps`]. Shape violations are
/// reported, never panicked on.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ProjectError {
    #[error("element has no field at member {member}")]
    MissingField { member: MemberRef },

    #[error("field at member {member} is {found}, expected {expected}")]
    FieldShape {
        member: MemberRef,
        expected: &'static str,
        found: &'static str,
    },

    #[error("sequence operator failed: {message}")]
    Operator { message: String },
}

///
/// Datum
/// Runtime value of one tuple slot.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Datum {
    /// Scalar member value.
    Value(Value),
    /// Raw element passthrough (whole-element slot, or a to-one
    /// navigation without a nested plan).
    Element(Element),
    /// Raw collection (to-many navigation without a nested plan), after
    /// directives were applied.
    Elements(Vec<Element>),
    /// Nested tuple (to-one navigation with a nested plan).
    Row(Box<Row>),
    /// Nested projected collection (to-many navigation with a nested plan).
    Rows(Vec<Row>),
    /// Missing to-one navigation or complex value.
    Absent,
}

///
/// Row
/// One produced tuple: fixed arity, positional slots.
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq)]
pub struct Row {
    #[into_iterator(owned, ref)]
    slots: Vec<Datum>,
}

impl Row {
    pub(crate) const fn new(slots: Vec<Datum>) -> Self {
        Self { slots }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn datum(&self, slot: usize) -> Option<&Datum> {
        self.slots.get(slot)
    }
}

///
/// SequenceOps
///
/// Runtime face of the external operator builder: applies one forwarded
/// directive to a sequence of elements. The row-builder calls it once
/// per directive, in plan order.
///

pub trait SequenceOps {
    fn apply(
        &self,
        elements: Vec<Element>,
        directive: &SourceDirective,
    ) -> Result<Vec<Element>, ProjectError>;
}

///
/// PassthroughOps
///
/// Forwards sequences unchanged. For engines that applied the scoped
/// directives upstream of projection.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughOps;

impl SequenceOps for PassthroughOps {
    fn apply(
        &self,
        elements: Vec<Element>,
        _directive: &SourceDirective,
    ) -> Result<Vec<Element>, ProjectError> {
        Ok(elements)
    }
}

/// Interpret a projection plan over one source element.
pub fn project_element<O>(
    plan: &ProjectionPlan,
    element: &Element,
    ops: &O,
) -> Result<Row, ProjectError>
where
    O: SequenceOps + ?Sized,
{
    let mut slots = Vec::with_capacity(plan.arity());
    for reader in plan.slots() {
        slots.push(read_slot(reader, element, ops)?);
    }

    Ok(Row::new(slots))
}

/// Interpret a projection plan over an ordered sequence of elements.
pub fn project_sequence<O>(
    plan: &ProjectionPlan,
    elements: &[Element],
    ops: &O,
) -> Result<Vec<Row>, ProjectError>
where
    O: SequenceOps + ?Sized,
{
    elements
        .iter()
        .map(|element| project_element(plan, element, ops))
        .collect()
}

/// Resolve a scalar read descriptor against a produced row.
///
/// `Member` paths address the raw element shape, not rows; they resolve
/// through [`read_scalar_from_element`].
#[must_use]
pub fn read_scalar<'r>(path: &ValuePath, row: &'r Row) -> Option<&'r Value> {
    match path {
        ValuePath::Slot(slot) => match row.datum(*slot) {
            Some(Datum::Value(value)) => Some(value),
            _ => None,
        },
        ValuePath::SlotMember { slot, member } => match row.datum(*slot) {
            Some(Datum::Element(element)) => element.scalar(member.member),
            _ => None,
        },
        ValuePath::Member(_) => None,
    }
}

/// Resolve a scalar read descriptor against a raw (unprojected) element.
#[must_use]
pub fn read_scalar_from_element<'r>(path: &ValuePath, element: &'r Element) -> Option<&'r Value> {
    match path {
        ValuePath::Member(member) => element.scalar(member.member),
        ValuePath::Slot(_) | ValuePath::SlotMember { .. } => None,
    }
}

/// Resolve a link reader against a produced row, yielding the raw datum
/// used to reach the linked elements.
#[must_use]
pub fn read_link<'r>(path: &ValuePath, row: &'r Row) -> Option<&'r Datum> {
    match path {
        ValuePath::Slot(slot) => row.datum(*slot),
        ValuePath::SlotMember { .. } | ValuePath::Member(_) => None,
    }
}

fn read_slot<O>(reader: &SlotReader, element: &Element, ops: &O) -> Result<Datum, ProjectError>
where
    O: SequenceOps + ?Sized,
{
    match reader {
        SlotReader::Source => Ok(Datum::Element(element.clone())),
        SlotReader::Member(member) => read_member(*member, element),
        SlotReader::Navigation {
            member,
            directives,
            nested,
        } => read_navigation(*member, directives, nested.as_ref(), element, ops),
    }
}

fn read_member(member: MemberRef, element: &Element) -> Result<Datum, ProjectError> {
    match element.field(member.member) {
        None => Err(ProjectError::MissingField { member }),
        Some(ElementField::Scalar(value)) => Ok(Datum::Value(value.clone())),
        Some(ElementField::One(Some(inner))) => Ok(Datum::Element((**inner).clone())),
        Some(ElementField::One(None)) => Ok(Datum::Absent),
        Some(field @ ElementField::Many(_)) => Err(ProjectError::FieldShape {
            member,
            expected: "scalar or single-valued",
            found: field.shape(),
        }),
    }
}

fn read_navigation<O>(
    member: MemberRef,
    directives: &[SourceDirective],
    nested: Option<&crate::compile::NestedPlan>,
    element: &Element,
    ops: &O,
) -> Result<Datum, ProjectError>
where
    O: SequenceOps + ?Sized,
{
    match element.field(member.member) {
        None => Err(ProjectError::MissingField { member }),
        Some(field @ ElementField::Scalar(_)) => Err(ProjectError::FieldShape {
            member,
            expected: "navigation",
            found: field.shape(),
        }),
        Some(ElementField::Many(elements)) => {
            let mut sequence = elements.clone();
            for directive in directives {
                sequence = ops.apply(sequence, directive)?;
            }

            match nested {
                None => Ok(Datum::Elements(sequence)),
                Some(plan) if plan.shape == NestedShape::Collection => {
                    Ok(Datum::Rows(project_sequence(&plan.plan, &sequence, ops)?))
                }
                Some(_) => Err(ProjectError::FieldShape {
                    member,
                    expected: "single-valued",
                    found: "collection",
                }),
            }
        }
        Some(ElementField::One(inner)) => match inner {
            None => Ok(Datum::Absent),
            Some(linked) => match nested {
                None => Ok(Datum::Element((**linked).clone())),
                Some(plan) if plan.shape == NestedShape::Single => Ok(Datum::Row(Box::new(
                    project_element(&plan.plan, linked, ops)?,
                ))),
                Some(_) => Err(ProjectError::FieldShape {
                    member,
                    expected: "collection",
                    found: "single",
                }),
            },
        },
    }
}

///
/// TESTS
///
