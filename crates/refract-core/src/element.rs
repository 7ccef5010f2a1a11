use crate::{
    model::{EntityId, MemberId},
    value::Value,
};

///
/// ElementField
///
/// One member's runtime payload inside an element. The variant mirrors
/// the declared `MemberKind`: structural members carry `Scalar` or
/// `One` (complex), navigations carry `One` or `Many`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ElementField {
    Scalar(Value),
    One(Option<Box<Element>>),
    Many(Vec<Element>),
}

impl ElementField {
    /// Stable shape label used in diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::One(_) => "single",
            Self::Many(_) => "collection",
        }
    }
}

///
/// Element
///
/// Interpreted source element: one row of the abstract ordered data
/// source. Field order is positional and parallels the declaring type's
/// member table; nothing resolves by name at read time.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    entity: EntityId,
    fields: Vec<ElementField>,
}

impl Element {
    #[must_use]
    pub const fn new(entity: EntityId, fields: Vec<ElementField>) -> Self {
        Self { entity, fields }
    }

    #[must_use]
    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    /// Borrow the field payload for one member position, if present.
    #[must_use]
    pub fn field(&self, member: MemberId) -> Option<&ElementField> {
        self.fields.get(member.0)
    }

    /// Borrow the scalar value at one member position, if it is one.
    #[must_use]
    pub fn scalar(&self, member: MemberId) -> Option<&Value> {
        match self.field(member) {
            Some(ElementField::Scalar(value)) => Some(value),
            _ => None,
        }
    }
}
