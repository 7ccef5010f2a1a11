use crate::model::member::{Member, MemberId, MemberRef};

///
/// EntityId
/// Stable identifier of a declared entity or complex type.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EntityId(pub usize);

///
/// EntityType
///
/// Member table for one declared type. `members` order is authoritative
/// for field-slot layout; `keys` order is the schema-declared key order
/// used for key auto-injection.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityType {
    pub name: String,
    pub members: Vec<Member>,
    pub keys: Vec<MemberId>,
}

impl EntityType {
    /// Borrow a member by position, if declared.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(id.0)
    }

    /// Position of a member by name.
    #[must_use]
    pub fn member_named(&self, name: &str) -> Option<MemberId> {
        self.members
            .iter()
            .position(|member| member.name == name)
            .map(MemberId)
    }

    /// True when the member participates in the declared key.
    #[must_use]
    pub fn is_key(&self, id: MemberId) -> bool {
        self.keys.contains(&id)
    }

    /// Structural (scalar/complex) members in declaration order.
    pub fn structural_members(&self, entity: EntityId) -> impl Iterator<Item = MemberRef> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.kind.is_structural())
            .map(move |(position, _)| MemberRef::new(entity, MemberId(position)))
    }
}
