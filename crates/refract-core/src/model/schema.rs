use crate::model::{
    entity::{EntityId, EntityType},
    member::{Cardinality, Member, MemberId, MemberKind, MemberRef, ScalarKind},
};
use thiserror::Error as ThisError;

///
/// SetId
/// Stable identifier of a declared entity set.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SetId(pub usize);

///
/// EntitySet
/// Addressable output collection for one entity type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntitySet {
    pub name: String,
    pub entity: EntityId,
}

///
/// SchemaError
/// Registration-time model validation failures.
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("type '{entity}' declares no members")]
    EmptyType { entity: String },

    #[error("type '{entity}' declares member '{member}' more than once")]
    DuplicateMemberName { entity: String, member: String },

    #[error("type '{entity}' key member '{member}' is not a declared scalar member")]
    InvalidKeyMember { entity: String, member: String },

    #[error("member '{member}' of type '{entity}' references an undeclared type")]
    UnknownTargetType { entity: String, member: String },

    #[error("entity set '{set}' declared more than once")]
    DuplicateSetName { set: String },

    #[error("entity set '{set}' references an undeclared type")]
    UnknownSetType { set: String },
}

///
/// Schema
///
/// Immutable member-table registry published by [`SchemaBuilder::build`].
/// One compile invocation reads it; nothing mutates it after publication,
/// so concurrent compiles share it freely.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schema {
    types: Vec<EntityType>,
    sets: Vec<EntitySet>,
}

impl Schema {
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Borrow a declared type by identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> &EntityType {
        &self.types[id.0]
    }

    /// Borrow a resolved member descriptor.
    #[must_use]
    pub fn member(&self, reference: MemberRef) -> &Member {
        &self.entity(reference.entity).members[reference.member.0]
    }

    /// Display name of a resolved member, for diagnostics.
    #[must_use]
    pub fn member_name(&self, reference: MemberRef) -> &str {
        &self.member(reference).name
    }

    /// Resolve a member reference by name on one type.
    #[must_use]
    pub fn member_named(&self, entity: EntityId, name: &str) -> Option<MemberRef> {
        self.entity(entity)
            .member_named(name)
            .map(|member| MemberRef::new(entity, member))
    }

    /// Borrow a declared entity set.
    #[must_use]
    pub fn set(&self, id: SetId) -> &EntitySet {
        &self.sets[id.0]
    }

    /// Resolve a set by name.
    #[must_use]
    pub fn set_named(&self, name: &str) -> Option<SetId> {
        self.sets.iter().position(|set| set.name == name).map(SetId)
    }

    /// First declared set exposing the given entity type, if any.
    ///
    /// Mirrors the container scan used to resolve expand targets whose
    /// navigation carries no bound set; no match leaves the expand
    /// target unresolved.
    #[must_use]
    pub fn set_for_entity(&self, entity: EntityId) -> Option<SetId> {
        self.sets
            .iter()
            .position(|set| set.entity == entity)
            .map(SetId)
    }
}

///
/// SchemaBuilder
///
/// Two-phase model construction: declare types first (so navigations can
/// reference forward), then attach members, keys, and sets. `build`
/// validates and publishes the immutable [`Schema`].
///

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    types: Vec<EntityType>,
    sets: Vec<EntitySet>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type and reserve its identifier.
    pub fn declare_type(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId(self.types.len());
        self.types.push(EntityType {
            name: name.into(),
            members: Vec::new(),
            keys: Vec::new(),
        });

        id
    }

    /// Attach a scalar member.
    pub fn scalar(&mut self, entity: EntityId, name: impl Into<String>, kind: ScalarKind) -> MemberId {
        self.push_member(entity, Member::new(name, MemberKind::Scalar(kind)))
    }

    /// Attach a complex-typed member.
    pub fn complex(&mut self, entity: EntityId, name: impl Into<String>, target: EntityId) -> MemberId {
        self.push_member(entity, Member::new(name, MemberKind::Complex(target)))
    }

    /// Attach a navigation member.
    pub fn navigation(
        &mut self,
        entity: EntityId,
        name: impl Into<String>,
        target: EntityId,
        cardinality: Cardinality,
    ) -> MemberId {
        self.push_member(
            entity,
            Member::new(
                name,
                MemberKind::Navigation {
                    target,
                    cardinality,
                },
            ),
        )
    }

    /// Declare the key members of a type, in declared key order.
    pub fn keys(&mut self, entity: EntityId, members: &[MemberId]) {
        self.types[entity.0].keys = members.to_vec();
    }

    /// Declare an addressable entity set.
    pub fn set(&mut self, name: impl Into<String>, entity: EntityId) -> SetId {
        let id = SetId(self.sets.len());
        self.sets.push(EntitySet {
            name: name.into(),
            entity,
        });

        id
    }

    /// Validate and publish the immutable schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        for entity in &self.types {
            validate_type(entity, self.types.len())?;
        }

        let mut seen_sets: Vec<&str> = Vec::with_capacity(self.sets.len());
        for set in &self.sets {
            if seen_sets.contains(&set.name.as_str()) {
                return Err(SchemaError::DuplicateSetName {
                    set: set.name.clone(),
                });
            }
            if set.entity.0 >= self.types.len() {
                return Err(SchemaError::UnknownSetType {
                    set: set.name.clone(),
                });
            }
            seen_sets.push(&set.name);
        }

        Ok(Schema {
            types: self.types,
            sets: self.sets,
        })
    }

    fn push_member(&mut self, entity: EntityId, member: Member) -> MemberId {
        let members = &mut self.types[entity.0].members;
        let id = MemberId(members.len());
        members.push(member);

        id
    }
}

fn validate_type(entity: &EntityType, type_count: usize) -> Result<(), SchemaError> {
    if entity.members.is_empty() {
        return Err(SchemaError::EmptyType {
            entity: entity.name.clone(),
        });
    }

    for (position, member) in entity.members.iter().enumerate() {
        let duplicate = entity.members[..position]
            .iter()
            .any(|earlier| earlier.name == member.name);
        if duplicate {
            return Err(SchemaError::DuplicateMemberName {
                entity: entity.name.clone(),
                member: member.name.clone(),
            });
        }

        match member.kind {
            MemberKind::Scalar(_) => {}
            MemberKind::Complex(target) | MemberKind::Navigation { target, .. } => {
                if target.0 >= type_count {
                    return Err(SchemaError::UnknownTargetType {
                        entity: entity.name.clone(),
                        member: member.name.clone(),
                    });
                }
            }
        }
    }

    for key in &entity.keys {
        let is_scalar = entity
            .member(*key)
            .is_some_and(|member| matches!(member.kind, MemberKind::Scalar(_)));
        if !is_scalar {
            return Err(SchemaError::InvalidKeyMember {
                entity: entity.name.clone(),
                member: entity
                    .member(*key)
                    .map_or_else(|| format!("#{}", key.0), |member| member.name.clone()),
            });
        }
    }

    Ok(())
}

///
/// TESTS
///
