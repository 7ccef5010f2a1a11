//! Module: compile::assembly
//! Responsibility: the result-assembly tree mirroring the tuple shape.
//! Does not own: slot assignment (projection) or wire output (the
//! external serializer walks rows and nodes together).
//! Boundary: `AssemblyNode` handed to the serializer by the compile result.
//!
//! Construction is two-phase: structure is built top-down with unbound
//! link readers, then `bind_link_readers` binds them bottom-up once all
//! slot indices are final. Reader binding before slot assignment
//! completes would be incorrect, so the phases are separate functions.

use crate::{
    compile::select::{NestedInfo, SelectionList},
    model::{EntityId, MemberRef, Schema, SetId},
};

///
/// ValuePath
///
/// Positional read descriptor over a produced row. All paths reference
/// slots or member positions; nothing resolves by name at read time.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValuePath {
    /// The value sits directly in a tuple slot.
    Slot(usize),
    /// A member read out of an element held in a tuple slot.
    SlotMember { slot: usize, member: MemberRef },
    /// A member read straight off a raw (unprojected) element.
    Member(MemberRef),
}

///
/// PropertyReader
/// One scalar/complex value read out of a produced row.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PropertyReader {
    pub member: MemberRef,
    pub path: ValuePath,
}

///
/// AssemblyRelation
///
/// How a node relates to its enclosing tree: the `Parent` root, a
/// `Child` built fresh from the target type's default member set, or a
/// `Nested` node carrying its own sub-compiled select/expand.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssemblyRelation {
    Parent,
    Child,
    Nested,
}

///
/// ResourceInfo
/// Output-resource descriptor for a navigation child.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceInfo {
    pub name: String,
    pub is_collection: bool,
}

///
/// AssemblyNode
///
/// Per-level output-reconstruction descriptor. A node exclusively owns
/// its children; the root node is owned by the compile result and
/// handed to the external serializer.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssemblyNode {
    pub relation: AssemblyRelation,
    /// Output collection the node materializes rows into; `None` when
    /// the model exposes no set for the target type.
    pub target_set: Option<SetId>,
    pub resource: Option<ResourceInfo>,
    pub property_readers: Vec<PropertyReader>,
    /// Reader for the raw value used to reach this node's elements.
    /// Bound in phase two for navigation children.
    pub link_reader: Option<ValuePath>,
    pub count_requested: Option<bool>,
    pub children: Vec<AssemblyNode>,
}

/// Build the root (`Parent`) assembly node for a compiled level.
///
/// Phase one only: navigation children are created with unbound link
/// readers.
pub(crate) fn build_root_node(
    schema: &Schema,
    entity: EntityId,
    target_set: Option<SetId>,
    records: &SelectionList,
) -> AssemblyNode {
    let children = navigation_children(schema, records);

    if records.any_explicit() {
        AssemblyNode {
            relation: AssemblyRelation::Parent,
            target_set,
            resource: None,
            property_readers: explicit_readers(schema, records),
            link_reader: None,
            count_requested: None,
            children,
        }
    } else {
        // No selection: the serializer reaches the element through the
        // whole-element slot and reads every structural member off it.
        AssemblyNode {
            relation: AssemblyRelation::Parent,
            target_set,
            resource: None,
            property_readers: raw_member_readers(schema, entity),
            link_reader: Some(ValuePath::Slot(0)),
            count_requested: None,
            children,
        }
    }
}

/// Build the root node for the raw-passthrough result ("no projection
/// produced"): readers go straight against the unprojected element.
pub(crate) fn build_raw_root_node(
    schema: &Schema,
    entity: EntityId,
    target_set: Option<SetId>,
) -> AssemblyNode {
    AssemblyNode {
        relation: AssemblyRelation::Parent,
        target_set,
        resource: None,
        property_readers: raw_member_readers(schema, entity),
        link_reader: None,
        count_requested: None,
        children: Vec::new(),
    }
}

/// Build a `Nested` node for a navigation carrying its own sub-compiled
/// select/expand. Called by the resolver once the nested level's slots
/// are final; the node's own link reader is bound by the outer level.
pub(crate) fn build_nested_node(
    schema: &Schema,
    entity: EntityId,
    target_set: Option<SetId>,
    resource: ResourceInfo,
    count_requested: Option<bool>,
    records: &SelectionList,
) -> AssemblyNode {
    let property_readers = if records.any_explicit() {
        explicit_readers(schema, records)
    } else {
        element_readers(schema, entity)
    };

    AssemblyNode {
        relation: AssemblyRelation::Nested,
        target_set,
        resource: Some(resource),
        property_readers,
        link_reader: None,
        count_requested,
        children: navigation_children(schema, records),
    }
}

/// Phase two: bind every navigation child's link reader to the outer
/// tuple slot holding that navigation's value. Slot indices must be
/// final before this runs.
pub(crate) fn bind_link_readers(node: &mut AssemblyNode, records: &SelectionList) {
    let navigation_slots = records
        .iter()
        .filter(|record| record.nested_info.is_some())
        .map(|record| record.slot);

    for (child, slot) in node.children.iter_mut().zip(navigation_slots) {
        child.link_reader = Some(ValuePath::Slot(slot));
    }
}

// One child per navigation record: the resolver-built nested node when
// present, else a fresh child over the target type's default member set.
fn navigation_children(schema: &Schema, records: &SelectionList) -> Vec<AssemblyNode> {
    let mut children = Vec::new();

    for record in records.iter() {
        let Some(nested_info) = &record.nested_info else {
            continue;
        };

        let child = match &record.assembly {
            Some(node) => node.clone(),
            None => build_child_node(schema, nested_info),
        };
        children.push(child);
    }

    children
}

fn build_child_node(schema: &Schema, nested_info: &NestedInfo) -> AssemblyNode {
    AssemblyNode {
        relation: AssemblyRelation::Child,
        target_set: nested_info.target_set,
        resource: Some(nested_info.resource.clone()),
        property_readers: raw_member_readers(schema, nested_info.target),
        link_reader: None,
        count_requested: nested_info.count,
        children: Vec::new(),
    }
}

// Explicitly selected structural records, read at their own slots.
fn explicit_readers(schema: &Schema, records: &SelectionList) -> Vec<PropertyReader> {
    records
        .iter()
        .filter(|record| schema.member(record.member).kind.is_structural())
        .map(|record| PropertyReader {
            member: record.member,
            path: ValuePath::Slot(record.slot),
        })
        .collect()
}

// Default full-member set read through the whole-element slot 0.
fn element_readers(schema: &Schema, entity: EntityId) -> Vec<PropertyReader> {
    schema
        .entity(entity)
        .structural_members(entity)
        .map(|member| PropertyReader {
            member,
            path: ValuePath::SlotMember { slot: 0, member },
        })
        .collect()
}

// Default full-member set read straight off a linked raw element.
fn raw_member_readers(schema: &Schema, entity: EntityId) -> Vec<PropertyReader> {
    schema
        .entity(entity)
        .structural_members(entity)
        .map(|member| PropertyReader {
            member,
            path: ValuePath::Member(member),
        })
        .collect()
}

///
/// TESTS
///
