//! Module: compile::select
//! Responsibility: resolving request select items into an ordered,
//! dedup'd list of selection records, recursing into nested expands.
//! Does not own: slot semantics beyond assignment order, assembly
//! shapes (built through `compile::assembly`), or directive forwarding.
//! Boundary: `LevelProjection` consumed by the projection compiler.

use crate::{
    compile::{
        CompileOptions, MetadataLevel,
        assembly::{self, AssemblyNode, ResourceInfo},
        projection::{self, NestedPlan, NestedShape, ProjectionPlan, SlotReader},
    },
    error::CompileError,
    model::{Cardinality, EntityId, MemberKind, MemberRef, Schema, SetId},
    request::{ExpandItem, PathSegment, SelectItem},
};
use derive_more::{Deref, IntoIterator};
use tracing::trace;

///
/// NestedInfo
///
/// Navigation-specific payload of a selection record: target type and
/// collection, cardinality, count flag, and the output-resource
/// descriptor for the child node.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NestedInfo {
    pub target: EntityId,
    /// `None` when the model exposes no set for the target type (e.g. a
    /// projected, non-addressable tuple result).
    pub target_set: Option<SetId>,
    pub cardinality: Cardinality,
    pub count: Option<bool>,
    pub resource: ResourceInfo,
}

///
/// SelectionRecord
///
/// One resolved selectable member. Created and owned by one compile
/// invocation; `slot` is assigned once at insertion and only ever
/// shifted by the whole-element insertion at slot 0.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectionRecord {
    pub member: MemberRef,
    pub is_explicit_property_select: bool,
    pub nested_info: Option<NestedInfo>,
    pub slot: usize,
    /// Pre-built nested assembly node; set only when a navigation
    /// carries its own nested select/expand.
    pub assembly: Option<AssemblyNode>,
}

///
/// SelectionList
///
/// Append-only record list enforcing the no-duplicate-member invariant.
/// Dedup compares resolved member identity, never textual names.
///

#[derive(Debug, Default, Deref, IntoIterator)]
pub struct SelectionList {
    #[into_iterator(owned, ref)]
    records: Vec<SelectionRecord>,
}

impl SelectionList {
    /// True when any record references the given member.
    #[must_use]
    pub fn contains_member(&self, member: MemberRef) -> bool {
        self.records.iter().any(|record| record.member == member)
    }

    /// True when any record is an explicit scalar/complex/navigation
    /// property selection.
    #[must_use]
    pub fn any_explicit(&self) -> bool {
        self.records
            .iter()
            .any(|record| record.is_explicit_property_select)
    }

    /// Insert a record, rejecting duplicate members.
    ///
    /// Callers check containment first; a rejection here is a
    /// programming defect, not a user error.
    pub(crate) fn insert(&mut self, record: SelectionRecord) -> Result<(), MemberRef> {
        if self.contains_member(record.member) {
            return Err(record.member);
        }
        self.records.push(record);

        Ok(())
    }

    fn shift_slots(&mut self, by: usize) {
        for record in &mut self.records {
            record.slot += by;
        }
    }
}

///
/// LevelProjection
///
/// Immutable result of resolving one select/expand level: the records
/// plus the slot readers assigned so far, in resolution order. Each
/// recursion produces its own `LevelProjection`; parents merge
/// children's results explicitly instead of sharing mutable state.
///

#[derive(Debug, Default)]
pub(crate) struct LevelProjection {
    pub(crate) records: SelectionList,
    pub(crate) slots: Vec<SlotReader>,
}

impl LevelProjection {
    pub(crate) fn empty() -> Self {
        Self::default()
    }
}

///
/// SelectionResolver
/// Walks one request level and produces its `LevelProjection`.
///

pub(crate) struct SelectionResolver<'s> {
    schema: &'s Schema,
    options: &'s CompileOptions,
}

impl<'s> SelectionResolver<'s> {
    pub(crate) const fn new(schema: &'s Schema, options: &'s CompileOptions) -> Self {
        Self { schema, options }
    }

    /// Resolve one level of select items against its enclosing type.
    ///
    /// Items resolve independently, in request order; the first item
    /// referencing a given member wins and later duplicates are
    /// silently dropped.
    pub(crate) fn resolve_level(
        &self,
        entity: EntityId,
        items: &[SelectItem],
    ) -> Result<LevelProjection, CompileError> {
        let mut records = SelectionList::default();
        let mut slots: Vec<SlotReader> = Vec::new();

        for item in items {
            let Some((mut record, reader)) = self.resolve_item(entity, item)? else {
                continue;
            };

            if records.contains_member(record.member) {
                trace!(
                    member = self.schema.member_name(record.member),
                    "duplicate select member dropped"
                );
                continue;
            }

            record.slot = slots.len();
            slots.push(reader);
            self.insert_record(&mut records, record)?;
        }

        if records.any_explicit() {
            if self.options.metadata == MetadataLevel::Full {
                self.append_keys(entity, &mut records, &mut slots)?;
            }
        } else {
            // Nothing explicitly selected: pass the whole element
            // through at slot 0 and shift every assigned slot up.
            slots.insert(0, SlotReader::Source);
            records.shift_slots(1);
        }

        Ok(LevelProjection { records, slots })
    }

    fn resolve_item(
        &self,
        entity: EntityId,
        item: &SelectItem,
    ) -> Result<Option<(SelectionRecord, SlotReader)>, CompileError> {
        match item {
            SelectItem::Path(path) => match path.last() {
                Some(PathSegment::Property(member)) => Ok(Some(property_selection(*member))),
                Some(PathSegment::Navigation(member)) => self.resolve_navigation_select(*member),
                Some(segment @ PathSegment::Operation(_)) => {
                    Err(CompileError::UnsupportedSelectItem {
                        kind: segment.kind().to_string(),
                    })
                }
                None => Err(CompileError::UnsupportedSelectItem {
                    kind: "empty path".to_string(),
                }),
            },
            SelectItem::Expand(expand) => self.resolve_expand(entity, expand),
        }
    }

    // Path select ending in a navigation: an explicit property
    // selection whose slot holds the raw navigation value.
    fn resolve_navigation_select(
        &self,
        member: MemberRef,
    ) -> Result<Option<(SelectionRecord, SlotReader)>, CompileError> {
        let (target, cardinality) = self.navigation_target(member)?;
        if self.skip_for_next_link(cardinality) {
            return Ok(None);
        }

        let record = SelectionRecord {
            member,
            is_explicit_property_select: true,
            nested_info: Some(self.nested_info(member, target, cardinality, None)),
            slot: 0,
            assembly: None,
        };
        let reader = SlotReader::Navigation {
            member,
            directives: Vec::new(),
            nested: None,
        };

        Ok(Some((record, reader)))
    }

    fn resolve_expand(
        &self,
        _entity: EntityId,
        expand: &ExpandItem,
    ) -> Result<Option<(SelectionRecord, SlotReader)>, CompileError> {
        let member = match expand.path.last() {
            Some(PathSegment::Navigation(member)) => *member,
            Some(segment) => {
                return Err(CompileError::UnsupportedSelectItem {
                    kind: segment.kind().to_string(),
                });
            }
            None => {
                return Err(CompileError::UnsupportedSelectItem {
                    kind: "empty path".to_string(),
                });
            }
        };

        let (target, cardinality) = self.navigation_target(member)?;
        if self.skip_for_next_link(cardinality) {
            return Ok(None);
        }

        // Scoped sequence options only apply to collection navigations.
        let directives = if cardinality.is_many() {
            projection::expand_directives(expand)
        } else {
            Vec::new()
        };

        let nested_info = self.nested_info(member, target, cardinality, expand.count);

        let mut assembly = None;
        let nested = if expand.select.is_empty() {
            None
        } else {
            // The nested level resolves fully (slots final) before this
            // record is returned: the outer tuple slot needs the nested
            // value shape, and the nested node is built from final slots.
            let nested_level = self.resolve_level(target, &expand.select)?;
            let mut node = assembly::build_nested_node(
                self.schema,
                target,
                nested_info.target_set,
                nested_info.resource.clone(),
                expand.count,
                &nested_level.records,
            );
            assembly::bind_link_readers(&mut node, &nested_level.records);
            assembly = Some(node);

            let shape = if cardinality.is_many() {
                NestedShape::Collection
            } else {
                NestedShape::Single
            };

            Some(NestedPlan {
                plan: ProjectionPlan::new(nested_level.slots),
                shape,
            })
        };

        let record = SelectionRecord {
            member,
            is_explicit_property_select: false,
            nested_info: Some(nested_info),
            slot: 0,
            assembly,
        };
        let reader = SlotReader::Navigation {
            member,
            directives,
            nested,
        };

        Ok(Some((record, reader)))
    }

    // Append declared key members not already selected, in
    // schema-declared key order, each as an explicit selection.
    fn append_keys(
        &self,
        entity: EntityId,
        records: &mut SelectionList,
        slots: &mut Vec<SlotReader>,
    ) -> Result<(), CompileError> {
        let keys: Vec<MemberRef> = self
            .schema
            .entity(entity)
            .keys
            .iter()
            .map(|key| MemberRef::new(entity, *key))
            .collect();

        for member in keys {
            if records.contains_member(member) {
                continue;
            }
            trace!(
                member = self.schema.member_name(member),
                "auto-injecting key member"
            );

            let record = SelectionRecord {
                member,
                is_explicit_property_select: true,
                nested_info: None,
                slot: slots.len(),
                assembly: None,
            };
            slots.push(SlotReader::Member(member));
            self.insert_record(records, record)?;
        }

        Ok(())
    }

    fn insert_record(
        &self,
        records: &mut SelectionList,
        record: SelectionRecord,
    ) -> Result<(), CompileError> {
        records
            .insert(record)
            .map_err(|member| CompileError::DuplicateMember {
                member: self.schema.member_name(member).to_string(),
            })
    }

    fn navigation_target(&self, member: MemberRef) -> Result<(EntityId, Cardinality), CompileError> {
        match self.schema.member(member).kind {
            MemberKind::Navigation {
                target,
                cardinality,
            } => Ok((target, cardinality)),
            MemberKind::Scalar(_) | MemberKind::Complex(_) => {
                Err(CompileError::UnsupportedSelectItem {
                    kind: format!(
                        "navigation path over non-navigation member '{}'",
                        self.schema.member_name(member)
                    ),
                })
            }
        }
    }

    const fn skip_for_next_link(&self, cardinality: Cardinality) -> bool {
        self.options.navigation_next_link && cardinality.is_many()
    }

    fn nested_info(
        &self,
        member: MemberRef,
        target: EntityId,
        cardinality: Cardinality,
        count: Option<bool>,
    ) -> NestedInfo {
        NestedInfo {
            target,
            target_set: self.schema.set_for_entity(target),
            cardinality,
            count,
            resource: ResourceInfo {
                name: self.schema.member_name(member).to_string(),
                is_collection: cardinality.is_many(),
            },
        }
    }
}

const fn property_selection(member: MemberRef) -> (SelectionRecord, SlotReader) {
    (
        SelectionRecord {
            member,
            is_explicit_property_select: true,
            nested_info: None,
            slot: 0,
            assembly: None,
        },
        SlotReader::Member(member),
    )
}

///
/// TESTS
///
