//! Module: compile::projection
//! Responsibility: tuple shape — slot readers, nested pipelines, paging
//! accessors, and the directives forwarded to the operator builder.
//! Does not own: selection resolution or assembly-tree construction.
//! Boundary: produces the `ProjectionPlan` interpreted by the row-builder.

use crate::{
    compile::{assembly::ValuePath, select::LevelProjection},
    error::CompileError,
    model::{MemberKind, MemberRef, Schema},
    request::{ExpandItem, OrderByItem, OrderByKey, OrderBySource, Predicate, QueryRequest},
};

///
/// SourceDirective
///
/// One sequence operation forwarded verbatim to the external operator
/// builder. Each scope (root or expand branch) emits its directives
/// exactly once, in the fixed order filter, order-by, skip, take.
/// Skip/take require a stable order-by key to be paging-safe; enforcing
/// that is the caller's responsibility upstream.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SourceDirective {
    Filter(Predicate),
    OrderBy(Vec<OrderByKey>),
    Skip(u64),
    Take(u64),
}

///
/// NestedShape
///
/// Shape of a nested projection result. `Collection` projects each
/// element of a to-many navigation; `Single` builds one nested tuple
/// from a to-one navigation's element, re-bound to the outer source.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NestedShape {
    Collection,
    Single,
}

///
/// NestedPlan
/// Sub-compiled projection attached to a navigation slot.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NestedPlan {
    pub plan: ProjectionPlan,
    pub shape: NestedShape,
}

///
/// SlotReader
///
/// Tagged read descriptor for one tuple slot. Member ordering inside a
/// tuple is purely positional; downstream readers reference slots,
/// never names.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SlotReader {
    /// Whole source element passthrough (slot 0 when nothing is
    /// explicitly selected).
    Source,
    /// Scalar or complex member read off the source element.
    Member(MemberRef),
    /// Navigation member with its scoped pipeline.
    Navigation {
        member: MemberRef,
        directives: Vec<SourceDirective>,
        nested: Option<NestedPlan>,
    },
}

///
/// ProjectionPlan
///
/// Pure mapping from one source element to an ordered, fixed-arity
/// tuple. Once built, the tuple shape is immutable and mirrored
/// slot-for-slot by the assembly tree.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectionPlan {
    slots: Vec<SlotReader>,
}

impl ProjectionPlan {
    #[must_use]
    pub(crate) const fn new(slots: Vec<SlotReader>) -> Self {
        Self { slots }
    }

    /// Tuple arity (slot count).
    #[must_use]
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn slots(&self) -> &[SlotReader] {
        &self.slots
    }

    /// First slot reading the given member directly, if any.
    #[must_use]
    pub fn member_slot(&self, member: MemberRef) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, SlotReader::Member(read) if *read == member))
    }

    /// True when slot 0 passes the whole source element through.
    #[must_use]
    pub fn passes_source_through(&self) -> bool {
        matches!(self.slots.first(), Some(SlotReader::Source))
    }
}

///
/// PagingAccessor
///
/// Reader mapping one continuation-token field to its position in the
/// final produced row shape (raw element or projected tuple).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PagingAccessor {
    pub member: MemberRef,
    pub path: ValuePath,
}

/// Directives for one expand branch, in the fixed forwarding order.
pub(crate) fn expand_directives(item: &ExpandItem) -> Vec<SourceDirective> {
    let mut directives = Vec::new();
    if let Some(filter) = &item.filter {
        directives.push(SourceDirective::Filter(filter.clone()));
    }
    if !item.order_by.is_empty() {
        directives.push(SourceDirective::OrderBy(item.order_by.clone()));
    }
    if let Some(skip) = item.skip {
        directives.push(SourceDirective::Skip(skip));
    }
    if let Some(top) = item.top {
        directives.push(SourceDirective::Take(top));
    }

    directives
}

/// Directives for the request root, in the fixed forwarding order.
pub(crate) fn root_directives(request: &QueryRequest) -> Vec<SourceDirective> {
    let mut directives = Vec::new();
    if let Some(filter) = &request.filter {
        directives.push(SourceDirective::Filter(filter.clone()));
    }
    if !request.order_by.is_empty() {
        directives.push(SourceDirective::OrderBy(
            request.order_by.iter().map(|item| item.key).collect(),
        ));
    }
    if let Some(skip) = request.skip {
        directives.push(SourceDirective::Skip(skip));
    }
    if let Some(top) = request.top {
        directives.push(SourceDirective::Take(top));
    }

    directives
}

/// Append tuple slots for order-by members not covered by the selection.
///
/// Slot rules:
/// - a member already covered by a selection record consumes no slot;
/// - a root-sourced member consumes one new slot only when an explicit
///   property selection exists (otherwise the whole-element slot covers
///   it);
/// - a tuple-sourced member never consumes a slot; it must resolve
///   against the already-produced shape or the compile fails.
pub(crate) fn append_order_by_slots(
    schema: &Schema,
    level: &mut LevelProjection,
    order_by: &[OrderByItem],
) -> Result<(), CompileError> {
    let explicit = level.records.any_explicit();

    for item in order_by {
        let member = item.key.member;
        if level.records.contains_member(member) {
            continue;
        }

        match item.source {
            OrderBySource::Root => {
                if !explicit {
                    continue;
                }
                level.slots.push(SlotReader::Member(member));
            }
            OrderBySource::Tuple => {
                let resolved = level
                    .slots
                    .iter()
                    .any(|slot| matches!(slot, SlotReader::Member(read) if *read == member));
                if !resolved {
                    return Err(order_by_member_not_found(schema, member));
                }
            }
        }
    }

    Ok(())
}

/// Paging accessors bound to the post-projection tuple shape.
pub(crate) fn tuple_paging_accessors(
    schema: &Schema,
    plan: &ProjectionPlan,
    order_by: &[OrderByItem],
) -> Result<Vec<PagingAccessor>, CompileError> {
    let mut accessors = Vec::with_capacity(order_by.len());

    for item in order_by {
        let member = item.key.member;
        let path = if let Some(slot) = plan.member_slot(member) {
            ValuePath::Slot(slot)
        } else if plan.passes_source_through() {
            ValuePath::SlotMember { slot: 0, member }
        } else {
            return Err(order_by_member_not_found(schema, member));
        };

        accessors.push(PagingAccessor { member, path });
    }

    Ok(accessors)
}

/// Paging accessors derived straight from the order-by clause against
/// the raw (unprojected) source element.
pub(crate) fn element_paging_accessors(
    schema: &Schema,
    order_by: &[OrderByItem],
) -> Result<Vec<PagingAccessor>, CompileError> {
    let mut accessors = Vec::with_capacity(order_by.len());

    for item in order_by {
        let member = item.key.member;
        let structural = matches!(
            schema.member(member).kind,
            MemberKind::Scalar(_) | MemberKind::Complex(_)
        );
        if item.source == OrderBySource::Tuple || !structural {
            return Err(order_by_member_not_found(schema, member));
        }

        accessors.push(PagingAccessor {
            member,
            path: ValuePath::Member(member),
        });
    }

    Ok(accessors)
}

fn order_by_member_not_found(schema: &Schema, member: MemberRef) -> CompileError {
    CompileError::OrderByMemberNotFound {
        member: schema.member_name(member).to_string(),
    }
}

///
/// TESTS
///
