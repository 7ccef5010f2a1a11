//! Select/expand compilation.
//!
//! One compile invocation turns a resolved request tree into a
//! projection plan over the abstract source, the mirrored assembly
//! tree, the forwarded root directives, and the paging accessors. The
//! transformation is pure, synchronous, and deterministic; nothing
//! partial is published on failure.

pub mod assembly;
pub mod projection;
pub mod select;


pub use assembly::{AssemblyNode, AssemblyRelation, PropertyReader, ResourceInfo, ValuePath};
pub use projection::{
    NestedPlan, NestedShape, PagingAccessor, ProjectionPlan, SlotReader, SourceDirective,
};
pub use select::{NestedInfo, SelectionList, SelectionRecord};

use crate::{
    error::CompileError,
    model::{EntityId, Schema, SetId},
    request::QueryRequest,
};
use tracing::debug;

///
/// MetadataLevel
///
/// Response fidelity mode. `Full` requires machine-addressable
/// identifiers: declared key members are auto-injected into explicit
/// selections.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MetadataLevel {
    #[default]
    Minimal,
    Full,
}

///
/// CompileOptions
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CompileOptions {
    pub metadata: MetadataLevel,
    /// Emit links instead of projecting collection navigations; the
    /// serializer points at the nested collection rather than inlining it.
    pub navigation_next_link: bool,
    /// Server page size; when set alongside an order-by, paging
    /// accessors are bound to the post-projection row shape.
    pub page_size: Option<u32>,
}

///
/// Compiled
///
/// Result of one compile invocation. `projection` is `None` when no
/// projection was produced (the caller projects the raw source element
/// and applies `paging` against it).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Compiled {
    /// Request-level directives forwarded verbatim to the operator
    /// builder, in the fixed order filter, order-by, skip, take.
    pub root_directives: Vec<SourceDirective>,
    pub projection: Option<ProjectionPlan>,
    pub assembly: AssemblyNode,
    pub paging: Vec<PagingAccessor>,
}

///
/// Compiler
///
/// One compile surface bound to a schema and a root type. Invocations
/// are independent; concurrent compiles over the same schema need no
/// coordination.
///

#[derive(Clone, Copy, Debug)]
pub struct Compiler<'s> {
    schema: &'s Schema,
    root_entity: EntityId,
    root_set: Option<SetId>,
    options: CompileOptions,
}

impl<'s> Compiler<'s> {
    /// Bind a compiler to an addressable entity set.
    #[must_use]
    pub fn for_set(schema: &'s Schema, set: SetId, options: CompileOptions) -> Self {
        Self {
            schema,
            root_entity: schema.set(set).entity,
            root_set: Some(set),
            options,
        }
    }

    /// Bind a compiler to an entity type; the output set is resolved
    /// through the schema when one exposes the type.
    #[must_use]
    pub fn for_entity(schema: &'s Schema, entity: EntityId, options: CompileOptions) -> Self {
        Self {
            schema,
            root_entity: entity,
            root_set: schema.set_for_entity(entity),
            options,
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Compile one request into its projection plan, assembly tree,
    /// root directives, and paging accessors.
    pub fn compile(&self, request: &QueryRequest) -> Result<Compiled, CompileError> {
        let resolver = select::SelectionResolver::new(self.schema, &self.options);
        let mut level = if request.select.is_empty() {
            select::LevelProjection::empty()
        } else {
            resolver.resolve_level(self.root_entity, &request.select)?
        };

        let root_directives = projection::root_directives(request);
        let nothing_selected = level.records.is_empty() && level.slots.is_empty();

        // Order-by-only request without a configured page size: no
        // projection is produced; paging accessors read the raw element.
        if nothing_selected && !request.order_by.is_empty() && self.options.page_size.is_none() {
            let paging = projection::element_paging_accessors(self.schema, &request.order_by)?;
            let assembly =
                assembly::build_raw_root_node(self.schema, self.root_entity, self.root_set);
            debug!(accessors = paging.len(), "compiled raw passthrough");

            return Ok(Compiled {
                root_directives,
                projection: None,
                assembly,
                paging,
            });
        }

        if nothing_selected {
            level.slots.push(SlotReader::Source);
        }
        if !request.order_by.is_empty() {
            projection::append_order_by_slots(self.schema, &mut level, &request.order_by)?;
        }

        let select::LevelProjection { records, slots } = level;
        let plan = ProjectionPlan::new(slots);

        let paging = if !request.order_by.is_empty() && self.options.page_size.is_some() {
            projection::tuple_paging_accessors(self.schema, &plan, &request.order_by)?
        } else {
            Vec::new()
        };

        let mut root =
            assembly::build_root_node(self.schema, self.root_entity, self.root_set, &records);
        assembly::bind_link_readers(&mut root, &records);

        debug!(
            arity = plan.arity(),
            records = records.len(),
            children = root.children.len(),
            "compiled projection"
        );

        Ok(Compiled {
            root_directives,
            projection: Some(plan),
            assembly: root,
            paging,
        })
    }
}
