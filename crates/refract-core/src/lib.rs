//! Core runtime for Refract: schema member tables, the select/expand
//! projection compiler, the mirrored assembly tree, and the generic
//! row-builder, with the ergonomics exported via the `prelude`.

// public exports are one module level down
pub mod compile;
pub mod element;
pub mod error;
pub mod model;
pub mod request;
pub mod row;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, row-builders, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        compile::{CompileOptions, Compiled, Compiler, MetadataLevel},
        model::{
            Cardinality, EntityId, EntitySet, EntityType, Member, MemberId, MemberKind, MemberRef,
            ScalarKind, Schema, SchemaBuilder, SetId,
        },
        request::{
            ExpandItem, OrderByItem, OrderByKey, OrderDirection, Predicate, QueryRequest,
            SelectItem,
        },
        value::Value,
    };
}
