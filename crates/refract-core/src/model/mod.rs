//! Registration-time member tables for schema types.
//!
//! The member table is the compiler's only view of the model: a mapping
//! from stable member identifiers to typed descriptors (kind, key-ness,
//! navigation target), built once when the schema loads and immutable
//! after `SchemaBuilder::build`.

pub mod entity;
pub mod member;
pub mod schema;

pub use entity::{EntityId, EntityType};
pub use member::{Cardinality, Member, MemberId, MemberKind, MemberRef, ScalarKind};
pub use schema::{EntitySet, Schema, SchemaBuilder, SchemaError, SetId};
