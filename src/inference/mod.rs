//! Payload inference
//!
//! Derives the two artifacts the catalog keeps per record: a structural
//! JSON schema and a logical event-type identifier.

pub mod event_type;
pub mod schema;

pub use event_type::{catalog_event_id, catalog_event_id_with, resolve_event_type, ID_SEPARATOR};
pub use schema::{infer_schema, SchemaError, MAX_DEPTH};
