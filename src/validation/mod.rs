//! Validation Engine
//!
//! Structural checks, separated from document reading and from profiles.

pub mod alert_rules;
pub mod engine;
pub mod feed_rules;
pub mod schema;
pub mod signature;

pub use engine::StructuralValidator;
pub use schema::{NoSchema, SchemaDiagnostic, SchemaValidator};
pub use signature::{SignatureCheck, SignatureValidator};
