//! Core Business Logic
//!
//! The validation pipeline and the result it produces, independent of any
//! front-end.

pub mod links;
pub mod result;
pub mod validator;

pub use links::{FileLinkResolver, LinkResolver};
pub use result::{Finding, ValidationResult};
pub use validator::Validator;
