//! LSP Protocol Implementation
//!
//! Publishes validation findings for open XML documents.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
