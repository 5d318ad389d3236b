//! Location tracking
//!
//! Maps structural paths and link targets back to source lines.

pub mod index;
pub mod path;
pub mod tokens;

pub use index::LineIndex;
pub use path::PathStack;
pub use tokens::{Position, Token, TokenKind, Tokens};
