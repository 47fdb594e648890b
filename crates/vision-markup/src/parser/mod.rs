//! Parser module for tree construction.

/// Recursive-descent parser implementation.
pub mod core;
/// Bounds-safe cursor over the token stream.
pub mod cursor;

pub use self::core::{DEFAULT_MAX_DEPTH, ParseIssue, Parser, parse};
pub use cursor::TokenCursor;
