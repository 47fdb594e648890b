//! Tokenizer and parser for the vision markup dialect.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer**: a single-pass state machine producing tag delimiters,
//!   identifiers, quoted strings, normalized text runs and an end-of-file token
//! - **Parser**: a recursive-descent tree builder with attribute parsing,
//!   self-closing tags and strict tag balancing
//!
//! The dialect is a small XML/HTML-like subset: `<name attr="value">`,
//! `<name attr="value"/>`, `</name>` and free text. There are no comments,
//! entities, DOCTYPEs or unquoted attribute values.
//!
//! # Example
//!
//! ```
//! let tree = vision_markup::parse_document(r#"<div id="x">hi</div>"#).unwrap();
//! assert_eq!(tree.root_element().name(), "div");
//! assert_eq!(tree.root_element().inner_text(), "hi");
//! ```

/// Error types for both stages.
pub mod error;
/// Parser and tree construction.
pub mod parser;
/// Tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::{LexError, MarkupError, ParseError};
pub use parser::{DEFAULT_MAX_DEPTH, ParseIssue, Parser, parse};
pub use tokenizer::{Token, TokenKind, Tokenizer, tokenize};
pub use vision_dom::{Element, ElementTree, NodeId};

/// Tokenize and parse a whole document.
///
/// # Errors
///
/// Returns [`MarkupError::Lex`] or [`MarkupError::Parse`] for the first
/// problem found.
pub fn parse_document(source: &str) -> Result<ElementTree, MarkupError> {
    let tokens = tokenize(source)?;
    Ok(parse(tokens)?)
}
