//! Tokenizer module.
//!
//! Splits a markup document into tag delimiters, names, quoted values and
//! normalized text runs.

/// Tokenizer state machine implementation.
pub mod core;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{Tokenizer, TokenizerState, tokenize};
pub use token::{Token, TokenKind};
