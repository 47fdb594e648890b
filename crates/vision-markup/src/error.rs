//! Error types for tokenizing and parsing.
//!
//! Every error is fatal for the whole document: the caller gets either a
//! complete tree or one of these values.

use thiserror::Error;
use vision_dom::BuildError;

use crate::tokenizer::TokenKind;

/// The source text could not be split into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A `"` was never closed.
    #[error("unterminated quoted string starting at byte {offset}")]
    UnterminatedString {
        /// Offset of the opening quote.
        offset: usize,
    },
    /// Input ended inside a tag, before its `>` or `/>`.
    #[error("unterminated tag starting at byte {offset}")]
    UnterminatedTag {
        /// Offset of the tag's `<`.
        offset: usize,
    },
    /// A character that cannot start any token, such as a `/` not followed by `>`.
    #[error("unexpected character {character:?} at byte {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Its offset.
        offset: usize,
    },
}

impl LexError {
    /// Byte offset in the source where the problem starts.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnterminatedString { offset }
            | Self::UnterminatedTag { offset }
            | Self::UnexpectedCharacter { offset, .. } => *offset,
        }
    }
}

/// The token stream does not follow the element grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The grammar required one token kind and found another.
    #[error("expected {expected}, found {found} at byte {offset}")]
    UnexpectedToken {
        /// What the grammar required.
        expected: TokenKind,
        /// What was actually there.
        found: TokenKind,
        /// Offset of the found token.
        offset: usize,
    },
    /// A closing tag does not name the element it closes.
    #[error("tag mismatch: <{open}> closed by </{close}> at byte {offset}")]
    TagMismatch {
        /// Name from the opening tag.
        open: String,
        /// Name from the closing tag.
        close: String,
        /// Offset of the closing tag's name.
        offset: usize,
    },
    /// The tokens ran out in the middle of an element.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput {
        /// What the grammar required.
        expected: TokenKind,
    },
    /// Elements are nested deeper than the configured limit.
    #[error("elements nested deeper than {limit} at byte {offset}")]
    NestingTooDeep {
        /// The configured maximum depth.
        limit: usize,
        /// Offset of the opening tag that crossed the limit.
        offset: usize,
    },
    /// The tree builder rejected an operation.
    #[error("tree construction failed: {0}")]
    Tree(#[from] BuildError),
}

impl ParseError {
    /// Byte offset of the offending token, if the error points at one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::TagMismatch { offset, .. }
            | Self::NestingTooDeep { offset, .. } => Some(*offset),
            Self::UnexpectedEndOfInput { .. } | Self::Tree(_) => None,
        }
    }
}

/// Either stage of [`parse_document`](crate::parse_document) failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// Tokenizing failed.
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    /// Parsing failed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl MarkupError {
    /// Byte offset where the problem was found, if known.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::Lex(err) => Some(err.offset()),
            Self::Parse(err) => err.offset(),
        }
    }
}
