use std::fmt;

use strum_macros::Display;

/// The lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    /// `<` opening a start tag.
    OpenTagStart,
    /// `</` opening an end tag.
    CloseTagStart,
    /// `>` closing a tag.
    TagEnd,
    /// `/>` closing a self-closing tag.
    SelfTagEnd,
    /// A tag name or attribute name. Which one is decided by the parser.
    Identifier,
    /// `=` between an attribute name and its value.
    Equals,
    /// A double-quoted attribute value. The token text excludes the quotes.
    QuotedString,
    /// A trimmed, non-empty run of text between tags.
    TextContent,
    /// End of input. Always the last token of a stream.
    EndOfFile,
}

/// A single lexical unit: its kind, its literal text and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Literal text (the interior for quoted strings, normalized text for text content).
    pub text: String,
    /// Byte offset of the token's first character in the source.
    pub offset: usize,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// Create an end-of-file token.
    #[must_use]
    pub const fn new_eof(offset: usize) -> Self {
        Self {
            kind: TokenKind::EndOfFile,
            text: String::new(),
            offset,
        }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfFile)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfFile => write!(f, "EOF"),
            kind => write!(f, "{kind}({:?})", self.text),
        }
    }
}
