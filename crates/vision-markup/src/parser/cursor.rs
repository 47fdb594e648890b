use crate::tokenizer::{Token, TokenKind};

/// Read position in a token stream.
///
/// Reading past the last token keeps yielding an end-of-file token, so the
/// parser never has to bounds-check.
#[derive(Debug)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    index: usize,
    end: Token,
}

impl TokenCursor {
    /// Create a cursor at the first token.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let end_offset = tokens.last().map_or(0, |t| t.offset);
        Self {
            tokens,
            index: 0,
            end: Token::new_eof(end_offset),
        }
    }

    /// The current token.
    #[must_use]
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.end)
    }

    /// Kind of the current token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Index of the current token in the stream.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Return the current token and move past it.
    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }
}
