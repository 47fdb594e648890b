//! Helper functions for the tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling
//! - Token emission
//! - Text content normalization

use super::core::{Tokenizer, TokenizerState};
use super::token::{Token, TokenKind};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Tokenizer {
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// Transitions to a new state and rewinds to `pos`, so the character
    /// there is processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState, pos: usize) {
        self.current_pos = pos;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl Tokenizer {
    /// Returns the character at the current position and advances the position.
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at a codepoint at the given offset from the current position without
    /// consuming it.
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// Whitespace skipped between tokens.
    pub(super) const fn is_whitespace_char(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r')
    }

    /// Characters that end a tag or attribute name. A `/` directly followed
    /// by `>` also ends one; the caller checks that pair.
    pub(super) const fn ends_identifier(c: char) -> bool {
        Self::is_whitespace_char(c) || matches!(c, '=' | '>' | '<' | '"')
    }

    /// Text content as it ends up in an element's inner text: line breaks
    /// removed, runs of whitespace collapsed to one space, ends trimmed.
    ///
    /// Whitespace here is Unicode whitespace (`char::is_whitespace`), so an
    /// ideographic space is trimmed like an ASCII one. Inside tags only the
    /// ASCII characters of [`is_whitespace_char`](Self::is_whitespace_char)
    /// separate tokens.
    pub(super) fn normalize_text(raw: &str) -> String {
        let joined: String = raw.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl Tokenizer {
    /// Adds a token to the output stream.
    pub(super) fn emit(&mut self, kind: TokenKind, text: impl Into<String>, offset: usize) {
        self.token_stream.push(Token::new(kind, text, offset));
    }

    /// Emit the end-of-file token and stop the main loop.
    pub(super) fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::new_eof(self.input.len()));
        self.at_eof = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_ends() {
        assert_eq!(Tokenizer::normalize_text("  hello  "), "hello");
    }

    #[test]
    fn test_normalize_collapses_internal_runs() {
        assert_eq!(Tokenizer::normalize_text("hello   world"), "hello world");
        assert_eq!(Tokenizer::normalize_text("a \t b"), "a b");
    }

    #[test]
    fn test_normalize_strips_line_breaks() {
        assert_eq!(Tokenizer::normalize_text("\n    hello\r\n"), "hello");
        assert_eq!(Tokenizer::normalize_text("hel\nlo"), "hello");
    }

    #[test]
    fn test_normalize_handles_unicode_whitespace() {
        assert_eq!(Tokenizer::normalize_text("\u{3000}hi\u{3000}"), "hi");
        assert_eq!(Tokenizer::normalize_text("a\u{a0}\u{a0}b"), "a b");
    }

    #[test]
    fn test_normalize_whitespace_only_is_empty() {
        assert_eq!(Tokenizer::normalize_text(" \n\t "), "");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut tokenizer = Tokenizer::new("ab");
        assert_eq!(tokenizer.peek_codepoint(1), Some('b'));
        assert_eq!(tokenizer.consume(), Some('a'));
        assert_eq!(tokenizer.peek_codepoint(0), Some('b'));
        assert_eq!(tokenizer.peek_codepoint(1), None);
    }
}
