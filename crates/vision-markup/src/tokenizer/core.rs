use strum_macros::Display;

use super::token::{Token, TokenKind};
use crate::error::LexError;

/// The tokenizer state machine.
///
/// `Markup` dispatches on the current character; every other state consumes
/// one run of input, emits at most one token and switches back to `Markup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Between tokens inside or around tags. Whitespace is skipped here.
    Markup,
    /// Right after a tag closed: collecting text up to the next `<`.
    TextContent,
    /// Inside a `"..."` attribute value.
    QuotedString,
    /// Collecting a tag or attribute name.
    Identifier,
}

/// Turns source text into a token stream in a single left-to-right pass.
///
/// The tokenizer never backtracks. Tag delimiters, `=` and quotes are
/// recognized in the markup state; a `>` (or `/>`) switches to text content
/// so the text between tags comes out as one normalized token.
pub struct Tokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) token_stream: Vec<Token>,
    pub(super) at_eof: bool,

    /// Offset of the `<` of the tag we are inside, if any. Used to report
    /// a tag that runs into the end of input.
    pub(super) tag_start: Option<usize>,

    /// Offset of the opening `"` while in the quoted string state.
    pub(super) quote_start: usize,
}

impl Tokenizer {
    /// Create a new tokenizer for the given input. The initial state is markup.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            state: TokenizerState::Markup,
            input: input.into(),
            current_pos: 0,
            token_stream: Vec::new(),
            at_eof: false,
            tag_start: None,
            quote_start: 0,
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after [`run`](Self::run) to get the tokens for the parser.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// The tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// Run the state machine over the whole input.
    ///
    /// On success the stream ends with exactly one [`TokenKind::EndOfFile`].
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for an unterminated quoted string, a tag cut off
    /// by the end of input, or a character that cannot start a token.
    pub fn run(&mut self) -> Result<(), LexError> {
        while !self.at_eof {
            match self.state {
                TokenizerState::Markup => self.handle_markup_state()?,
                TokenizerState::TextContent => self.handle_text_content_state(),
                TokenizerState::QuotedString => self.handle_quoted_string_state()?,
                TokenizerState::Identifier => self.handle_identifier_state(),
            }
        }
        Ok(())
    }

    fn handle_markup_state(&mut self) -> Result<(), LexError> {
        let start = self.current_pos;
        match self.consume() {
            // Whitespace between tokens is not emitted.
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('<') => {
                self.tag_start = Some(start);
                if self.peek_codepoint(0) == Some('/') {
                    self.consume_string("/");
                    self.emit(TokenKind::CloseTagStart, "</", start);
                } else {
                    self.emit(TokenKind::OpenTagStart, "<", start);
                }
            }
            Some('>') => {
                self.tag_start = None;
                self.emit(TokenKind::TagEnd, ">", start);
                self.switch_to(TokenizerState::TextContent);
            }
            Some('/') => match (self.peek_codepoint(0), self.tag_start) {
                (Some('>'), _) => {
                    self.consume_string(">");
                    self.tag_start = None;
                    self.emit(TokenKind::SelfTagEnd, "/>", start);
                    self.switch_to(TokenizerState::TextContent);
                }
                // Input ran out before the `>` of `/>`.
                (None, Some(offset)) => return Err(LexError::UnterminatedTag { offset }),
                _ => {
                    return Err(LexError::UnexpectedCharacter {
                        character: '/',
                        offset: start,
                    });
                }
            },
            Some('=') => {
                self.emit(TokenKind::Equals, "=", start);
            }
            Some('"') => {
                self.quote_start = start;
                self.switch_to(TokenizerState::QuotedString);
            }
            Some(_) => {
                self.reconsume_in(TokenizerState::Identifier, start);
            }
            None => {
                if let Some(offset) = self.tag_start {
                    return Err(LexError::UnterminatedTag { offset });
                }
                self.emit_eof_token();
            }
        }
        Ok(())
    }

    fn handle_text_content_state(&mut self) {
        let start = self.current_pos;
        let end = self.input[start..]
            .find('<')
            .map_or(self.input.len(), |i| start + i);
        let raw = &self.input[start..end];
        let text = Self::normalize_text(raw);
        // The token points at its first visible character.
        let offset = start + (raw.len() - raw.trim_start().len());
        self.current_pos = end;

        if !text.is_empty() {
            self.emit(TokenKind::TextContent, text, offset);
        }
        self.switch_to(TokenizerState::Markup);
    }

    fn handle_quoted_string_state(&mut self) -> Result<(), LexError> {
        let start = self.current_pos;
        let Some(len) = self.input[start..].find('"') else {
            return Err(LexError::UnterminatedString {
                offset: self.quote_start,
            });
        };
        let value = self.input[start..start + len].to_string();
        // Skip the interior and the closing quote.
        self.current_pos = start + len + 1;
        self.emit(TokenKind::QuotedString, value, self.quote_start);
        self.switch_to(TokenizerState::Markup);
        Ok(())
    }

    fn handle_identifier_state(&mut self) {
        let start = self.current_pos;
        while let Some(c) = self.peek_codepoint(0) {
            if Self::ends_identifier(c) || (c == '/' && self.peek_codepoint(1) == Some('>')) {
                break;
            }
            let _ = self.consume();
        }
        let name = self.input[start..self.current_pos].to_string();
        self.emit(TokenKind::Identifier, name, start);
        self.switch_to(TokenizerState::Markup);
    }
}

/// Tokenize `source` in one call.
///
/// # Errors
///
/// See [`Tokenizer::run`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokenizer = Tokenizer::new(source);
    tokenizer.run()?;
    Ok(tokenizer.into_tokens())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_states_return_to_markup() {
        let mut tokenizer = Tokenizer::new(r#"<a b="c">d</a>"#);
        tokenizer.run().unwrap();
        assert_eq!(tokenizer.state, TokenizerState::Markup);
        assert!(tokenizer.at_eof);
        assert_eq!(tokenizer.tag_start, None);
    }

    #[test]
    fn test_close_tag_start_is_one_token() {
        assert_eq!(
            kinds("</a>"),
            vec![
                TokenKind::CloseTagStart,
                TokenKind::Identifier,
                TokenKind::TagEnd,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_slash_inside_identifier_is_kept() {
        let tokens = tokenize("<a/b>").unwrap();
        assert_eq!(tokens[1].text, "a/b");
    }
}
