use vision_dom::{ElementTree, TreeBuilder};

use super::cursor::TokenCursor;
use crate::error::ParseError;
use crate::tokenizer::{Token, TokenKind};

/// Nesting limit used unless [`Parser::with_max_depth`] says otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Something accepted by the parser that the author probably did not intend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where this was encountered.
    pub token_index: usize,
}

/// Recursive-descent parser that builds an [`ElementTree`] from tokens.
///
/// ```text
/// Element   := OpenTagStart Identifier Attribute*
///              (SelfTagEnd | TagEnd Children CloseTagStart Identifier TagEnd)
/// Attribute := Identifier Equals QuotedString
/// Children  := (Element | TextContent)*
/// ```
///
/// The document must consist of exactly one element. Any grammar violation
/// aborts the parse.
pub struct Parser {
    cursor: TokenCursor,
    builder: TreeBuilder,

    /// Non-fatal issues encountered during parsing.
    issues: Vec<ParseIssue>,

    max_depth: usize,
}

impl Parser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            builder: TreeBuilder::new(),
            issues: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply elements may nest.
    #[must_use]
    pub const fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Parse the whole token stream into a tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn run(self) -> Result<ElementTree, ParseError> {
        self.run_with_issues().map(|(tree, _)| tree)
    }

    /// Parse the whole token stream and also return the issues seen on the way.
    ///
    /// Issues are only collected, never printed; reporting them is up to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn run_with_issues(mut self) -> Result<(ElementTree, Vec<ParseIssue>), ParseError> {
        self.parse_element()?;
        let _ = self.expect(TokenKind::EndOfFile)?;
        let tree = self.builder.finish()?;
        Ok((tree, self.issues))
    }

    fn parse_element(&mut self) -> Result<(), ParseError> {
        let open = self.expect(TokenKind::OpenTagStart)?;
        if self.builder.depth() >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                offset: open.offset,
            });
        }

        let name = self.expect(TokenKind::Identifier)?.text;
        let _ = self.builder.open_element(name.as_str())?;
        self.parse_attributes(&name)?;

        // A self-closing tag ends the element: no children, no closing tag.
        if self.cursor.kind() == TokenKind::SelfTagEnd {
            let _ = self.cursor.advance();
            let _ = self.builder.close_self_closing()?;
            return Ok(());
        }

        let _ = self.expect(TokenKind::TagEnd)?;
        self.parse_children()?;

        let _ = self.expect(TokenKind::CloseTagStart)?;
        let close = self.expect(TokenKind::Identifier)?;
        if close.text != name {
            return Err(ParseError::TagMismatch {
                open: name,
                close: close.text,
                offset: close.offset,
            });
        }
        let _ = self.expect(TokenKind::TagEnd)?;
        let _ = self.builder.close_element()?;
        Ok(())
    }

    fn parse_attributes(&mut self, tag_name: &str) -> Result<(), ParseError> {
        while self.cursor.kind() == TokenKind::Identifier {
            let key = self.cursor.advance();
            let _ = self.expect(TokenKind::Equals)?;
            let value = self.expect(TokenKind::QuotedString)?;

            if self.builder.set_attribute(key.text.as_str(), value.text)?.is_some() {
                self.report_issue(format!(
                    "duplicate attribute '{}' on <{tag_name}>, last value wins",
                    key.text
                ));
            }
        }
        Ok(())
    }

    fn parse_children(&mut self) -> Result<(), ParseError> {
        loop {
            match self.cursor.kind() {
                TokenKind::OpenTagStart => self.parse_element()?,
                TokenKind::TextContent => {
                    let text = self.cursor.advance();
                    self.builder.append_text(&text.text)?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consume a token of kind `expected` or fail.
    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        let found = self.cursor.peek();
        if found.kind == expected {
            return Ok(self.cursor.advance());
        }
        if found.is_eof() {
            return Err(ParseError::UnexpectedEndOfInput { expected });
        }
        Err(ParseError::UnexpectedToken {
            expected,
            found: found.kind,
            offset: found.offset,
        })
    }

    fn report_issue(&mut self, message: String) {
        self.issues.push(ParseIssue {
            message,
            token_index: self.cursor.index(),
        });
    }
}

/// Parse a token stream in one call.
///
/// # Errors
///
/// See [`Parser::run`].
pub fn parse(tokens: Vec<Token>) -> Result<ElementTree, ParseError> {
    Parser::new(tokens).run()
}
