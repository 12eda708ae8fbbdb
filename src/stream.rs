use std::fmt;

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::position::Position;
use crate::token::{Expected, Token, TokenKind};

/// Cursor over a lexed token sequence, as consumed by a parser.
///
/// The sequence always ends with a [`TokenKind::Eof`] token, so there
/// is always a current token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    current: usize,
    source: Option<String>,
}

impl TokenStream {
    /// Wrap `tokens`, appending an end-of-template token if they do
    /// not already end with one.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|token| token.kind != TokenKind::Eof) {
            let end = tokens.last().map_or_else(Position::start, |token| {
                let mut position = Position {
                    offset: 0,
                    line: token.line(),
                    column: token.column(),
                };
                position.advance(token.as_str());
                position
            });
            tokens.push(Token::eof(end.span()));
        }

        Self {
            tokens,
            current: 0,
            source: None,
        }
    }

    /// Wrap `tokens` lexed from `source`.
    #[must_use]
    pub fn with_source(tokens: Vec<Token>, source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::new(tokens)
        }
    }

    /// The token under the cursor.
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.tokens[self.current]
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Template source the tokens were lexed from, when known.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Return the current token and move to the next one.
    ///
    /// # Errors
    ///
    /// Fails without moving when the current token is the last one.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&Token, SyntaxError> {
        if self.current + 1 >= self.tokens.len() {
            return Err(self.end_of_template());
        }

        self.current += 1;
        Ok(&self.tokens[self.current - 1])
    }

    /// Advance past the current token if it is of `kind`.
    ///
    /// Returns `None` on the final EOF token even when `kind` is
    /// [`TokenKind::Eof`], since there is nothing to advance to. Use
    /// [`Self::test`] or [`Self::is_eof`] to check for the end.
    pub fn next_if(&mut self, kind: TokenKind) -> Option<&Token> {
        if self.test(kind) {
            self.next().ok()
        } else {
            None
        }
    }

    /// Advance past the current token if it is of `kind` and its value
    /// satisfies `expected`. Like [`Self::next_if`], never advances past
    /// the final EOF token.
    pub fn next_if_value<'a>(
        &mut self,
        kind: TokenKind,
        expected: impl Into<Expected<'a>>,
    ) -> Option<&Token> {
        if self.test_value(kind, expected) {
            self.next().ok()
        } else {
            None
        }
    }

    /// Advance past the current token, which must be of `kind`.
    ///
    /// # Errors
    ///
    /// Fails with an unexpected-token error at the current token when
    /// it does not match, or when it matches but is the last token.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&Token, SyntaxError> {
        self.expect_matching(kind, None)
    }

    /// Advance past the current token, which must be of `kind` with a
    /// value satisfying `expected`.
    pub fn expect_value<'a>(
        &mut self,
        kind: TokenKind,
        expected: impl Into<Expected<'a>>,
    ) -> Result<&Token, SyntaxError> {
        self.expect_matching(kind, Some(expected.into()))
    }

    fn expect_matching(
        &mut self,
        kind: TokenKind,
        expected: Option<Expected<'_>>,
    ) -> Result<&Token, SyntaxError> {
        let token = self.current();
        let matches = token.kind == kind
            && expected.is_none_or(|expected| expected.matches(token.value.as_deref()));

        if !matches {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken {
                    found: token.kind,
                    value: token.as_str().to_string(),
                    expected: kind,
                    expected_value: expected.map(|expected| expected.to_string()),
                },
                token.span,
            ));
        }

        self.next()
    }

    /// Token `n` positions after the current one.
    ///
    /// # Errors
    ///
    /// Fails when that position is past the end of the stream.
    pub fn look(&self, n: usize) -> Result<&Token, SyntaxError> {
        self.tokens
            .get(self.current + n)
            .ok_or_else(|| self.end_of_template())
    }

    /// Whether the current token is of `kind`.
    #[must_use]
    pub fn test(&self, kind: TokenKind) -> bool {
        self.current().test(kind)
    }

    /// Whether the current token is of `kind` with a value satisfying
    /// `expected`.
    #[must_use]
    pub fn test_value<'a>(&self, kind: TokenKind, expected: impl Into<Expected<'a>>) -> bool {
        self.current().test_value(kind, expected)
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Splice `tokens` in at the cursor. The first injected token
    /// becomes the current one.
    pub fn inject_tokens<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Token>,
    {
        self.tokens.splice(self.current..self.current, tokens);
    }

    pub const fn rewind(&mut self) {
        self.current = 0;
    }

    /// Template source rebuilt from the token values.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(Token::serialize).collect()
    }

    fn end_of_template(&self) -> SyntaxError {
        SyntaxError::new(SyntaxErrorKind::UnexpectedEndOfTemplate, self.current().span)
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
