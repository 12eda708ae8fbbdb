use crate::config::{ConfigError, LexerConfig};
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::patterns::{self, PUNCTUATION, PatternSet, Tag, TagStart, VerbatimTag};
use crate::position::Position;
use crate::stream::TokenStream;
use crate::token::{Span, Token, TokenKind};

/// Template lexer for one delimiter configuration.
///
/// Matchers are compiled once in [`Lexer::new`]; the lexer holds no
/// per-run state, so one instance can tokenize any number of
/// templates, from any number of threads.
#[derive(Debug, Clone)]
pub struct Lexer {
    config: LexerConfig,
    patterns: PatternSet,
}

impl Lexer {
    /// Validate `config` and compile its matchers.
    pub fn new(config: LexerConfig) -> Result<Self, ConfigError> {
        let patterns = PatternSet::compile(&config)?;
        Ok(Self { config, patterns })
    }

    #[must_use]
    pub const fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Tokenize a template source string.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` on a character no rule accepts, a
    /// mismatched closing bracket, or a tag, comment, verbatim block,
    /// bracket, string or interpolation left open at end of input.
    pub fn tokenize(&self, source: &str) -> Result<TokenStream, SyntaxError> {
        let tokens = Run::new(&self.patterns, self.config.whitespace_trim, source).tokenize()?;
        Ok(TokenStream::with_source(tokens, source))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    Block,
    Variable,
    String,
    Interpolation,
}

/// An open bracket, quote or interpolation.
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    value: &'a str,
    expected: &'a str,
    opened_at: Span,
}

/// State of one `tokenize` call.
struct Run<'a> {
    patterns: &'a PatternSet,
    whitespace_trim: char,
    source: &'a str,
    position: Position,
    state: State,
    states: Vec<State>,
    scopes: Vec<Scope<'a>>,
    tokens: Vec<Token>,
    tag_starts: Vec<TagStart>,
    next_tag: usize,
    tag_opened_at: Span,
}

impl<'a> Run<'a> {
    fn new(patterns: &'a PatternSet, whitespace_trim: char, source: &'a str) -> Self {
        Self {
            patterns,
            whitespace_trim,
            source,
            position: Position::start(),
            state: State::Data,
            states: Vec::new(),
            scopes: Vec::new(),
            tokens: Vec::new(),
            tag_starts: patterns.tag_starts(source),
            next_tag: 0,
            tag_opened_at: Span::new(1, 1),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        while self.position.offset < self.source.len() {
            match self.state {
                State::Data => self.lex_data()?,
                State::Block => self.lex_block()?,
                State::Variable => self.lex_variable()?,
                State::String => self.lex_string(),
                State::Interpolation => self.lex_interpolation()?,
            }
        }

        let opened_at = self.tag_opened_at;
        match self.state {
            State::Variable => {
                return Err(self.error(SyntaxErrorKind::UnclosedVariable { opened_at }));
            }
            State::Block => return Err(self.error(SyntaxErrorKind::UnclosedBlock { opened_at })),
            _ => {}
        }

        if let Some(scope) = self.scopes.last() {
            return Err(self.error(SyntaxErrorKind::UnclosedScope {
                marker: scope.value.to_string(),
                opened_at: scope.opened_at,
            }));
        }

        self.tokens.push(Token::eof(self.position.span()));
        Ok(self.tokens)
    }

    fn lex_data(&mut self) -> Result<(), SyntaxError> {
        let Some(tag) = self.next_tag_start() else {
            let rest = self.rest();
            self.push_token(TokenKind::Text, rest);
            return Ok(());
        };

        let source = self.source;
        self.push_token(TokenKind::Text, &source[self.position.offset..tag.start]);
        self.tag_opened_at = self.position.span();

        let delimiter = &source[tag.start..tag.modifier_start];
        let modifier = &source[tag.modifier_start..tag.end];

        match tag.tag {
            Tag::Comment => {
                self.push_token(TokenKind::CommentStart, delimiter);
                self.push_trim(modifier);
                self.lex_comment()
            }
            Tag::Block => {
                if let Some(open) = self.patterns.verbatim_open(self.rest()) {
                    self.push_verbatim_tag(&open);
                    return self.lex_verbatim();
                }

                self.push_token(TokenKind::BlockStart, delimiter);
                self.push_trim(modifier);
                self.push_state(State::Block);
                Ok(())
            }
            Tag::Variable => {
                self.push_token(TokenKind::VariableStart, delimiter);
                self.push_trim(modifier);
                self.push_state(State::Variable);
                Ok(())
            }
        }
    }

    /// Next precomputed tag start at or after the cursor.
    ///
    /// A match the cursor landed inside of may hide a later tag start
    /// the whole-source scan never reported, so that case searches
    /// again from the cursor.
    fn next_tag_start(&mut self) -> Option<TagStart> {
        let cursor = self.position.offset;
        let mut overlapped = false;

        while let Some(tag) = self.tag_starts.get(self.next_tag) {
            if tag.start >= cursor {
                break;
            }
            overlapped |= tag.end > cursor;
            self.next_tag += 1;
        }

        if overlapped {
            return self.patterns.tag_start_at(self.source, cursor);
        }

        let tag = self.tag_starts.get(self.next_tag).copied()?;
        self.next_tag += 1;
        Some(tag)
    }

    fn lex_comment(&mut self) -> Result<(), SyntaxError> {
        self.lex_whitespace();

        let rest = self.rest();
        let Some(end) = self.patterns.comment_end(rest) else {
            self.position.advance(rest);
            return Err(self.error(SyntaxErrorKind::UnclosedComment {
                opened_at: self.tag_opened_at,
            }));
        };

        self.push_token(TokenKind::Text, &rest[..end.offset]);
        self.push_token(TokenKind::Whitespace, end.whitespace);
        self.push_trim(end.modifier);
        self.push_token(TokenKind::CommentEnd, end.delimiter);
        Ok(())
    }

    fn lex_verbatim(&mut self) -> Result<(), SyntaxError> {
        let rest = self.rest();
        let Some(close) = self.patterns.verbatim_close(rest) else {
            self.position.advance(rest);
            return Err(self.error(SyntaxErrorKind::UnclosedVerbatim {
                opened_at: self.tag_opened_at,
            }));
        };

        self.push_token(TokenKind::Text, &rest[..close.offset]);
        self.push_verbatim_tag(&close);
        Ok(())
    }

    fn push_verbatim_tag(&mut self, tag: &VerbatimTag<'a>) {
        self.push_token(TokenKind::BlockStart, tag.start);
        self.push_trim(tag.open_modifier);
        self.push_token(TokenKind::Whitespace, tag.leading_whitespace);
        self.push_token(TokenKind::Name, tag.name);
        self.push_token(TokenKind::Whitespace, tag.trailing_whitespace);
        self.push_trim(tag.close_modifier);
        self.push_token(TokenKind::BlockEnd, tag.end);
    }

    fn lex_block(&mut self) -> Result<(), SyntaxError> {
        self.lex_whitespace();

        if self.scopes.is_empty() {
            if let Some(end) = self.patterns.block_end(self.rest()) {
                self.push_trim(end.modifier);
                self.push_token(TokenKind::BlockEnd, end.delimiter);
                self.pop_state();
                return Ok(());
            }
        }

        self.lex_expression()
    }

    fn lex_variable(&mut self) -> Result<(), SyntaxError> {
        self.lex_whitespace();

        if self.scopes.is_empty() {
            if let Some(end) = self.patterns.variable_end(self.rest()) {
                self.push_trim(end.modifier);
                self.push_token(TokenKind::VariableEnd, end.delimiter);
                self.pop_state();
                return Ok(());
            }
        }

        self.lex_expression()
    }

    fn lex_string(&mut self) {
        let patterns = self.patterns;
        let rest = self.rest();

        if let Some(open) = patterns.interpolation_open(rest) {
            self.push_scope(open.marker, patterns.interpolation_end());
            self.push_token(TokenKind::InterpolationStart, open.marker);
            self.push_token(TokenKind::Whitespace, open.whitespace);
            self.push_state(State::Interpolation);
            return;
        }

        let len = patterns.string_body(rest);
        if len > 0 {
            self.push_token(TokenKind::String, &rest[..len]);
            return;
        }

        // The body stops only at `"` or an interpolation start, and the
        // latter was handled above.
        let quote = self.scopes.pop().map_or("\"", |scope| scope.expected);
        self.push_token(TokenKind::ClosingQuote, quote);
        self.pop_state();
    }

    fn lex_interpolation(&mut self) -> Result<(), SyntaxError> {
        let patterns = self.patterns;
        let in_marker = self
            .scopes
            .last()
            .is_some_and(|scope| scope.value == patterns.interpolation_marker());

        if in_marker {
            if let Some(close) = patterns.interpolation_close(self.rest()) {
                self.push_token(TokenKind::Whitespace, close.whitespace);
                self.push_token(TokenKind::InterpolationEnd, close.marker);
                self.scopes.pop();
                self.pop_state();
                return Ok(());
            }
        }

        self.lex_expression()
    }

    fn lex_expression(&mut self) -> Result<(), SyntaxError> {
        self.lex_whitespace();

        let patterns = self.patterns;
        let rest = self.rest();
        let Some(first) = rest.chars().next() else {
            return Ok(());
        };
        let head = &rest[..first.len_utf8()];

        if let Some(len) = patterns.operator(rest) {
            self.push_token(TokenKind::Operator, &rest[..len]);
        } else if let Some(len) = patterns::name(rest) {
            self.push_token(TokenKind::Name, &rest[..len]);
        } else if let Some(len) = patterns::number(rest) {
            self.push_token(TokenKind::Number, &rest[..len]);
        } else if let Some(expected) = patterns::closer_for(head) {
            self.push_scope(head, expected);
            self.push_token(TokenKind::Punctuation, head);
        } else if patterns::is_closing_bracket(head) {
            let Some(scope) = self.scopes.last() else {
                return Err(self.error(SyntaxErrorKind::UnexpectedClosingBracket(first)));
            };

            if scope.expected != head {
                return Err(self.error(SyntaxErrorKind::UnclosedBracket {
                    opener: scope.value.to_string(),
                    opened_at: scope.opened_at,
                }));
            }

            self.push_token(TokenKind::Punctuation, head);
            self.scopes.pop();
        } else if PUNCTUATION.contains(&first) {
            self.push_token(TokenKind::Punctuation, head);
        } else if let Some(quoted) = patterns.quoted_string(rest) {
            self.push_token(TokenKind::OpeningQuote, quoted.quote);
            if !quoted.body.is_empty() {
                self.push_token(TokenKind::String, quoted.body);
            }
            self.push_token(TokenKind::ClosingQuote, quoted.quote);
        } else if first == '"' {
            self.push_scope(head, "\"");
            self.push_token(TokenKind::OpeningQuote, head);
            self.push_state(State::String);
        } else {
            return Err(self.error(SyntaxErrorKind::UnexpectedCharacter {
                remaining: rest.to_string(),
            }));
        }

        Ok(())
    }

    fn lex_whitespace(&mut self) {
        let rest = self.rest();
        let len = patterns::whitespace(rest);
        self.push_token(TokenKind::Whitespace, &rest[..len]);
    }

    /// Unconsumed source.
    fn rest(&self) -> &'a str {
        let source = self.source;
        &source[self.position.offset..]
    }

    /// Emit a token for `value`, which must start at the cursor, and
    /// move past it. Empty text and whitespace emit nothing.
    fn push_token(&mut self, kind: TokenKind, value: &str) {
        if matches!(kind, TokenKind::Text | TokenKind::Whitespace) && value.is_empty() {
            return;
        }

        self.tokens
            .push(Token::new(kind, value, self.position.span()));
        self.position.advance(value);
    }

    fn push_trim(&mut self, modifier: &str) {
        let Some(marker) = modifier.chars().next() else {
            return;
        };

        let kind = if marker == self.whitespace_trim {
            TokenKind::TrimmingModifier
        } else {
            TokenKind::LineTrimmingModifier
        };
        self.push_token(kind, modifier);
    }

    fn push_state(&mut self, state: State) {
        self.states.push(self.state);
        self.state = state;
    }

    fn pop_state(&mut self) {
        self.state = self.states.pop().unwrap_or(State::Data);
    }

    fn push_scope(&mut self, value: &'a str, expected: &'a str) {
        self.scopes.push(Scope {
            value,
            expected,
            opened_at: self.position.span(),
        });
    }

    const fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.position.span())
    }
}
