use std::fmt;

/// Source location of a token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}:{}}}", self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of the template. Always the last token of a stream.
    Eof,
    /// Literal text outside of tags, or the body of a comment or
    /// verbatim block.
    Text,
    /// Block tag opening, `{%`.
    BlockStart,
    /// Block tag closing, `%}`, including an absorbed line separator.
    BlockEnd,
    /// Print tag opening, `{{`.
    VariableStart,
    /// Print tag closing, `}}`.
    VariableEnd,
    /// Comment tag opening, `{#`.
    CommentStart,
    /// Comment tag closing, `#}`, including an absorbed line separator.
    CommentEnd,
    Name,
    Number,
    /// Raw string content between quotes, escapes left untouched.
    String,
    Operator,
    Punctuation,
    OpeningQuote,
    ClosingQuote,
    /// Interpolation opening inside a double-quoted string, `#{`.
    InterpolationStart,
    /// Interpolation closing, `}`.
    InterpolationEnd,
    Whitespace,
    /// The `-` modifier next to a tag delimiter.
    TrimmingModifier,
    /// The `~` modifier next to a tag delimiter.
    LineTrimmingModifier,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 20] = [
        Self::Eof,
        Self::Text,
        Self::BlockStart,
        Self::BlockEnd,
        Self::VariableStart,
        Self::VariableEnd,
        Self::CommentStart,
        Self::CommentEnd,
        Self::Name,
        Self::Number,
        Self::String,
        Self::Operator,
        Self::Punctuation,
        Self::OpeningQuote,
        Self::ClosingQuote,
        Self::InterpolationStart,
        Self::InterpolationEnd,
        Self::Whitespace,
        Self::TrimmingModifier,
        Self::LineTrimmingModifier,
    ];

    /// Constant-style name, e.g. `BLOCK_END`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Text => "TEXT",
            Self::BlockStart => "BLOCK_START",
            Self::BlockEnd => "BLOCK_END",
            Self::VariableStart => "VARIABLE_START",
            Self::VariableEnd => "VARIABLE_END",
            Self::CommentStart => "COMMENT_START",
            Self::CommentEnd => "COMMENT_END",
            Self::Name => "NAME",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Operator => "OPERATOR",
            Self::Punctuation => "PUNCTUATION",
            Self::OpeningQuote => "OPENING_QUOTE",
            Self::ClosingQuote => "CLOSING_QUOTE",
            Self::InterpolationStart => "INTERPOLATION_START",
            Self::InterpolationEnd => "INTERPOLATION_END",
            Self::Whitespace => "WHITESPACE",
            Self::TrimmingModifier => "WHITESPACE_CONTROL_MODIFIER_TRIMMING",
            Self::LineTrimmingModifier => "WHITESPACE_CONTROL_MODIFIER_LINE_TRIMMING",
        }
    }

    /// Name prefixed with the enumeration, e.g. `TokenKind::BLOCK_END`.
    #[must_use]
    pub fn qualified_name(self) -> String {
        format!("TokenKind::{}", self.name())
    }

    /// English description used in error messages.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Eof => "end of template",
            Self::Text => "text",
            Self::BlockStart => "begin of statement block",
            Self::BlockEnd => "end of statement block",
            Self::VariableStart => "begin of print statement",
            Self::VariableEnd => "end of print statement",
            Self::CommentStart => "begin of comment statement",
            Self::CommentEnd => "end of comment statement",
            Self::Name => "name",
            Self::Number => "number",
            Self::String => "string",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::OpeningQuote => "opening quote",
            Self::ClosingQuote => "closing quote",
            Self::InterpolationStart => "begin of string interpolation",
            Self::InterpolationEnd => "end of string interpolation",
            Self::Whitespace => "whitespace",
            Self::TrimmingModifier => "trimming whitespace control modifier",
            Self::LineTrimmingModifier => "line trimming whitespace control modifier",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Value constraint for [`Token::test_value`] and the stream's
/// matching operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expected<'a> {
    /// The token value equals this text.
    Value(&'a str),
    /// The token value is one of these.
    OneOf(&'a [&'a str]),
    /// The token value reads as this number.
    Number(f64),
}

impl Expected<'_> {
    /// Whether a token value satisfies the constraint.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };

        match *self {
            Self::Value(expected) => value == expected,
            Self::OneOf(candidates) => candidates.contains(&value),
            Self::Number(expected) => value
                .trim()
                .parse::<f64>()
                .is_ok_and(|number| number == expected),
        }
    }
}

impl fmt::Display for Expected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(value),
            Self::OneOf(values) => f.write_str(&values.join(",")),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl<'a> From<&'a str> for Expected<'a> {
    fn from(value: &'a str) -> Self {
        Self::Value(value)
    }
}

impl<'a> From<&'a [&'a str]> for Expected<'a> {
    fn from(values: &'a [&'a str]) -> Self {
        Self::OneOf(values)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for Expected<'a> {
    fn from(values: &'a [&'a str; N]) -> Self {
        Self::OneOf(values.as_slice())
    }
}

impl From<i32> for Expected<'_> {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Expected<'_> {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<f64> for Expected<'_> {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

/// A single token with its kind, raw source text, and location.
///
/// `value` is exactly the slice of template source the token was
/// lexed from, so concatenating the values of a stream rebuilds the
/// template. Only [`TokenKind::Eof`] carries no value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<String>,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            span,
        }
    }

    /// End-of-template marker at `span`.
    #[must_use]
    pub const fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            value: None,
            span,
        }
    }

    /// Token value, or `""` for the end-of-template marker.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.span.column
    }

    /// Whether the token is of `kind`.
    #[must_use]
    pub fn test(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether the token is of `kind` and its value satisfies
    /// `expected`.
    #[must_use]
    pub fn test_value<'a>(&self, kind: TokenKind, expected: impl Into<Expected<'a>>) -> bool {
        self.kind == kind && expected.into().matches(self.value.as_deref())
    }

    /// Template source this token was lexed from.
    #[must_use]
    pub fn serialize(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.name(), self.as_str())
    }
}
