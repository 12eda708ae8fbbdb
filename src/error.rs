use std::fmt;

use crate::token::{Span, TokenKind};

/// Classifies a syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// No scanning rule matches. Carries the whole unconsumed tail of
    /// the template.
    UnexpectedCharacter { remaining: String },
    /// Closing bracket with no bracket open.
    UnexpectedClosingBracket(char),
    /// Closing bracket that does not match the innermost open scope.
    UnclosedBracket { opener: String, opened_at: Span },
    UnclosedVariable { opened_at: Span },
    UnclosedBlock { opened_at: Span },
    UnclosedComment { opened_at: Span },
    UnclosedVerbatim { opened_at: Span },
    /// Bracket, quote or interpolation still open at end of input.
    UnclosedScope { marker: String, opened_at: Span },
    /// A token stream was read past its last token.
    UnexpectedEndOfTemplate,
    /// A token stream held a different token than the one expected.
    UnexpectedToken {
        found: TokenKind,
        value: String,
        expected: TokenKind,
        expected_value: Option<String>,
    },
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter { remaining } => {
                write!(f, "Unexpected character \"{remaining}\".")
            }
            Self::UnexpectedClosingBracket(ch) => write!(f, "Unexpected \"{ch}\"."),
            Self::UnclosedBracket { opener, opened_at } => {
                write!(f, "Unclosed bracket \"{opener}\" opened at {opened_at}.")
            }
            Self::UnclosedVariable { opened_at } => {
                write!(
                    f,
                    "Unexpected end of file: unclosed variable opened at {opened_at}."
                )
            }
            Self::UnclosedBlock { opened_at } => {
                write!(
                    f,
                    "Unexpected end of file: unclosed block opened at {opened_at}."
                )
            }
            Self::UnclosedComment { opened_at } => {
                write!(
                    f,
                    "Unexpected end of file: unclosed comment opened at {opened_at}."
                )
            }
            Self::UnclosedVerbatim { opened_at } => {
                write!(
                    f,
                    "Unexpected end of file: unclosed verbatim opened at {opened_at}."
                )
            }
            Self::UnclosedScope { marker, opened_at } => {
                write!(
                    f,
                    "Unexpected end of file: unclosed \"{marker}\" opened at {opened_at}."
                )
            }
            Self::UnexpectedEndOfTemplate => write!(f, "Unexpected end of template."),
            Self::UnexpectedToken {
                found,
                value,
                expected,
                expected_value: None,
            } => {
                write!(
                    f,
                    "Unexpected token \"{found}\" of value \"{value}\" \
                     (\"{expected}\" expected)."
                )
            }
            Self::UnexpectedToken {
                found,
                value,
                expected,
                expected_value: Some(expected_value),
            } => {
                write!(
                    f,
                    "Unexpected token \"{found}\" of value \"{value}\" \
                     (\"{expected}\" expected with value \"{expected_value}\")."
                )
            }
        }
    }
}

/// Error produced while lexing a template or reading a token stream.
///
/// `span` is where the problem was detected, which is not always
/// where the offending construct began; "opened at" positions live in
/// the kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

impl SyntaxError {
    #[must_use]
    pub const fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Message without the location suffix.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.span.column
    }
}
