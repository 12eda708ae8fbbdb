//! Lexer and token stream for Twig-style templates.
//!
//! Turns template source into a flat, position-annotated sequence of
//! tokens for a downstream parser: literal text, the three tag kinds
//! (`{{ }}`, `{% %}`, `{# #}`), expressions inside them, strings with
//! `#{ }` interpolation, whitespace-control modifiers, and verbatim
//! blocks. Every byte of the source ends up in exactly one token, so
//! a stream serializes back to the template it came from.
//!
//! # Quick start
//!
//! ## Tokenize a template
//!
//! ```
//! use twig_lexer::{TokenKind, tokenize};
//!
//! let mut stream = tokenize("Hello {{ name }}!").unwrap();
//! assert_eq!(stream.expect(TokenKind::Text).unwrap().as_str(), "Hello ");
//! assert!(stream.test(TokenKind::VariableStart));
//! assert_eq!(stream.serialize(), "Hello {{ name }}!");
//! ```
//!
//! ## Use custom delimiters
//!
//! ```
//! use twig_lexer::{Lexer, LexerConfig, TokenKind};
//!
//! let lexer = Lexer::new(
//!     LexerConfig::new()
//!         .variable_pair("${", "}")
//!         .interpolation_pair("%{", "}"),
//! )
//! .unwrap();
//!
//! let stream = lexer.tokenize("${ user.name }").unwrap();
//! assert!(stream.test(TokenKind::VariableStart));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod error;
pub mod lexer;
pub mod patterns;
pub mod position;
pub mod stream;
pub mod token;

pub use config::{ConfigError, DEFAULT_OPERATORS, LexerConfig};
pub use error::{SyntaxError, SyntaxErrorKind};
pub use lexer::Lexer;
pub use stream::TokenStream;
pub use token::{Expected, Span, Token, TokenKind};

/// Unified error type covering configuration and lexing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The lexer configuration is unusable.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// The template does not lex.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
}

/// Tokenize a template with the default delimiters in one step.
pub fn tokenize(source: &str) -> Result<TokenStream, Error> {
    let lexer = Lexer::new(LexerConfig::default())?;
    Ok(lexer.tokenize(source)?)
}
