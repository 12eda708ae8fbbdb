#![allow(dead_code)]

use twig_lexer::{Error, SyntaxError, TokenKind, TokenStream, tokenize};

pub fn lex(source: &str) -> TokenStream {
    tokenize(source).expect("tokenize failed")
}

/// Lex `source`, which must fail with a syntax error.
pub fn lex_error(source: &str) -> SyntaxError {
    match tokenize(source) {
        Err(Error::Syntax(e)) => e,
        Err(e) => panic!("expected a syntax error, got: {e}"),
        Ok(stream) => panic!("expected a syntax error, got tokens:\n{stream}"),
    }
}

/// Kind, value, line and column of every token, end marker included.
pub fn summary(stream: &TokenStream) -> Vec<(TokenKind, &str, usize, usize)> {
    stream
        .tokens()
        .iter()
        .map(|t| (t.kind, t.as_str(), t.line(), t.column()))
        .collect()
}

/// Helper: lex `source` and compare the full token sequence.
pub fn assert_tokens(source: &str, expected: &[(TokenKind, &str, usize, usize)]) {
    let stream = lex(source);
    pretty_assertions::assert_eq!(
        summary(&stream),
        expected.to_vec(),
        "token mismatch for {source:?}"
    );
}

pub fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
    stream.tokens().iter().map(|t| t.kind).collect()
}
