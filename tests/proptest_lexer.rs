//! Property-based tests with proptest.
//!
//! Generate templates from a small grammar of text, tags, strings and
//! interpolations, lex them, and check the invariants every token
//! stream must satisfy: values concatenate back to the source, spans
//! never move backwards, and the end marker sits after the last
//! character.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use twig_lexer::{Lexer, LexerConfig, Span, TokenKind, TokenStream, tokenize};

// -- Leaf strategies --

/// Text with no tag delimiters in it.
fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:;!?\n\r\t<>-]{1,30}"
}

fn name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

fn whitespace() -> impl Strategy<Value = String> {
    "[ \n]{0,2}"
}

fn trim() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just("-"), Just("~")]
}

fn number() -> impl Strategy<Value = String> {
    "[0-9]{1,6}(\\.[0-9]{1,3})?"
}

fn single_quoted() -> impl Strategy<Value = String> {
    "[a-z #{}]{0,10}".prop_map(|s| format!("'{s}'"))
}

// -- Expression strategies --

/// Expression at a given depth (limits recursion through brackets and
/// interpolations).
fn expression(depth: u32) -> BoxedStrategy<String> {
    let leaf = prop_oneof![
        name(),
        number(),
        single_quoted(),
        "[a-z ]{0,10}".prop_map(|s| format!("\"{s}\"")),
    ];

    if depth == 0 {
        return leaf.boxed();
    }

    let inner = expression(depth - 1);
    prop_oneof![
        3 => leaf,
        1 => (inner.clone(), whitespace(), inner.clone())
            .prop_map(|(a, ws, b)| format!("{a} +{ws}{b}")),
        1 => inner.clone().prop_map(|e| format!("({e})")),
        1 => prop::collection::vec(inner.clone(), 0..=3)
            .prop_map(|items| format!("[{}]", items.join(", "))),
        1 => (name(), inner.clone()).prop_map(|(n, e)| format!("{n}|f({e})")),
        1 => ("[a-z ]{0,6}", inner).prop_map(|(s, e)| format!("\"{s}#{{ {e} }}\"")),
    ]
    .boxed()
}

// -- Template strategies --

fn print_tag() -> impl Strategy<Value = String> {
    (trim(), whitespace(), expression(2), whitespace(), trim())
        .prop_map(|(open, a, e, b, close)| format!("{{{{{open}{a}{e}{b}{close}}}}}"))
}

fn block_tag() -> impl Strategy<Value = String> {
    (trim(), name(), expression(2), trim(), prop_oneof![Just(""), Just("\n")])
        .prop_map(|(open, n, e, close, nl)| format!("{{%{open} {n} {e} {close}%}}{nl}"))
}

fn comment_tag() -> impl Strategy<Value = String> {
    (trim(), "[a-z {}%]{0,12}", trim())
        .prop_map(|(open, body, close)| format!("{{#{open} {body} {close}#}}"))
}

fn verbatim_tag() -> impl Strategy<Value = String> {
    "[a-z {}%#]{0,12}".prop_map(|body| format!("{{% verbatim %}}{body}{{% endverbatim %}}"))
}

fn template() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => text(),
            2 => print_tag(),
            2 => block_tag(),
            1 => comment_tag(),
            1 => verbatim_tag(),
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

fn lex(source: &str) -> Result<TokenStream, TestCaseError> {
    tokenize(source)
        .map_err(|e| TestCaseError::fail(std::format!("lex failed: {e}\nsource:\n{source:?}")))
}

/// Position just past `source`, counting `\r\n` as one line break.
fn end_of(source: &str) -> Span {
    let (mut line, mut column) = (1, 1);
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                line += 1;
                column = 1;
            }
            '\n' => {
                line += 1;
                column = 1;
            }
            _ => column += 1,
        }
    }
    Span::new(line, column)
}

// -- Property tests --

proptest! {
    /// Concatenating token values rebuilds the template.
    #[test]
    fn serialize_round_trips(source in template()) {
        let stream = lex(&source)?;
        prop_assert_eq!(stream.serialize(), source);
    }

    /// Token spans are non-decreasing and only the last token is EOF.
    #[test]
    fn spans_are_ordered(source in template()) {
        let stream = lex(&source)?;
        let tokens = stream.tokens();

        for pair in tokens.windows(2) {
            prop_assert!(
                pair[0].span <= pair[1].span,
                "{} then {}", pair[0], pair[1]
            );
        }
        for token in &tokens[..tokens.len() - 1] {
            prop_assert_ne!(token.kind, TokenKind::Eof);
            prop_assert!(token.value.as_deref().is_some_and(|v| !v.is_empty()));
        }
    }

    /// The end marker sits just past the last character.
    #[test]
    fn eof_follows_source(source in template()) {
        let stream = lex(&source)?;
        let last = stream.tokens().last().cloned();
        prop_assert_eq!(last.map(|t| (t.kind, t.span)), Some((TokenKind::Eof, end_of(&source))));
    }

    /// Text without tag starts is a single text token.
    #[test]
    fn plain_text_is_one_token(source in text()) {
        let stream = lex(&source)?;
        prop_assert_eq!(stream.tokens().len(), 2);
        prop_assert_eq!(stream.tokens()[0].kind, TokenKind::Text);
        prop_assert_eq!(stream.tokens()[0].as_str(), source.as_str());
    }

    /// Arbitrary input either lexes or fails with an error; a
    /// successful lex still round-trips.
    #[test]
    fn arbitrary_input_never_panics(source in "(?s).{0,64}") {
        if let Ok(stream) = tokenize(&source) {
            prop_assert_eq!(stream.serialize(), source);
        }
    }

    /// Tag-heavy noise exercises the error paths.
    #[test]
    fn delimiter_noise_never_panics(source in "[{}%#\"'()\\[\\] a1~-]{0,40}") {
        if let Ok(stream) = tokenize(&source) {
            prop_assert_eq!(stream.serialize(), source);
        }
    }

    /// One lexer gives the same result on repeated runs.
    #[test]
    fn lexer_is_deterministic(source in template()) {
        let lexer = Lexer::new(LexerConfig::default())
            .map_err(|e| TestCaseError::fail(std::format!("config: {e}")))?;
        let first = lexer.tokenize(&source);
        let second = lexer.tokenize(&source);
        prop_assert_eq!(first, second);
    }
}
