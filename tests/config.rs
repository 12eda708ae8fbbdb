//! Lexers built from non-default configurations.

use twig_lexer::{ConfigError, Error, Lexer, LexerConfig, TokenKind as K, TokenStream};

fn lex_with(config: LexerConfig, source: &str) -> TokenStream {
    Lexer::new(config)
        .expect("valid config")
        .tokenize(source)
        .expect("tokenize failed")
}

fn values(stream: &TokenStream) -> Vec<(K, &str)> {
    stream
        .tokens()
        .iter()
        .filter(|t| t.kind != K::Whitespace)
        .map(|t| (t.kind, t.as_str()))
        .collect()
}

// -----------------------------------------------------------
// Delimiters.
// -----------------------------------------------------------

#[test]
fn erb_style_delimiters() {
    let config = LexerConfig::new()
        .variable_pair("<%=", "%>")
        .block_pair("<%", "%>")
        .comment_pair("<%#", "%>");
    let stream = lex_with(config, "<%# c %><% if a %><%= b %><% endif %>");

    pretty_assertions::assert_eq!(
        values(&stream),
        vec![
            (K::CommentStart, "<%#"),
            (K::Text, "c"),
            (K::CommentEnd, "%>"),
            (K::BlockStart, "<%"),
            (K::Name, "if"),
            (K::Name, "a"),
            (K::BlockEnd, "%>"),
            (K::VariableStart, "<%="),
            (K::Name, "b"),
            (K::VariableEnd, "%>"),
            (K::BlockStart, "<%"),
            (K::Name, "endif"),
            (K::BlockEnd, "%>"),
            (K::Eof, ""),
        ]
    );
}

#[test]
fn default_delimiters_are_text_under_custom_config() {
    let config = LexerConfig::new()
        .variable_pair("[[", "]]")
        .block_pair("[%", "%]")
        .comment_pair("[#", "#]");
    let stream = lex_with(config, "{{ a }}[[ b ]]");
    assert_eq!(stream.tokens()[0].kind, K::Text);
    assert_eq!(stream.tokens()[0].as_str(), "{{ a }}");
    assert_eq!(stream.tokens()[1].kind, K::VariableStart);
}

#[test]
fn custom_verbatim_delimiters() {
    let config = LexerConfig::new().block_pair("<%", "%>");
    let stream = lex_with(config, "<% verbatim %><%= x %><% endverbatim %>");
    assert_eq!(stream.tokens()[5].kind, K::Text);
    assert_eq!(stream.tokens()[5].as_str(), "<%= x %>");
    assert_eq!(stream.serialize(), "<% verbatim %><%= x %><% endverbatim %>");
}

#[test]
fn custom_interpolation_markers() {
    let config = LexerConfig::new().interpolation_pair("${", "}");
    let stream = lex_with(config, "{{ \"a ${ b } #{c}\" }}");

    pretty_assertions::assert_eq!(
        values(&stream),
        vec![
            (K::VariableStart, "{{"),
            (K::OpeningQuote, "\""),
            (K::String, "a "),
            (K::InterpolationStart, "${"),
            (K::Name, "b"),
            (K::InterpolationEnd, "}"),
            (K::String, " #{c}"),
            (K::ClosingQuote, "\""),
            (K::VariableEnd, "}}"),
            (K::Eof, ""),
        ]
    );
}

#[test]
fn custom_trim_markers() {
    let config = LexerConfig::new()
        .whitespace_trim('!')
        .line_whitespace_trim('^');
    let stream = lex_with(config, "{%! a ^%}");
    assert_eq!(stream.tokens()[1].kind, K::TrimmingModifier);
    assert_eq!(stream.tokens()[1].as_str(), "!");
    assert_eq!(stream.tokens()[5].kind, K::LineTrimmingModifier);
    assert_eq!(stream.tokens()[5].as_str(), "^");
}

// -----------------------------------------------------------
// Operators.
// -----------------------------------------------------------

#[test]
fn extra_operator() {
    let stream = lex_with(LexerConfig::new().operator("xor"), "{{ a xor b }}");
    assert_eq!(stream.tokens()[4].kind, K::Operator);
    assert_eq!(stream.tokens()[4].as_str(), "xor");
}

#[test]
fn replaced_operator_vocabulary() {
    let config = LexerConfig::new().operators(["&&", "||", "has key"]);
    let stream = lex_with(config, "{{ a && b has  key c and d }}");

    let operators: Vec<_> = stream
        .tokens()
        .iter()
        .filter(|t| t.kind == K::Operator)
        .map(|t| t.as_str())
        .collect();
    assert_eq!(operators, vec!["&&", "has  key"]);
    assert!(stream.tokens().iter().any(|t| t.test_value(K::Name, "and")));

    let config = LexerConfig::new().operators(["&&"]);
    let stream = lex_with(config, "{% set a = 1 %}");
    pretty_assertions::assert_eq!(
        values(&stream),
        vec![
            (K::BlockStart, "{%"),
            (K::Name, "set"),
            (K::Name, "a"),
            (K::Operator, "="),
            (K::Number, "1"),
            (K::BlockEnd, "%}"),
            (K::Eof, ""),
        ]
    );
}

#[test]
fn assignment_survives_empty_vocabulary() {
    let config = LexerConfig::new().operators(Vec::<String>::new());
    let stream = lex_with(config, "{{ a == b }}");
    let operators: Vec<_> = stream
        .tokens()
        .iter()
        .filter(|t| t.kind == K::Operator)
        .map(|t| t.as_str())
        .collect();
    assert_eq!(operators, vec!["=", "="]);
}

#[test]
fn config_is_kept_by_lexer() {
    let config = LexerConfig::new().operator("xor");
    let lexer = Lexer::new(config.clone()).expect("valid config");
    assert_eq!(lexer.config(), &config);
}

// -----------------------------------------------------------
// Invalid configurations.
// -----------------------------------------------------------

#[test]
fn reject_empty_delimiter() {
    let err = Lexer::new(LexerConfig::new().block_pair("", "%}")).expect_err("empty");
    assert_eq!(err, ConfigError::EmptyDelimiter("block start"));
    assert_eq!(err.to_string(), "block start delimiter must not be empty");
}

#[test]
fn reject_duplicate_tag_start() {
    let err = Lexer::new(LexerConfig::new().comment_pair("{{", "}}")).expect_err("clash");
    assert_eq!(err, ConfigError::DuplicateTagStart("{{".to_string()));
}

#[test]
fn reject_identical_trim_markers() {
    let err = Lexer::new(LexerConfig::new().line_whitespace_trim('-')).expect_err("same");
    assert_eq!(err, ConfigError::DuplicateTrimMarker('-'));
}

#[test]
fn reject_empty_operator() {
    let err = Lexer::new(LexerConfig::new().operator("")).expect_err("empty operator");
    assert_eq!(err, ConfigError::EmptyOperator);
}

#[test]
fn config_error_converts_into_crate_error() {
    let err: Error = ConfigError::EmptyOperator.into();
    assert!(matches!(err, Error::Config(ConfigError::EmptyOperator)));
}
