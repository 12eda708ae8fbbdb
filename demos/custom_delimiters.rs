//! Lex templates written with non-default delimiters and operators.

use twig_lexer::{ConfigError, Lexer, LexerConfig};

fn main() {
    let config = LexerConfig::new()
        .variable_pair("<%=", "%>")
        .block_pair("<%", "%>")
        .comment_pair("<%#", "%>")
        .interpolation_pair("${", "}")
        .operator("xor");

    let lexer = Lexer::new(config).expect("valid config");

    let input = "<%# greeting %><% if a xor b %>Hi <%= \"${ name }!\" %><% endif %>";
    let stream = lexer.tokenize(input).expect("tokenize failed");

    for token in &stream {
        println!("{:>3}:{:<3} {token}", token.line(), token.column());
    }

    // Configurations that cannot drive a lexer are rejected up front.
    let clash = LexerConfig::new().block_pair("{{", "}}");
    match Lexer::new(clash) {
        Ok(_) => println!("\nunexpectedly accepted"),
        Err(ConfigError::DuplicateTagStart(start)) => {
            println!("\nrejected: {start} opens two different tags");
        }
        Err(e) => println!("\nrejected: {e}"),
    }
}
