//! Demonstrate error handling for templates that do not lex.

use twig_lexer::{Error, SyntaxErrorKind};

fn report(input: &str) {
    println!("Input: {input:?}");
    match twig_lexer::tokenize(input) {
        Ok(stream) => println!("Lexed OK ({} tokens)", stream.tokens().len()),
        Err(Error::Syntax(e)) => {
            println!("Syntax error: {e}");
            println!("  Message: {}", e.message());
            println!("  Location: line {}, column {}", e.line(), e.column());
            if let SyntaxErrorKind::UnclosedBracket { opener, opened_at } = &e.kind {
                println!("  Bracket {opener} was opened at {opened_at}");
            }
        }
        Err(Error::Config(e)) => println!("Config error: {e}"),
    }
    println!();
}

fn main() {
    // Mismatched bracket
    report("{{ [1 }}");

    // Character no rule accepts
    report("{{ ^ }}");

    // Unclosed comment
    report("{# forgot to close\n");

    // Unclosed string inside an interpolation
    report("{{ \"bar #{x\" }}\n ");

    // Reading past the end of a stream
    let mut stream = twig_lexer::tokenize("").expect("empty template lexes");
    if let Err(e) = stream.next() {
        println!("Stream error: {e}");
    }
}
