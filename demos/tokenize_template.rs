//! Tokenize a template and walk the resulting stream.

use twig_lexer::TokenKind;

fn main() {
    let input = "\
<ul>
{% for user in users -%}
    <li>{{ user.name|upper }} {# display name #}</li>
{%- endfor %}
</ul>
";

    let mut stream = twig_lexer::tokenize(input).expect("tokenize failed");

    println!("Tokens:\n{stream}\n");

    // Walk the stream the way a parser would, reporting each block tag.
    while !stream.is_eof() {
        let Some(start) = stream.next_if(TokenKind::BlockStart) else {
            stream.next().expect("not at end");
            continue;
        };
        let (line, column) = (start.line(), start.column());

        stream.next_if(TokenKind::TrimmingModifier);
        stream.next_if(TokenKind::Whitespace);
        let tag = stream.expect(TokenKind::Name).expect("tag name");
        println!("Block tag `{}` at {line}:{column}", tag.as_str());
    }

    assert_eq!(stream.serialize(), input);
    println!("\nSerialized stream matches the source.");
}
