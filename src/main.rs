//! CLI tool to check and inspect the tokens of Twig templates.

use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: twig-lex <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  check      Check if template(s) lex without errors");
        eprintln!("  tokens     Print the token stream of template(s)");
        eprintln!("  roundtrip  Check that tokens serialize back to the source");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  twig-lex check index.html.twig");
        eprintln!("  twig-lex tokens index.html.twig");
        eprintln!("  twig-lex roundtrip templates/*.twig");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if !matches!(command, "check" | "tokens" | "roundtrip") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let stream = match twig_lexer::tokenize(&content) {
            Ok(stream) => stream,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "check" => {
                let count = stream.tokens().len();
                eprintln!("{path}: valid ({count} token(s))");
            }
            "tokens" => {
                println!("{stream}");
            }
            _ => {
                if stream.serialize() == content {
                    eprintln!("{path}: round-trips");
                } else {
                    eprintln!("{path}: serialized tokens differ from source");
                    had_error = true;
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
