use std::process::ExitCode;

use bibtex_lexer::{LexerConfig, TokenKind, line_column, tokenize};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: bibtex-lex [--lenient] [--meta] [--no-errors] [--strip] <file.bib>";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = LexerConfig::default();
    let mut path = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--lenient" => config = config.with_strict(false),
            "--meta" => config = config.with_meta_content(true),
            "--no-errors" => config = config.with_errors(false),
            "--strip" => config = config.with_strip_line_breaks(true),
            other if other.starts_with("--") => {
                eprintln!("Invalid argument '{other}'\n{USAGE}");
                return ExitCode::FAILURE;
            }
            other => path = Some(other.to_owned()),
        }
    }

    let Some(path) = path else {
        eprintln!("Error: provide a file\n{USAGE}");
        return ExitCode::FAILURE;
    };

    let input = match std::fs::read_to_string(&path) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("Error: could not read '{path}': {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for token in tokenize(&input, config) {
        let pos = line_column(&input, token.span.start);
        match token.diagnostic() {
            Some(diagnostic) => {
                failed = true;
                let at = diagnostic.location(&input);
                eprintln!(
                    "{}:{}:{} error[{}]: {} {:?}",
                    path,
                    at.line,
                    at.column,
                    diagnostic.code.code(),
                    diagnostic.code,
                    diagnostic.fragment
                );
            }
            None if token.kind == TokenKind::EndOfInput => {
                println!("{}:{} {}", pos.line, pos.column, token.kind)
            }
            None => println!(
                "{}:{} {} {:?}",
                pos.line, pos.column, token.kind, token.text
            ),
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
