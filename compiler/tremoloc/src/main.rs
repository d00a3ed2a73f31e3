//! Tremolo CLI
//!
//! Runs a program from a file or stdin and exits with its value.

use std::process::ExitCode;

use tremoloc::cli::{self, Command, USAGE};
use tremoloc::{eval_source, exit_code, lex_source, parse_source, read_source, Emit, Error};

fn main() -> ExitCode {
    tremoloc::init_tracing();

    let (options, file) = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run { options, file }) => (options, file),
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let source = match read_source(file.as_deref()) {
        Ok(source) => source,
        Err(err) => return report(&err),
    };

    let status = match options.emit {
        Emit::Value => eval_source(&source, &options).map(|value| exit_code(&value)),
        Emit::Tokens => lex_source(&source, options.lex_mode).map(|tokens| {
            for token in tokens {
                println!("{token}");
            }
            0
        }),
        Emit::Ast => parse_source(&source, options.lex_mode).map(|program| {
            println!("{program}");
            0
        }),
    };

    match status {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX)),
        Err(err) => report(&err),
    }
}

/// Print `err` (and any backtrace) to stderr; return the matching status.
fn report(err: &Error) -> ExitCode {
    eprintln!("error: {err}");
    if let Error::Eval(eval) = err {
        if let Some(backtrace) = &eval.backtrace {
            eprint!("{backtrace}");
        }
    }
    ExitCode::from(u8::try_from(err.exit_status()).unwrap_or(1))
}
