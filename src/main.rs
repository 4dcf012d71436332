//! The `monolog` binary: parses CLI arguments, optionally consults a
//! program file, then runs the REPL against stdin/stdout.

use std::fs;
use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser as ClapParser;
use log::error;

use monolog::repl::Repl;

/// An interactive interpreter for a small Prolog-subset logic language.
#[derive(ClapParser, Debug)]
#[command(name = "monolog", version, about)]
struct Args {
    /// A program file to consult before the interactive loop starts.
    program: Option<String>,

    /// Start with the occurs-check enabled.
    #[arg(long)]
    occurs_check: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut repl = Repl::new();
    repl.set_occurs_check(args.occurs_check);

    if let Some(path) = &args.program {
        match fs::read_to_string(path) {
            Ok(source) => match repl.consult(&source) {
                Ok(count) => eprintln!("consulted {} ({} clauses)", path, count),
                Err(e) => {
                    error!("failed to parse {}: {}", path, e);
                    eprintln!("error: {}", e);
                    return ExitCode::FAILURE;
                }
            },
            Err(e) => {
                error!("failed to read {}: {}", path, e);
                eprintln!("error: could not read {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    match repl.run(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("i/o error: {}", e);
            ExitCode::FAILURE
        }
    }
}
