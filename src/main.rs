use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use firstfollow::cli::Cli;
use firstfollow::parser::{self, FileResult};
use firstfollow::report;
use firstfollow::Grammar;

const STDIN_NAME: &str = "<stdin>";

fn read_grammar(cli: &Cli) -> FileResult<Grammar> {
    match cli.input_file() {
        Some(path) => parser::parse_file(path),
        None => parser::parse_reader(io::stdin().lock(), Path::new(STDIN_NAME)),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let grammar = match read_grammar(&cli) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = report::write_report(&mut io::stdout().lock(), &grammar, &cli.report_options()) {
        error!("Could not write the report: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
