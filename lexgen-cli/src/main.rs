use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lexgen::dfa::Dfa;
use lexgen::driver;
use lexgen::error::LexError;
use thiserror::Error;

/// Compiles a list of regular expressions into a DFA lexer.
#[derive(Parser, Debug)]
#[command(name = "lexgen", author, version, about)]
struct Args {
    /// Regex source strings, in priority order (earliest wins ties).
    /// Ignored if `--file` is given.
    regexes: Vec<String>,

    /// Read regex source strings from `file`, one per line, instead of
    /// from positional arguments.
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify input strings against the compiled DFA, printing the
    /// winning regex's position or "no match" for each.
    Test {
        /// Strings to classify.
        inputs: Vec<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("reading {0}: {1}")]
    ReadFile(PathBuf, std::io::Error),
    #[error("{0}")]
    Compile(#[from] LexError),
    #[error("no regular expressions given (pass them as arguments or via --file)")]
    NoRegexes,
}

fn load_regexes(args: &Args) -> Result<Vec<String>, CliError> {
    let regexes = match &args.file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CliError::ReadFile(path.clone(), e))?
            .lines()
            .map(str::to_owned)
            .collect(),
        None => args.regexes.clone(),
    };
    if regexes.is_empty() {
        return Err(CliError::NoRegexes);
    }
    Ok(regexes)
}

fn print_summary(dfa: &Dfa) {
    println!("Compiled DFA: {} state(s)", dfa.states.len());
    for (i, state) in dfa.states.iter().enumerate() {
        let accept = match state.accept {
            Some(id) => format!("accepting (token #{id})"),
            None => "non-accepting".to_string(),
        };
        let out_degree = state.transitions.iter().filter(|t| t.is_some()).count();
        println!("  state {i}: {accept}, {out_degree} outgoing transition(s)");
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let regex_strings = load_regexes(&args)?;
    let regexes: Vec<&str> = regex_strings.iter().map(String::as_str).collect();
    let dfa = driver::compile(&regexes)?;

    match &args.command {
        None => print_summary(&dfa),
        Some(Command::Test { inputs }) => {
            for input in inputs {
                match dfa.classify(input.as_bytes()) {
                    Some(id) => println!("{input}: token #{id}"),
                    None => println!("{input}: no match"),
                }
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
