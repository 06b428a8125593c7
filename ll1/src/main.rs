//! LL(1) grammar checker and table-driven acceptor.
//!
//! Reads a grammar written in a small meta-language, prints its FIRST/FOLLOW
//! sets and predictive rule table, and, when the grammar is LL(1), checks one
//! line of input against it.
//!
//! Run `cargo doc --open` to view this documentation in a browser.

// friendly reminders to add comments
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::all)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::missing_errors_doc)]

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser as ClapParser, ValueEnum};
use colored::Colorize;

use predict::{cfg::Grammar, ll1::Analysis, machine::Machine};

pub mod context;
pub mod file_buffer;
pub mod parser;
pub mod report;
pub mod scanner;

use context::MaybeContext;
use parser::{error::Error as ParserError, Parser};
use scanner::Scanner;

/// Command line arguments accepted by the grammar checker
#[derive(Clone, PartialEq, Eq, ClapParser)]
#[command(version, about)]
struct Args {
    /// Display messages that aid in tracing the
    /// analysis process
    #[arg(short, long, value_enum)]
    debug: Option<DebugLevel>,
    /// Display all information
    #[arg(short, long)]
    verbose: bool,
    /// Grammar file
    #[arg(default_value = "input.txt")]
    grammar: PathBuf,
}

/// Debug levels of the program
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DebugLevel {
    /// All messages
    All,
    /// Scanner messages only
    Scanner,
    /// Parser messages only
    Parser,
}

fn main() -> ExitCode {
    // parse command line arguments
    let args = Args::parse();

    let verbose = args.verbose;
    if verbose {
        println!("grammar file: {:?}", &args.grammar);
    }

    let debug_scanner = matches!(args.debug, Some(DebugLevel::All | DebugLevel::Scanner));
    let debug_parser = matches!(args.debug, Some(DebugLevel::All | DebugLevel::Parser));

    // front end: scan and parse the grammar file
    let parse = || {
        let scanner =
            Scanner::new(&args.grammar, debug_scanner, verbose).map_err(ParserError::from)?;

        let parser = Parser::new(scanner, debug_parser)?;

        Ok::<Grammar, MaybeContext<ParserError>>(parser.parse()?)
    };

    let grammar = match parse() {
        Ok(grammar) => grammar,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red(), e);
            return ExitCode::FAILURE;
        }
    };

    // analysis: FIRST, FOLLOW, and the predictive rule table
    let analysis = match Analysis::new(grammar) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report::first_follow_table(&analysis));
    println!("{}", report::rule_table(&analysis));

    if !analysis.is_valid_ll1() {
        println!("Grammar is not a valid ll1");
        return ExitCode::FAILURE;
    }

    // acceptor: read one line and run the machine over it
    print!("please write a input: ");
    if let Err(e) = io::stdout().flush() {
        eprintln!("{} {}", "[ERROR]".red(), e);
        return ExitCode::FAILURE;
    }

    let mut line = String::new();
    if let Err(e) = io::stdin().read_line(&mut line) {
        eprintln!("{} {}", "[ERROR]".red(), e);
        return ExitCode::FAILURE;
    }
    let input = line.strip_suffix('\n').unwrap_or(&line);
    let input = input.strip_suffix('\r').unwrap_or(input);

    let verdict = Machine::new(&analysis).parse(input);
    for diagnostic in &verdict.diagnostics {
        println!("{}", diagnostic);
    }

    if verdict.accepted {
        println!("Input Accepted");
        ExitCode::SUCCESS
    } else {
        println!("Input Rejected");
        ExitCode::FAILURE
    }
}
