//! Command-line interface for space
//! This binary inspects, reformats and extends Space record documents.
//!
//! Usage:
//!   space inspect `<path>` [--format `<format>`]              - Parse and print a document
//!   space format `<path>` [--keep-preamble] [--write]         - Re-serialize the records
//!   space prompt `<path>` `<command>`                         - Print the prompt sent to a generator
//!   space append `<path>` -m `<command>` -- `<program>` [args] - Append a generator's output
//!   space template                                        - Print a starter document
//!   space list-formats                                    - List output formats
//!
//! A `<path>` of `-` reads the document from stdin.

mod commands;
mod generator;

use clap::{Arg, ArgAction, ArgMatches, Command};
use space_config::{Loader, SpaceConfig};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let path_arg = Arg::new("path")
        .help("Path to the space file, or '-' for stdin")
        .required(true)
        .index(1);

    Command::new("space")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and processing Space record documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults and ./.space.toml"),
        )
        .subcommand(
            Command::new("inspect")
                .about("Parse a document and print it in an output format")
                .arg(path_arg.clone())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats); defaults to output.format"),
                )
                .arg(
                    Arg::new("line-numbers")
                        .long("line-numbers")
                        .short('n')
                        .help("Show source line numbers in treeviz output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Re-serialize the records of a document")
                .arg(path_arg.clone())
                .arg(
                    Arg::new("keep-preamble")
                        .long("keep-preamble")
                        .help("Keep the text before the first header")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("write")
                        .long("write")
                        .short('w')
                        .help("Write the result back to the file instead of stdout")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("prompt")
                .about("Print the prompt a generator would receive")
                .arg(path_arg.clone())
                .arg(
                    Arg::new("command")
                        .help("Instruction for the generator")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("system")
                        .long("system")
                        .help("Also print the system instruction")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("append")
                .about("Run a generator program and append its output to the document")
                .arg(path_arg)
                .arg(
                    Arg::new("message")
                        .long("message")
                        .short('m')
                        .help("Instruction for the generator")
                        .required(true),
                )
                .arg(
                    Arg::new("inline-errors")
                        .long("inline-errors")
                        .help("On failure, append an error record instead of exiting")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("write")
                        .long("write")
                        .short('w')
                        .help("Write the result back to the file instead of stdout")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("exec")
                        .help("Generator program and its arguments (prompt on stdin, records on stdout)")
                        .required(true)
                        .index(2)
                        .num_args(1..)
                        .last(true),
                ),
        )
        .subcommand(Command::new("template").about("Print a starter document"))
        .subcommand(Command::new("list-formats").about("List available output formats"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> SpaceConfig {
    let explicit = matches.get_one::<String>("config").map(Path::new);
    Loader::discover(".", explicit).build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn main() {
    init_tracing();

    let matches = cli().get_matches();
    let config = load_config(&matches);

    let result = match matches.subcommand() {
        Some(("inspect", m)) => commands::inspect(&config, m),
        Some(("format", m)) => commands::format(&config, m),
        Some(("prompt", m)) => commands::prompt(&config, m),
        Some(("append", m)) => commands::append(&config, m),
        Some(("template", _)) => commands::template(),
        Some(("list-formats", _)) => commands::list_formats(),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
