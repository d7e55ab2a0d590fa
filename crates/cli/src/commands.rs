//! Command tree for the `runledger` binary.

use clap::{Arg, ArgAction, Command};

/// Build the clap command.
pub fn build_cli() -> Command {
    Command::new("runledger")
        .about("Persist test-run lifecycles into a SQLite ledger")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("database")
                .long("database")
                .short('d')
                .global(true)
                .value_name("PATH")
                .help(
                    "SQLite database file, or :memory: \
                     (overrides config and RUNLEDGER_DATABASE)",
                ),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("FILE")
                .help("TOML configuration file"),
        )
        .subcommand(
            Command::new("init")
                .about("Create the ledger tables if absent")
                .arg(
                    Arg::new("drop")
                        .long("drop")
                        .action(ArgAction::SetTrue)
                        .help("Drop existing tables first"),
                ),
        )
        .subcommand(Command::new("drop").about("Drop the ledger tables"))
        .subcommand(
            Command::new("replay")
                .about("Replay JSON-lines lifecycle events into a new run")
                .arg(
                    Arg::new("events")
                        .required(true)
                        .value_name("FILE")
                        .help("Event file, or - for stdin"),
                ),
        )
}
