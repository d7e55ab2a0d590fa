//! ArgMatches → CliAction conversion.
//!
//! Also resolves the effective [`RecorderConfig`]: config file, then
//! environment, then `--database`.

use clap::ArgMatches;
use runledger::RecorderConfig;
use std::path::PathBuf;

/// Where replayed events come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    /// Standard input
    Stdin,
    /// A JSON-lines file
    File(PathBuf),
}

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Create the schema, optionally dropping it first.
    Init { drop: bool },
    /// Drop the schema.
    Drop,
    /// Replay lifecycle events into a new run.
    Replay { source: EventSource },
}

/// A parsed invocation: what to do, against which ledger.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub action: CliAction,
    pub config: RecorderConfig,
}

/// Convert clap ArgMatches into an Invocation.
pub fn matches_to_invocation(matches: &ArgMatches) -> Result<Invocation, String> {
    let config = resolve_config(matches)?;
    let action = matches_to_action(matches)?;
    Ok(Invocation { action, config })
}

fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "init" => Ok(CliAction::Init {
            drop: sub_matches.get_flag("drop"),
        }),
        "drop" => Ok(CliAction::Drop),
        "replay" => {
            let raw = sub_matches
                .get_one::<String>("events")
                .ok_or("replay requires an event file")?;
            let source = if raw == "-" {
                EventSource::Stdin
            } else {
                EventSource::File(PathBuf::from(raw))
            };
            Ok(CliAction::Replay { source })
        }
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn resolve_config(matches: &ArgMatches) -> Result<RecorderConfig, String> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => RecorderConfig::from_file(path)
            .map_err(|e| format!("Failed to load {}: {}", path, e))?,
        None => RecorderConfig::default(),
    };
    let mut config = config.with_env_overrides().map_err(|e| e.to_string())?;

    if let Some(database) = matches.get_one::<String>("database") {
        config.database = PathBuf::from(database);
    }
    Ok(config)
}
