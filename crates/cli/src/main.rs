//! runledger CLI: manage the ledger schema and replay recorded runs.
//!
//! - `runledger init [--drop]` creates the tables
//! - `runledger drop` removes them
//! - `runledger replay events.jsonl` (or `-` for stdin) records one run from
//!   JSON-lines lifecycle events, one hook call per line

mod commands;
mod logging;
mod parse;

use std::process;

use anyhow::{Context, Result};
use runledger::{dispatch, LifecycleEvent, Recorder, RecorderConfig, RunStore, SqliteStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

use commands::build_cli;
use parse::{matches_to_invocation, CliAction, EventSource, Invocation};

fn main() {
    logging::init();

    let matches = build_cli().get_matches();
    let invocation = match matches_to_invocation(&matches) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {}", e);
            process::exit(1);
        }
    };

    match runtime.block_on(execute(invocation)) {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn execute(invocation: Invocation) -> Result<String> {
    let Invocation { action, config } = invocation;
    match action {
        CliAction::Init { drop } => init(config, drop).await,
        CliAction::Drop => drop_tables(config).await,
        CliAction::Replay { source } => replay(config, source).await,
    }
}

async fn init(config: RecorderConfig, drop: bool) -> Result<String> {
    let database = config.database.display().to_string();
    let drop = drop || config.drop_tables;
    Recorder::builder()
        .config(config)
        .drop_tables(drop)
        .open()
        .await
        .with_context(|| format!("failed to initialize {}", database))?;
    Ok(format!("initialized {}", database))
}

async fn drop_tables(config: RecorderConfig) -> Result<String> {
    let database = config.database.display().to_string();
    let store = if config.is_in_memory() {
        SqliteStore::open_in_memory()?
    } else {
        SqliteStore::open(&config.database)
            .with_context(|| format!("failed to open {}", database))?
    };
    store.drop_schema().await?;
    Ok(format!("dropped tables in {}", database))
}

async fn replay(config: RecorderConfig, source: EventSource) -> Result<String> {
    let recorder = Recorder::builder()
        .config(config)
        .open()
        .await
        .context("failed to open recorder")?;

    let applied = match &source {
        EventSource::Stdin => apply_lines(&recorder, BufReader::new(tokio::io::stdin())).await?,
        EventSource::File(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            apply_lines(&recorder, BufReader::new(file)).await?
        }
    };

    let summary = match recorder.synchronizer().run_id() {
        Some(run) => format!("replayed {} events into run {}", applied, run),
        None => format!("replayed {} events, no run opened", applied),
    };
    info!(applied, "Replay finished");
    Ok(summary)
}

/// Dispatch each non-blank line as it arrives. Stops at the first bad line.
async fn apply_lines<R>(recorder: &Recorder, reader: R) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0usize;
    let mut applied = 0usize;

    while let Some(line) = lines.next_line().await.context("failed to read events")? {
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event: LifecycleEvent = serde_json::from_str(trimmed)
            .with_context(|| format!("line {}: invalid lifecycle event", line_no))?;
        dispatch(recorder, &event)
            .await
            .with_context(|| format!("line {}: {} failed", line_no, event.name()))?;
        applied += 1;
    }
    Ok(applied)
}
