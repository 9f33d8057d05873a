use crate::args::Cli;
use crate::backend::BackendCommand;
use crate::tail::{DEFAULT_TAIL_LOOKBACK, TailFormat, TailSession};
use crate::types::OutputMode;
use anyhow::{Context, Result, bail};
use oplog_format::{
    DuplicateCompactor, JsonReshaper, LimitWarningInjector, LineTransform, Pipeline,
    TableRenderer, header_lines,
};
use oplog_query::{ACCELERATOR_FIELD, FilterSet, QueryBuilder};
use std::io::{BufRead, BufReader};

pub fn run(cli: Cli) -> Result<()> {
    let query = build_query(&cli);
    let program = BackendCommand::resolve_program(cli.backend.as_deref());
    let time_flags = time_flags(&cli)?;

    if cli.tail {
        let command = BackendCommand::new(program, tail_args(&cli, time_flags, &query));
        if cli.dry_run {
            println!("{}", command.render());
            return Ok(());
        }
        TailSession::new(command, tail_format(&cli)).run()
    } else {
        let command = BackendCommand::new(program, query_args(&cli, time_flags, &query));
        if cli.dry_run {
            println!("{}", command.render());
            return Ok(());
        }
        run_single_shot(&cli, &command)
    }
}

/// Accumulate field filters and compose the query. Built exactly once, after
/// all CLI input is consumed; argument parsing itself never mutates state.
fn build_query(cli: &Cli) -> String {
    let mut filters = FilterSet::new();
    filters.add_all(ACCELERATOR_FIELD, &cli.accelerator);
    filters.add_all("origin", &cli.origin);
    filters.add_all("user", &cli.user);
    filters.add_all("facility", &cli.facility);
    filters.add_all("proc", &cli.proc);
    filters.add_all("severity", &cli.severity);

    QueryBuilder::new(filters)
        .include(cli.regex.clone())
        .exclude(cli.exclude.clone())
        .show_changelog(cli.changelog)
        .show_watcher(cli.watcher)
        .show_putlog(cli.putlog)
        .build()
        .to_query()
}

/// Normalize the time-range knobs into backend flags. Input errors abort
/// here, before any backend call.
fn time_flags(cli: &Cli) -> Result<Vec<String>> {
    let mut args = Vec::new();
    if let Some(since) = &cli.since {
        let spec = since.strip_prefix('-').unwrap_or(since);
        let hours = oplog_query::duration_to_hours(spec)
            .with_context(|| format!("bad --since value '{}'", since))?;
        args.push(format!("--since={}h", hours));
    }
    if let Some(from) = &cli.from {
        let normalized = oplog_query::normalize_lookback(from)
            .with_context(|| format!("bad --from value '{}'", from))?;
        args.push(format!("--from={}", normalized));
    }
    if let Some(to) = &cli.to {
        let normalized = oplog_query::normalize_lookback(to)
            .with_context(|| format!("bad --to value '{}'", to))?;
        args.push(format!("--to={}", normalized));
    }
    Ok(args)
}

fn output_flag(cli: &Cli) -> String {
    let mode = if cli.json {
        OutputMode::Jsonl
    } else {
        cli.output
    };
    format!("--output={}", mode.as_backend_value())
}

fn query_args(cli: &Cli, time_args: Vec<String>, query: &str) -> Vec<String> {
    let mut args = vec!["query".to_string(), format!("--limit={}", cli.limit)];
    args.push(output_flag(cli));
    args.extend(time_args);
    if cli.quiet {
        args.push("-q".to_string());
    }
    args.extend(cli.backend_args.iter().cloned());
    args.push(query.to_string());
    args
}

fn tail_args(cli: &Cli, time_args: Vec<String>, query: &str) -> Vec<String> {
    let mut args = vec!["query".to_string(), "--tail".to_string()];
    args.push(output_flag(cli));
    if time_args.is_empty() {
        // minimal lookback so a fresh reconnect does not replay backlog
        args.push(DEFAULT_TAIL_LOOKBACK.to_string());
    } else {
        args.extend(time_args);
    }
    if cli.quiet {
        args.push("-q".to_string());
    }
    args.extend(cli.backend_args.iter().cloned());
    args.push(query.to_string());
    args
}

fn tail_format(cli: &Cli) -> TailFormat {
    if cli.json {
        TailFormat::Json
    } else if cli.table {
        TailFormat::Table
    } else {
        TailFormat::Raw
    }
}

/// Stage order per mode. Limit counting and compaction run over the
/// backend's newest-first stream; the display reversal happens last.
fn single_shot_stages(cli: &Cli) -> Vec<Box<dyn LineTransform>> {
    let mut stages: Vec<Box<dyn LineTransform>> =
        vec![Box::new(LimitWarningInjector::new(cli.limit))];
    if cli.json {
        stages.push(Box::new(JsonReshaper));
        return stages;
    }
    if !cli.invert && !cli.no_like {
        stages.push(Box::new(DuplicateCompactor::new()));
    }
    if cli.table {
        stages.push(Box::new(TableRenderer));
    }
    stages
}

fn run_single_shot(cli: &Cli, command: &BackendCommand) -> Result<()> {
    let mut child = command.spawn()?;
    let stdout = child
        .stdout
        .take()
        .context("backend stdout unavailable")?;

    if cli.table {
        for line in header_lines() {
            println!("{}", line);
        }
    }

    let mut pipeline = Pipeline::new(single_shot_stages(cli));
    let mut buffered = Vec::new();
    for line in BufReader::new(stdout).lines() {
        let line = line.context("failed to read backend output")?;
        pipeline.push(&line, &mut buffered);
    }
    pipeline.finish(&mut buffered);

    if !cli.invert {
        buffered.reverse();
    }
    for line in &buffered {
        println!("{}", line);
    }

    let status = child.wait().context("failed to wait for backend")?;
    if !status.success() {
        bail!("backend exited with {}", status);
    }
    Ok(())
}
