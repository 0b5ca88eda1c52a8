// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::{Config, MAX_ROWS};
use logging::LogTarget;
use runtime::DemoRuntime;
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use stockgrid_app::{AppState, Product, TableViewModel};
use stockgrid_tui::AppRuntime;
use time::OffsetDateTime;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `stockgrid --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let log_target = if options.dump || options.check_only {
        LogTarget::Stderr
    } else {
        LogTarget::Screen
    };
    logging::init(&config, log_target)?;

    let rows = options.rows.unwrap_or_else(|| config.rows());
    let seed = options.seed.or(config.seed()).unwrap_or_else(clock_seed);
    info!(rows, seed, config = %options.config_path.display(), "starting");
    if options.check_only {
        return Ok(());
    }

    let mut runtime = DemoRuntime::new(seed, rows);
    let mut table = TableViewModel::new();
    table.generate(rows, runtime.record_source());
    if let Some(filter) = &options.filter {
        table.set_filter(filter.as_str());
    }

    if options.dump {
        let stdout = io::stdout();
        return dump_rows(&table, &mut stdout.lock());
    }

    let mut state = AppState::default();
    stockgrid_tui::run_app(&mut state, &mut table, &mut runtime)
}

fn clock_seed() -> u64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as u64
}

#[derive(Debug, Serialize)]
struct DumpRow<'a> {
    index: usize,
    #[serde(flatten)]
    product: &'a Product,
}

/// Writes the visible rows as JSON lines.
fn dump_rows<W: Write>(table: &TableViewModel, out: &mut W) -> Result<()> {
    for (index, product) in table.visible_rows() {
        let line = serde_json::to_string(&DumpRow { index, product })
            .with_context(|| format!("encode row {index}"))?;
        writeln!(out, "{line}").context("write row")?;
    }
    out.flush().context("flush output")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    rows: Option<usize>,
    seed: Option<u64>,
    filter: Option<String>,
    print_config_path: bool,
    print_example: bool,
    dump: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        rows: None,
        seed: None,
        filter: None,
        print_config_path: false,
        print_example: false,
        dump: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--rows" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--rows requires a row count"))?;
                let rows: usize = value
                    .as_ref()
                    .parse()
                    .with_context(|| format!("invalid --rows value {:?}", value.as_ref()))?;
                if rows > MAX_ROWS {
                    anyhow::bail!("--rows must be at most {MAX_ROWS}, got {rows}");
                }
                options.rows = Some(rows);
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                let seed: u64 = value
                    .as_ref()
                    .parse()
                    .with_context(|| format!("invalid --seed value {:?}", value.as_ref()))?;
                options.seed = Some(seed);
            }
            "--filter" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--filter requires search text"))?;
                options.filter = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--dump" => {
                options.dump = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("stockgrid");
    println!("  --config <path>          Use a specific config path");
    println!("  --rows <n>               Number of demo rows to generate");
    println!("  --seed <n>               Seed for the demo row generator");
    println!("  --filter <text>          Start with a search filter applied");
    println!("  --dump                   Print visible rows as JSON lines and exit");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and logging, then exit");
    println!("  --help                   Show this help");
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
