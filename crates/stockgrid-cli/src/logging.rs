// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::Config;

pub const LOG_ENV: &str = "STOCKGRID_LOG";

/// Where log lines go. The terminal UI owns the screen, so without a log
/// file nothing is written while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Screen,
    Stderr,
}

pub fn resolve_filter(config: &Config) -> Result<EnvFilter> {
    match env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("{LOG_ENV}={directives:?} is not a valid log filter")),
        _ => EnvFilter::try_new(config.log_level())
            .with_context(|| format!("invalid log level {:?}", config.log_level())),
    }
}

pub fn init(config: &Config, target: LogTarget) -> Result<()> {
    let Some(subscriber) = build_subscriber(config, target)? else {
        return Ok(());
    };
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

/// Builds the subscriber for `target`, or `None` when log lines would have
/// nowhere to go.
fn build_subscriber(
    config: &Config,
    target: LogTarget,
) -> Result<Option<Box<dyn Subscriber + Send + Sync>>> {
    let filter = resolve_filter(config)?;
    let writer = match (config.log_file(), target) {
        (Some(path), _) => BoxMakeWriter::new(Mutex::new(open_log_file(&path)?)),
        (None, LogTarget::Stderr) => BoxMakeWriter::new(io::stderr),
        (None, LogTarget::Screen) => return Ok(None),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish();
    Ok(Some(Box::new(subscriber)))
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}
