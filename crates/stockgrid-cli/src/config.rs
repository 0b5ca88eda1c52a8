// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "stockgrid";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_ROWS: usize = 100;
pub const MAX_ROWS: usize = 100_000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub table: TableSection,
    #[serde(default)]
    pub log: LogSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            table: TableSection::default(),
            log: LogSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSection {
    pub rows: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for TableSection {
    fn default() -> Self {
        Self {
            rows: Some(DEFAULT_ROWS),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSection {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("STOCKGRID_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set STOCKGRID_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` and put values under [table] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(rows) = self.table.rows
            && rows > MAX_ROWS
        {
            bail!(
                "table.rows in {} must be at most {}, got {}",
                path.display(),
                MAX_ROWS,
                rows
            );
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!("log.level in {} is not a valid filter: {level:?}", path.display())
            })?;
        }

        if let Some(file) = &self.log.file
            && file.trim().is_empty()
        {
            bail!(
                "log.file in {} is empty; remove it to disable file logging",
                path.display()
            );
        }

        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.table.rows.unwrap_or(DEFAULT_ROWS)
    }

    pub fn seed(&self) -> Option<u64> {
        self.table.seed
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log.file.as_deref().map(PathBuf::from)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# stockgrid config\n# Place this file at: {}\n\nversion = 1\n\n[table]\n# Number of demo rows generated at startup and on `r`.\nrows = {}\n# Optional. Fix the seed to get the same rows every run.\n# seed = 42\n\n[log]\n# Any tracing filter, for example \"debug\" or \"stockgrid_app=debug\".\nlevel = \"{}\"\n# Optional. Logs are discarded while the table is on screen unless this is set.\n# file = \"/tmp/stockgrid.log\"\n",
            path.display(),
            DEFAULT_ROWS,
            DEFAULT_LOG_LEVEL,
        )
    }
}
