//! Runtime configuration resolved from arguments and environment.

use crate::commands::Args;
use anyhow::{Context, Result};
use roster_core::{default_log_level, LogLevel};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "roster-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: LogLevel,
}

impl RosterConfig {
    /// Applies defaults for anything not given on the command line or env.
    ///
    /// Relative paths are resolved against the working directory.
    pub fn resolve(args: &Args) -> Result<Self> {
        let db_path = match &args.db {
            Some(path) => absolute(path)?,
            None => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
        };
        let log_dir = match &args.log_dir {
            Some(path) => absolute(path)?,
            None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        };
        let log_level = match &args.log_level {
            Some(value) => LogLevel::parse(value)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("could not read working directory")?;
    Ok(cwd.join(path))
}
