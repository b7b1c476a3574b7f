//! Normalization of bootconfig style `key = "v1", "v2", ...` assignments.
//!
//! Every line holds exactly one assignment, e.g. as found in
//! `/proc/bootconfig`:
//!
//! ```text
//! kernel.CabCmdBranches = "test\x20me", "here", "ok"
//! kernel.CabCmdDryRun = "1"
//! ```
//!
//! The value is split at whitespace and commas (honoring quotes) and the
//! fields are joined with `,`, giving `kernel.CabCmdBranches=test\x20me,here,ok`.
mod entry;

pub use self::entry::*;

use crate::split::{self, SplitError};

use log::debug;

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_PATH: &str = "/proc/bootconfig";
pub const SOURCE_PATH_ENV: &str = "SHELL_SPLIT_BOOTCONFIG";

#[derive(Debug, thiserror::Error)]
pub enum BootConfigError {
    #[error("failed to parse bootconfig line {0:?}: missing '='")]
    MissingSeparator(String),
    #[error("failed to parse bootconfig line {0:?} after '=': {1}")]
    ValueParse(String, #[source] SplitError),
    #[error("failed to read bootconfig: {0}")]
    Scan(#[source] io::Error),
    #[error("failed to open {0:?}: {1}")]
    Io(PathBuf, #[source] io::Error),
}

fn is_value_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Parse a single `key = value` line.
pub fn parse_line(line: &str) -> Result<ConfigEntry, BootConfigError> {
    let (key, value) = line
        .split_once('=')
        .ok_or_else(|| BootConfigError::MissingSeparator(line.to_owned()))?;

    let fields = split::split_with(value, is_value_separator)
        .map_err(|e| BootConfigError::ValueParse(line.to_owned(), e))?;

    Ok(ConfigEntry::new(key.trim(), fields.join(",")))
}

/// Parse every line of `reader`. The first malformed line aborts parsing.
pub fn parse_entries<R: BufRead>(reader: R) -> Result<Vec<ConfigEntry>, BootConfigError> {
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(BootConfigError::Scan)?;
        let entry = parse_line(&line)?;
        debug!("parsed bootconfig entry {:?}", entry.key);
        entries.push(entry);
    }

    Ok(entries)
}

/// Parse every line of `reader` into a normalized `key=value` string.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<String>, BootConfigError> {
    Ok(parse_entries(reader)?
        .iter()
        .map(ConfigEntry::to_string)
        .collect())
}

pub fn parse_str(input: &str) -> Result<Vec<String>, BootConfigError> {
    parse(input.as_bytes())
}

pub fn load_from_file(path: &Path) -> Result<Vec<ConfigEntry>, BootConfigError> {
    debug!("Loading bootconfig from {path:?}");

    let file = File::open(path).map_err(|e| BootConfigError::Io(path.to_owned(), e))?;
    parse_entries(BufReader::new(file))
}

/// Where to read the bootconfig from, honoring `$SHELL_SPLIT_BOOTCONFIG`.
pub fn source_path() -> PathBuf {
    match env::var_os(SOURCE_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_SOURCE_PATH),
    }
}
