//! Sysfs attribute accessors
//!
//! Thin wrappers over single-attribute reads and writes. Values are plain
//! ASCII; frequency attributes hold a decimal kHz figure. Writes carry no
//! trailing newline.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SysfsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unparseable value in {path}: {value:?}")]
    Parse { path: PathBuf, value: String },
}

/// Read an attribute and strip the trailing newline.
///
/// `read_to_string` retries interrupted reads internally, matching what a
/// sysfs read loop has to do by hand.
pub fn read_attr(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path).map_err(|source| SysfsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.trim_end().to_string())
}

/// Read a decimal kHz frequency attribute.
pub fn read_khz(path: &Path) -> Result<u64> {
    let value = read_attr(path)?;
    value.trim().parse().map_err(|_| SysfsError::Parse {
        path: path.to_path_buf(),
        value,
    })
}

/// Write a literal attribute value, no trailing newline.
pub fn write_attr(path: &Path, value: &str) -> Result<()> {
    fs::write(path, value).map_err(|source| SysfsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Format a kHz frequency at the I/O boundary and write it.
pub fn write_khz(path: &Path, khz: u64) -> Result<()> {
    write_attr(path, &khz.to_string())
}
