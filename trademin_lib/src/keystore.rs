//! Persistence of the provider API key.
//!
//! The key lives as plain UTF-8 text in a single file. Saves go through a
//! temporary file in the same directory and an atomic rename, so the
//! destination either holds the old key or the new one, never a truncated mix.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::atomic_write::write_atomic;

/// Location of the key file relative to the user's home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".trademin/polygon_api_key";

/// Errors from reading or writing the key file.
#[derive(Error, Debug)]
pub enum KeyStoreError {
    #[error("API key is empty")]
    EmptyKey,
    #[error("Failed to read API key from {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write API key to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Result of [`save_api_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The key was written. `replaced` is true when a previous key existed.
    Written { replaced: bool },
    /// A key already exists and overwriting was not allowed. Nothing was touched.
    Rejected,
}

/// Default key file: `$HOME/.trademin/polygon_api_key`, or relative to the
/// current directory when `HOME` is unset.
pub fn default_config_path() -> PathBuf {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(DEFAULT_CONFIG_FILE)
}

/// Reads the API key stored at `path`.
///
/// Returns `Ok(None)` when the file does not exist or contains only whitespace.
pub fn load_api_key(path: &Path) -> Result<Option<String>, KeyStoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No API key file at {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(KeyStoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let key = contents.trim();
    if key.is_empty() {
        Ok(None)
    } else {
        Ok(Some(key.to_string()))
    }
}

/// Stores `api_key` at `path`.
///
/// If a key already exists and `overwrite` is false the call returns
/// [`SaveOutcome::Rejected`] and the file is left byte-identical.
pub fn save_api_key(
    api_key: &str,
    path: &Path,
    overwrite: bool,
) -> Result<SaveOutcome, KeyStoreError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(KeyStoreError::EmptyKey);
    }

    let replaced = load_api_key(path)?.is_some();
    if replaced && !overwrite {
        tracing::info!(
            "API key already present in {}, not overwriting",
            path.display()
        );
        return Ok(SaveOutcome::Rejected);
    }

    write_atomic(path, format!("{}\n", api_key).as_bytes()).map_err(|source| {
        KeyStoreError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::info!("Saved API key to {}", path.display());

    Ok(SaveOutcome::Written { replaced })
}

/// Masks all but the last four characters of a key for display.
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    let visible = chars.len().min(4);
    let hidden = chars.len() - visible;
    let tail: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), tail)
}
