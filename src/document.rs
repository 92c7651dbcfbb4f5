//! Loading raw TOML documents from disk.
//!
//! Only decoding lives here; schema interpretation is in
//! [`crate::export::schema`].

use std::fs;
use std::path::Path;

use crate::error::{ExportError, ExportResult};

/// Reads and parses a TOML file, preserving key declaration order.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be read and
/// [`ExportError::Toml`] if it is not valid TOML.
pub fn load_document(path: &Path) -> ExportResult<toml::Table> {
    let content = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&content)
}

/// Parses a TOML string into a table, preserving key declaration order.
///
/// # Errors
///
/// Returns [`ExportError::Toml`] if the string is not valid TOML.
pub fn parse_document(s: &str) -> ExportResult<toml::Table> {
    Ok(s.parse::<toml::Table>()?)
}
