//! Error types for Stratum operations.
//!
//! This module provides the main error type [`StratumError`]. Only failures
//! that stop a whole generation are represented here; dropped components and
//! edges are reported as warnings by the decoder and never become errors.

use std::{io, path::PathBuf};

use thiserror::Error;

use stratum_core::catalog::CatalogError;

use crate::export::FormatError;

/// The main error type for Stratum operations.
///
/// # Fallback payload
///
/// The `Format` variant carries the raw, unformatted document so a caller can
/// still use it when pretty-printing fails.
#[derive(Debug, Error)]
pub enum StratumError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format document: {err}")]
    Format { err: FormatError, raw: String },

    #[error("Failed to write `{}`: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StratumError {
    /// Create a new `Format` error holding the unformatted document.
    pub fn new_format_error(err: FormatError, raw: impl Into<String>) -> Self {
        Self::Format {
            err,
            raw: raw.into(),
        }
    }

    /// Create a new `Persist` error for `path`.
    pub fn new_persist_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }

    /// The raw document of a `Format` error, if this is one.
    pub fn raw_document(&self) -> Option<&str> {
        match self {
            Self::Format { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
