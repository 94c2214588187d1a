//! # Catalog Error Types Module
//!
//! This module defines the error raised when a food catalog cannot be built.
//! Lookups never fail: a missing food is an absence, not an error, so the only
//! fallible step is loading the reference data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a food catalog
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The catalog source could not be read
    #[error("Failed to read food catalog {}: {}", .path.display(), .source)]
    Io {
        /// Path of the catalog source
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catalog reader failed
    #[error("Failed to read food catalog: {0}")]
    Read(#[from] std::io::Error),
    /// The catalog source is not valid JSON
    #[error("Failed to parse food catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog source is JSON but not a collection of food records
    #[error("Invalid food catalog format: {0}")]
    InvalidFormat(String),
}
