//! # Matcher Configuration Module
//!
//! This module defines the fixed matching policy (unit table and fuzzy match
//! threshold) and the environment-driven settings of the command-line tool.

use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::{Context, Result};

use crate::unit_table::UnitTable;

/// Largest edit distance accepted for a fuzzy food match
pub const MAX_FUZZY_DISTANCE: usize = 3;

/// Environment variable naming the food catalog file
pub const CATALOG_PATH_VAR: &str = "FOOD_CATALOG_PATH";
/// Environment variable naming the ingredient list file (stdin when unset)
pub const INGREDIENTS_PATH_VAR: &str = "INGREDIENTS_PATH";
/// Environment variable selecting the log output format ("json" or text)
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Shared default policy used by the free matching functions
pub static DEFAULT_CONFIG: LazyLock<MatchConfig> = LazyLock::new(MatchConfig::default);

/// Matching policy, built once and passed by reference
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Unit spellings recognized by the parser
    pub units: UnitTable,
    /// Largest edit distance accepted for a fuzzy match
    pub max_fuzzy_distance: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            units: UnitTable::standard(),
            max_fuzzy_distance: MAX_FUZZY_DISTANCE,
        }
    }
}

/// Log output format of the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Settings of the command-line tool
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Food catalog JSON file
    pub catalog_path: PathBuf,
    /// Ingredient list file; `None` reads standard input
    pub ingredients_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read settings from the process environment, after loading `.env`
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let catalog_path = non_blank(CATALOG_PATH_VAR)
            .map(PathBuf::from)
            .with_context(|| format!("{CATALOG_PATH_VAR} must be set"))?;

        let log_format = match non_blank(LOG_FORMAT_VAR) {
            Some(format) if format.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            catalog_path,
            ingredients_path: non_blank(INGREDIENTS_PATH_VAR).map(PathBuf::from),
            log_format,
        })
    }
}
