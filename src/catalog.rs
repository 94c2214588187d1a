//! # Food Catalog Index
//!
//! This module holds the food reference set in memory and answers name-based
//! lookups: exact (case-insensitive, constant time) and fuzzy (Levenshtein
//! edit distance, linear scan over the catalog).
//!
//! ## Loading
//!
//! The catalog is loaded from JSON: either an array of food records, an object
//! whose `foods` key holds that array, or nothing at all (empty text or `null`
//! yields an empty catalog). Field names are matched case-insensitively.
//! Records with a blank name, an unusable `gramsPerMeasure` or negative macros
//! are skipped. The first record seen for a name wins; later duplicates are
//! dropped.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_nutrition::catalog::{FoodCatalog, FoodLookup};
//!
//! let json = r#"[{"name": "Chicken Breast", "measure": "piece", "gramsPerMeasure": 120,
//!                 "caloriesPer100g": 165, "fatPer100g": 3.6, "carbsPer100g": 0,
//!                 "proteinPer100g": 31}]"#;
//! let catalog = FoodCatalog::from_json_str(json)?;
//!
//! assert!(catalog.lookup_exact("chicken breast").is_some());
//! let (food, distance) = catalog.lookup_fuzzy("chiken breast", 3).unwrap();
//! assert_eq!(food.name, "Chicken Breast");
//! assert_eq!(distance, 1);
//! # Ok::<(), recipe_nutrition::catalog_errors::CatalogLoadError>(())
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog_errors::CatalogLoadError;

/// A reference food with its serving weight and per-100g macros
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    /// Catalog key (e.g., "Chicken Breast")
    pub name: String,
    /// Label of one measure (e.g., "cup", "piece")
    #[serde(rename = "measure")]
    pub measure_label: String,
    /// Weight in grams of one measure, always positive
    pub grams_per_measure: f64,
    /// Free-form notes from the source data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub calories_per_100g: f64,
    pub fat_per_100g: f64,
    pub carbs_per_100g: f64,
    pub protein_per_100g: f64,
}

/// Name-based food lookup capability used by the matcher
pub trait FoodLookup {
    /// Case-insensitive exact lookup. Blank names never match.
    fn lookup_exact(&self, name: &str) -> Option<&FoodRecord>;

    /// Closest food within `max_distance` edits, with its distance.
    ///
    /// Among candidates at the same minimal distance the first one scanned is
    /// kept. The scan order is an implementation detail of each backend.
    fn lookup_fuzzy(&self, name: &str, max_distance: usize) -> Option<(&FoodRecord, usize)>;
}

/// Levenshtein distance between two strings, counted in characters
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// In-memory, read-only food catalog
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    records: Vec<FoodRecord>,
    /// Lower-cased names, parallel to `records`
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl FoodCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already typed records.
    ///
    /// Blank names and records with a non-positive weight or a negative or
    /// non-finite macro are discarded. The first record wins on a
    /// case-insensitive name collision.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FoodRecord>,
    {
        let mut catalog = Self::new();
        for mut record in records {
            let trimmed = record.name.trim();
            if trimmed.is_empty() {
                debug!("Discarding food record with blank name");
                continue;
            }
            if trimmed.len() != record.name.len() {
                record.name = trimmed.to_string();
            }
            if let Err(reason) = validate_amounts(&record) {
                warn!("Skipping food record: {reason}");
                continue;
            }

            let key = record.name.to_lowercase();
            if catalog.index.contains_key(&key) {
                debug!("Discarding duplicate food record '{}'", record.name);
                continue;
            }
            catalog.index.insert(key.clone(), catalog.records.len());
            catalog.keys.push(key);
            catalog.records.push(record);
        }
        catalog
    }

    /// Parse a catalog from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, CatalogLoadError> {
        if json.trim().is_empty() {
            info!("Food catalog source is empty, starting with an empty catalog");
            return Ok(Self::new());
        }

        let value: Value = serde_json::from_str(json)?;
        let entries = match value {
            Value::Null => Vec::new(),
            Value::Array(entries) => entries,
            Value::Object(object) => foods_array(object)?,
            other => {
                return Err(CatalogLoadError::InvalidFormat(format!(
                    "expected an array of food records, found {}",
                    json_kind(&other)
                )))
            }
        };

        let total = entries.len();
        let records = entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| match record_from_value(entry) {
                Ok(record) => Some(record),
                Err(reason) => {
                    warn!("Skipping food record #{position}: {reason}");
                    None
                }
            });
        let catalog = Self::from_records(records);

        info!("Loaded {} foods from {} catalog entries", catalog.len(), total);
        Ok(catalog)
    }

    /// Read and parse a catalog from any reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CatalogLoadError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    /// Read and parse a catalog file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        info!("Loading food catalog from {}", path.display());
        let json = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Number of foods in the catalog
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no foods
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record, in load order. Callers must not rely on the order.
    pub fn all_records(&self) -> impl Iterator<Item = &FoodRecord> {
        self.records.iter()
    }
}

impl FoodLookup for FoodCatalog {
    fn lookup_exact(&self, name: &str) -> Option<&FoodRecord> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.index.get(&key).map(|&position| &self.records[position])
    }

    fn lookup_fuzzy(&self, name: &str, max_distance: usize) -> Option<(&FoodRecord, usize)> {
        let query = name.trim().to_lowercase();
        if query.is_empty() || self.is_empty() {
            return None;
        }
        let query_len = query.chars().count();

        let mut best: Option<(usize, usize)> = None;
        for (position, key) in self.keys.iter().enumerate() {
            // The length difference is a lower bound on the edit distance.
            if key.chars().count().abs_diff(query_len) > max_distance {
                continue;
            }

            let distance = edit_distance(&query, key);
            if distance == 0 {
                return Some((&self.records[position], 0));
            }
            if distance <= max_distance && best.map_or(true, |(_, current)| distance < current) {
                best = Some((position, distance));
            }
        }

        best.map(|(position, distance)| {
            debug!(
                "Fuzzy match '{}' -> '{}' (distance {})",
                query, self.records[position].name, distance
            );
            (&self.records[position], distance)
        })
    }
}

/// Shared catalog that can be swapped for a freshly loaded one.
///
/// Readers take an `Arc` snapshot and keep using it even if a reload happens
/// meanwhile. A failed reload leaves the current catalog in place.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<FoodCatalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: FoodCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog in use right now
    pub fn snapshot(&self) -> Arc<FoodCatalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Install a new catalog, returning the previous one
    pub fn replace(&self, catalog: FoodCatalog) -> Arc<FoodCatalog> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }

    /// Load a catalog file and install it, returning the new food count
    pub fn reload_from_path<P: AsRef<Path>>(&self, path: P) -> Result<usize, CatalogLoadError> {
        let catalog = FoodCatalog::from_path(path)?;
        let count = catalog.len();
        self.replace(catalog);
        info!("Food catalog reloaded with {count} foods");
        Ok(count)
    }
}

fn foods_array(object: Map<String, Value>) -> Result<Vec<Value>, CatalogLoadError> {
    let foods = object
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("foods"))
        .map(|(_, value)| value);

    match foods {
        Some(Value::Array(entries)) => Ok(entries),
        Some(Value::Null) => Ok(Vec::new()),
        Some(other) => Err(CatalogLoadError::InvalidFormat(format!(
            "'foods' must be an array, found {}",
            json_kind(&other)
        ))),
        None => Err(CatalogLoadError::InvalidFormat(
            "object catalog has no 'foods' array".to_string(),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convert one JSON entry into a record, or explain why it is unusable
fn record_from_value(value: &Value) -> Result<FoodRecord, String> {
    let Value::Object(object) = value else {
        return Err(format!("expected an object, found {}", json_kind(value)));
    };

    // Field names are case-insensitive; the first spelling of a field wins.
    let mut fields: HashMap<String, &Value> = HashMap::new();
    for (key, field) in object {
        fields.entry(key.to_lowercase()).or_insert(field);
    }

    let name = text_field(&fields, "name")?.unwrap_or_default();
    if name.trim().is_empty() {
        return Err("blank name".to_string());
    }

    let grams_per_measure = number_field(&fields, "gramspermeasure")?
        .ok_or_else(|| format!("'{name}' has no gramsPerMeasure"))?;
    let macro_field = |key: &str| number_field(&fields, key).map(|amount| amount.unwrap_or(0.0));

    Ok(FoodRecord {
        name: name.trim().to_string(),
        measure_label: text_field(&fields, "measure")?.unwrap_or_default(),
        grams_per_measure,
        notes: text_field(&fields, "notes")?.filter(|notes| !notes.trim().is_empty()),
        calories_per_100g: macro_field("caloriesper100g")?,
        fat_per_100g: macro_field("fatper100g")?,
        carbs_per_100g: macro_field("carbsper100g")?,
        protein_per_100g: macro_field("proteinper100g")?,
    })
}

/// Check the numeric invariants every catalog record must hold
fn validate_amounts(record: &FoodRecord) -> Result<(), String> {
    let grams = record.grams_per_measure;
    if !(grams.is_finite() && grams > 0.0) {
        return Err(format!("'{}' has non-positive gramsPerMeasure {grams}", record.name));
    }

    let macros = [
        ("caloriesPer100g", record.calories_per_100g),
        ("fatPer100g", record.fat_per_100g),
        ("carbsPer100g", record.carbs_per_100g),
        ("proteinPer100g", record.protein_per_100g),
    ];
    for (field, amount) in macros {
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(format!("'{}' has invalid {field} {amount}", record.name));
        }
    }
    Ok(())
}

fn text_field(fields: &HashMap<String, &Value>, key: &str) -> Result<Option<String>, String> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(format!("field '{key}' must be text, found {}", json_kind(other))),
    }
}

fn number_field(fields: &HashMap<String, &Value>, key: &str) -> Result<Option<f64>, String> {
    let amount = match fields.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(other) => {
            return Err(format!("field '{key}' must be a number, found {}", json_kind(other)))
        }
    };

    match amount {
        Some(amount) if amount.is_finite() => Ok(Some(amount)),
        _ => Err(format!("field '{key}' is not a finite number")),
    }
}
