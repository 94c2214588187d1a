//! # Recipe Nutrition
//!
//! Turns free-text ingredient lines into quantities, units and food names,
//! resolves each food name against an in-memory food catalog (exactly, or
//! within a small edit distance) and computes calories and macros from the
//! matched food's per-100g figures.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_nutrition::catalog::FoodCatalog;
//! use recipe_nutrition::ingredient_matcher::parse_and_match_all;
//! use recipe_nutrition::ingredient_model::NutritionTotals;
//!
//! let catalog = FoodCatalog::from_json_str(
//!     r#"[{"name": "Apple", "measure": "medium", "gramsPerMeasure": 182,
//!          "caloriesPer100g": 52}]"#,
//! )?;
//! let matches = parse_and_match_all("1 aple", &catalog);
//! let totals = NutritionTotals::from_matches(&matches);
//!
//! assert_eq!(totals.matched_count, 1);
//! assert!(totals.calories > 90.0 && totals.calories < 100.0);
//! # Ok::<(), recipe_nutrition::catalog_errors::CatalogLoadError>(())
//! ```

pub mod catalog;
pub mod catalog_errors;
pub mod ingredient_matcher;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod matcher_config;
pub mod unit_table;

pub use catalog::{edit_distance, CatalogHandle, FoodCatalog, FoodLookup, FoodRecord};
pub use catalog_errors::CatalogLoadError;
pub use ingredient_matcher::{parse_and_match_all, IngredientMatcher};
pub use ingredient_model::{IngredientMatch, NutritionTotals, ParsedIngredient};
pub use ingredient_parser::{parse_ingredient, IngredientParser};
pub use matcher_config::{MatchConfig, MAX_FUZZY_DISTANCE};
pub use unit_table::{normalize_unit, UnitTable};
