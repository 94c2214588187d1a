//! # Ingredient Matcher
//!
//! This module resolves ingredient lines against a food catalog.
//!
//! Each non-blank line is parsed; lines without a food name are dropped. The
//! food name is then looked up exactly (ignoring case), and failing that,
//! approximately within the configured edit distance. The distance reported
//! for a fuzzy hit is recomputed from the query and the matched food name.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_nutrition::catalog::FoodCatalog;
//! use recipe_nutrition::ingredient_matcher::parse_and_match_all;
//!
//! let catalog = FoodCatalog::from_json_str(
//!     r#"[{"name": "Milk", "measure": "cup", "gramsPerMeasure": 244, "caloriesPer100g": 61}]"#,
//! )?;
//! let matches = parse_and_match_all("1 1/2 cups milk\n\n2 tbsp unicorn dust", &catalog);
//!
//! assert_eq!(matches.len(), 2);
//! assert!(matches[0].is_matched());
//! assert!(!matches[1].is_matched());
//! # Ok::<(), recipe_nutrition::catalog_errors::CatalogLoadError>(())
//! ```

use log::debug;

use crate::catalog::{edit_distance, FoodLookup};
use crate::ingredient_model::{IngredientMatch, ParsedIngredient};
use crate::ingredient_parser::IngredientParser;
use crate::matcher_config::{MatchConfig, DEFAULT_CONFIG};

/// Parses ingredient lines and resolves them against a food lookup
pub struct IngredientMatcher<'a, 'c, L: FoodLookup + ?Sized> {
    catalog: &'a L,
    parser: IngredientParser<'c>,
    max_distance: usize,
}

impl<'a, 'c, L: FoodLookup + ?Sized> IngredientMatcher<'a, 'c, L> {
    pub fn new(catalog: &'a L, config: &'c MatchConfig) -> Self {
        Self {
            catalog,
            parser: IngredientParser::new(&config.units),
            max_distance: config.max_fuzzy_distance,
        }
    }

    /// Resolve an already parsed ingredient
    pub fn match_ingredient(&self, parsed: ParsedIngredient) -> IngredientMatch<'a> {
        if let Some(food) = self.catalog.lookup_exact(&parsed.food_name) {
            debug!("Exact match '{}' -> '{}'", parsed.food_name, food.name);
            return IngredientMatch::exact(parsed, food);
        }

        if let Some((food, _)) = self.catalog.lookup_fuzzy(&parsed.food_name, self.max_distance) {
            let distance = edit_distance(
                &parsed.food_name.trim().to_lowercase(),
                &food.name.to_lowercase(),
            );
            debug!(
                "Fuzzy match '{}' -> '{}' (distance {})",
                parsed.food_name, food.name, distance
            );
            return IngredientMatch::fuzzy(parsed, food, distance);
        }

        debug!("No catalog match for '{}'", parsed.food_name);
        IngredientMatch::unmatched(parsed)
    }

    /// Parse and resolve one line; `None` when the line holds no ingredient
    pub fn match_line(&self, line: &str) -> Option<IngredientMatch<'a>> {
        self.parser
            .parse(line)
            .map(|parsed| self.match_ingredient(parsed))
    }

    /// Parse and resolve every line of a block, in order
    pub fn match_all(&self, block: &str) -> Vec<IngredientMatch<'a>> {
        block
            .split(['\n', '\r'])
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| self.match_line(line))
            .collect()
    }
}

/// Parse and resolve a block of ingredient lines with the default policy
pub fn parse_and_match_all<'a, L: FoodLookup + ?Sized>(
    block: &str,
    catalog: &'a L,
) -> Vec<IngredientMatch<'a>> {
    IngredientMatcher::new(catalog, &DEFAULT_CONFIG).match_all(block)
}
