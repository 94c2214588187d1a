//! # Ingredient and Match Data Model
//!
//! This module defines the values produced while turning recipe text into
//! nutrition figures.
//!
//! ## Core Concepts
//!
//! - **ParsedIngredient**: quantity, unit and food name extracted from one line
//! - **IngredientMatch**: a parsed ingredient paired with the catalog food it
//!   resolved to, if any, plus the edit distance of that resolution
//! - **NutritionTotals**: sums over every match of a recipe
//!
//! ## Usage
//!
//! ```rust
//! use recipe_nutrition::catalog::FoodRecord;
//! use recipe_nutrition::ingredient_model::{IngredientMatch, ParsedIngredient};
//!
//! let apple = FoodRecord {
//!     name: "Apple".to_string(),
//!     measure_label: "medium".to_string(),
//!     grams_per_measure: 182.0,
//!     notes: None,
//!     calories_per_100g: 52.0,
//!     fat_per_100g: 0.2,
//!     carbs_per_100g: 14.0,
//!     protein_per_100g: 0.3,
//! };
//! let parsed = ParsedIngredient::new("1 apple", 1.0, "", "", "apple");
//! let matched = IngredientMatch::exact(parsed, &apple);
//!
//! assert!((matched.calories() - 94.64).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::FoodRecord;

/// One ingredient line broken into quantity, unit and food name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIngredient {
    /// The original line, trimmed
    pub raw_line: String,
    /// Amount of the unit; 1.0 when the line states none
    pub quantity: f64,
    /// Unit as normalized by the unit table, or empty
    pub unit: String,
    /// Canonical unit token, or empty when no unit was recognized
    pub canonical_unit: String,
    /// Everything after the quantity and unit, never empty
    pub food_name: String,
}

impl ParsedIngredient {
    pub fn new(
        raw_line: &str,
        quantity: f64,
        unit: &str,
        canonical_unit: &str,
        food_name: &str,
    ) -> Self {
        Self {
            raw_line: raw_line.to_string(),
            quantity,
            unit: unit.to_string(),
            canonical_unit: canonical_unit.to_string(),
            food_name: food_name.to_string(),
        }
    }

    /// Whether a unit was recognized on the line
    pub fn has_unit(&self) -> bool {
        !self.canonical_unit.is_empty()
    }
}

/// Outcome of resolving a parsed ingredient against the food catalog.
///
/// The matched food is borrowed from the catalog. A match with a food always
/// has a distance of at least 0; an unmatched ingredient reports -1.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientMatch<'a> {
    parsed: ParsedIngredient,
    matched_food: Option<&'a FoodRecord>,
    match_distance: i32,
}

impl<'a> IngredientMatch<'a> {
    /// Exact, case-insensitive name match
    pub fn exact(parsed: ParsedIngredient, food: &'a FoodRecord) -> Self {
        Self {
            parsed,
            matched_food: Some(food),
            match_distance: 0,
        }
    }

    /// Approximate match at the given edit distance
    pub fn fuzzy(parsed: ParsedIngredient, food: &'a FoodRecord, distance: usize) -> Self {
        Self {
            parsed,
            matched_food: Some(food),
            match_distance: i32::try_from(distance).unwrap_or(i32::MAX),
        }
    }

    /// No catalog food resolved
    pub fn unmatched(parsed: ParsedIngredient) -> Self {
        Self {
            parsed,
            matched_food: None,
            match_distance: -1,
        }
    }

    pub fn parsed(&self) -> &ParsedIngredient {
        &self.parsed
    }

    pub fn matched_food(&self) -> Option<&'a FoodRecord> {
        self.matched_food
    }

    /// 0 for an exact match, the edit distance for a fuzzy one, -1 when unmatched
    pub fn match_distance(&self) -> i32 {
        self.match_distance
    }

    pub fn is_matched(&self) -> bool {
        self.matched_food.is_some()
    }

    /// Total weight: quantity times the food's grams per measure
    pub fn weight_grams(&self) -> f64 {
        self.matched_food
            .map_or(0.0, |food| self.parsed.quantity * food.grams_per_measure)
    }

    /// Scale a per-100g figure to the ingredient's total weight
    pub fn nutrient(&self, per_100g: f64) -> f64 {
        (self.weight_grams() / 100.0) * per_100g
    }

    pub fn calories(&self) -> f64 {
        self.matched_food
            .map_or(0.0, |food| self.nutrient(food.calories_per_100g))
    }

    pub fn fat(&self) -> f64 {
        self.matched_food
            .map_or(0.0, |food| self.nutrient(food.fat_per_100g))
    }

    pub fn protein(&self) -> f64 {
        self.matched_food
            .map_or(0.0, |food| self.nutrient(food.protein_per_100g))
    }

    pub fn carbohydrates(&self) -> f64 {
        self.matched_food
            .map_or(0.0, |food| self.nutrient(food.carbs_per_100g))
    }
}

/// Nutrition summed over every ingredient of a recipe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutritionTotals {
    pub weight_grams: f64,
    pub calories: f64,
    pub fat: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    /// Number of ingredients resolved to a catalog food
    pub matched_count: usize,
    /// Number of ingredients left unresolved
    pub unmatched_count: usize,
}

impl NutritionTotals {
    pub fn from_matches(matches: &[IngredientMatch<'_>]) -> Self {
        matches.iter().fold(Self::default(), |mut totals, matched| {
            if matched.is_matched() {
                totals.matched_count += 1;
            } else {
                totals.unmatched_count += 1;
            }
            totals.weight_grams += matched.weight_grams();
            totals.calories += matched.calories();
            totals.fat += matched.fat();
            totals.protein += matched.protein();
            totals.carbohydrates += matched.carbohydrates();
            totals
        })
    }

    /// Share of ingredients that resolved to a food (1.0 for an empty recipe)
    pub fn match_rate(&self) -> f64 {
        let total = self.matched_count + self.unmatched_count;
        if total == 0 {
            return 1.0;
        }
        self.matched_count as f64 / total as f64
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity.fract() == 0.0 {
            write!(f, "{}", self.quantity as i64)?;
        } else {
            write!(f, "{}", self.quantity)?;
        }

        if !self.unit.is_empty() {
            write!(f, " {}", self.unit)?;
        }

        write!(f, " {}", self.food_name)
    }
}

impl fmt::Display for IngredientMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.matched_food {
            Some(food) if self.match_distance == 0 => {
                write!(f, "{} -> {}", self.parsed, food.name)?;
            }
            Some(food) => {
                write!(f, "{} -> {} (~{})", self.parsed, food.name, self.match_distance)?;
            }
            None => return write!(f, "{} -> no match", self.parsed),
        }

        write!(
            f,
            ": {:.1} g, {:.1} kcal, {:.1} g fat, {:.1} g protein, {:.1} g carbs",
            self.weight_grams(),
            self.calories(),
            self.fat(),
            self.protein(),
            self.carbohydrates()
        )
    }
}

impl fmt::Display for NutritionTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total ({} matched, {} unmatched, {:.1}% matched):",
            self.matched_count,
            self.unmatched_count,
            self.match_rate() * 100.0
        )?;
        write!(
            f,
            "  {:.1} g, {:.1} kcal, {:.1} g fat, {:.1} g protein, {:.1} g carbs",
            self.weight_grams, self.calories, self.fat, self.protein, self.carbohydrates
        )
    }
}
