//! # Ingredient Parser
//!
//! This module turns one line of recipe text into a [`ParsedIngredient`].
//!
//! ## Format
//!
//! A line is read as whitespace-separated tokens, left to right:
//!
//! - an optional quantity: a decimal (`2`, `1.5`, `.5`) or a fraction (`1/2`),
//!   optionally followed by a fraction remainder (`1 1/2`)
//! - an optional unit from the unit table (`cups`, `Tbsp`, `g`, ...)
//! - the food name: every remaining token
//!
//! A line without a food name yields nothing. A line without a quantity gets a
//! quantity of 1.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_nutrition::ingredient_parser::parse_ingredient;
//!
//! let parsed = parse_ingredient("1 1/2 cups milk").unwrap();
//! assert_eq!(parsed.quantity, 1.5);
//! assert_eq!(parsed.unit, "cup");
//! assert_eq!(parsed.food_name, "milk");
//!
//! assert!(parse_ingredient("   ").is_none());
//! ```

use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

use crate::ingredient_model::ParsedIngredient;
use crate::unit_table::{UnitTable, DEFAULT_UNITS};

/// Quantity used when a line states none
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Regex patterns for parsing quantity tokens
static QUANTITY_PATTERNS: LazyLock<QuantityPatterns> = LazyLock::new(QuantityPatterns::new);

/// Compiled regex patterns for quantity tokens
struct QuantityPatterns {
    /// Matches decimal amounts: "2", "1.5", ".25"
    decimal: Regex,
    /// Matches fractions: "1/2", "1.5/3"
    fraction: Regex,
}

impl QuantityPatterns {
    fn new() -> Self {
        Self {
            decimal: Regex::new(r"^(?:\d+(?:\.\d+)?|\.\d+)$")
                .expect("Decimal quantity pattern should be valid"),
            fraction: Regex::new(r"^(\d+(?:\.\d+)?|\.\d+)/(\d+(?:\.\d+)?|\.\d+)$")
                .expect("Fraction quantity pattern should be valid"),
        }
    }
}

/// Line parser bound to a unit table
#[derive(Debug, Clone, Copy)]
pub struct IngredientParser<'a> {
    units: &'a UnitTable,
}

impl<'a> IngredientParser<'a> {
    pub fn new(units: &'a UnitTable) -> Self {
        Self { units }
    }

    /// Parse one ingredient line.
    ///
    /// Returns `None` for blank lines and for lines where nothing is left for
    /// the food name once the quantity and unit are taken.
    pub fn parse(&self, line: &str) -> Option<ParsedIngredient> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut consumed = 0;
        let mut quantity = DEFAULT_QUANTITY;

        if let Some(amount) = tokens.first().and_then(|token| parse_quantity(token)) {
            quantity = amount;
            consumed = 1;

            if let Some(total) = tokens
                .get(1)
                .filter(|token| token.contains('/'))
                .and_then(|token| parse_fraction(token))
                .map(|remainder| quantity + remainder)
                .filter(|total| total.is_finite())
            {
                quantity = total;
                consumed = 2;
            }
        }

        let mut unit = "";
        if let Some(definition) = tokens.get(consumed).and_then(|token| self.units.lookup(token)) {
            unit = definition.canonical;
            consumed += 1;
        }

        let food_name = tokens[consumed..].join(" ");
        if food_name.is_empty() {
            debug!("No food name in ingredient line '{}'", line);
            return None;
        }

        let (unit, canonical_unit) = if unit.is_empty() {
            (String::new(), String::new())
        } else {
            self.units.normalize(unit)
        };

        trace!(
            "Parsed '{}' as quantity={} unit='{}' food='{}'",
            line,
            quantity,
            unit,
            food_name
        );

        Some(ParsedIngredient {
            raw_line: line.to_string(),
            quantity,
            unit,
            canonical_unit,
            food_name,
        })
    }
}

/// Parse a line against the standard unit table
pub fn parse_ingredient(line: &str) -> Option<ParsedIngredient> {
    IngredientParser::new(&DEFAULT_UNITS).parse(line)
}

/// Parse a leading quantity token: a positive, finite decimal or fraction
fn parse_quantity(token: &str) -> Option<f64> {
    let amount = if QUANTITY_PATTERNS.decimal.is_match(token) {
        token.parse::<f64>().ok()
    } else {
        parse_fraction(token)
    }?;

    (amount.is_finite() && amount > 0.0).then_some(amount)
}

/// Parse an `a/b` fraction with a non-zero denominator
fn parse_fraction(token: &str) -> Option<f64> {
    let captures = QUANTITY_PATTERNS.fraction.captures(token)?;
    let numerator: f64 = captures[1].parse().ok()?;
    let denominator: f64 = captures[2].parse().ok()?;

    if denominator == 0.0 {
        return None;
    }

    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_table::UnitDefinition;

    #[test]
    fn test_parse_simple_ingredient() {
        let result = parse_ingredient("2 cups flour").unwrap();
        assert_eq!(result.quantity, 2.0);
        assert_eq!(result.unit, "cup");
        assert_eq!(result.canonical_unit, "cup");
        assert_eq!(result.food_name, "flour");
        assert_eq!(result.raw_line, "2 cups flour");
    }

    #[test]
    fn test_parse_fraction_ingredient() {
        let result = parse_ingredient("1/2 cup sugar").unwrap();
        assert!((result.quantity - 0.5).abs() < 1e-9);
        assert_eq!(result.food_name, "sugar");

        let result = parse_ingredient("1 1/2 cups milk").unwrap();
        assert_eq!(result.quantity, 1.5);
        assert_eq!(result.unit, "cup");
        assert_eq!(result.food_name, "milk");
    }

    #[test]
    fn test_parse_no_quantity() {
        let result = parse_ingredient("salt").unwrap();
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.unit, "");
        assert_eq!(result.canonical_unit, "");
        assert_eq!(result.food_name, "salt");
    }

    #[test]
    fn test_parse_unit_without_quantity() {
        let result = parse_ingredient("Tbsp olive oil").unwrap();
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.unit, "tbsp");
        assert_eq!(result.food_name, "olive oil");
    }

    #[test]
    fn test_parse_quantity_without_unit() {
        let result = parse_ingredient("3 large eggs").unwrap();
        assert_eq!(result.quantity, 3.0);
        assert!(!result.has_unit());
        assert_eq!(result.food_name, "large eggs");
    }

    #[test]
    fn test_blank_lines_yield_nothing() {
        assert!(parse_ingredient("").is_none());
        assert!(parse_ingredient("   \t ").is_none());
    }

    #[test]
    fn test_missing_food_name_is_rejected() {
        assert!(parse_ingredient("2").is_none());
        assert!(parse_ingredient("2 cups").is_none());
        assert!(parse_ingredient("1 1/2 tbsp").is_none());
        assert!(parse_ingredient("cups").is_none());
    }

    #[test]
    fn test_unparseable_fraction_keeps_default_quantity() {
        let result = parse_ingredient("1/0 cup water").unwrap();
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.food_name, "1/0 cup water");

        let result = parse_ingredient("a/b cup water").unwrap();
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.food_name, "a/b cup water");
    }

    #[test]
    fn test_bad_mixed_remainder_is_not_consumed() {
        let result = parse_ingredient("2 1/0 cups rice").unwrap();
        assert_eq!(result.quantity, 2.0);
        assert_eq!(result.unit, "");
        assert_eq!(result.food_name, "1/0 cups rice");
    }

    #[test]
    fn test_overflowing_mixed_remainder_is_not_consumed() {
        let huge = format!("1{}", "0".repeat(308));
        let line = format!("{huge} {huge}/1 cups flour");
        let result = parse_ingredient(&line).unwrap();
        assert!(result.quantity.is_finite());
        assert_eq!(result.quantity, 1e308);
        assert_eq!(result.unit, "");
        assert_eq!(result.food_name, format!("{huge}/1 cups flour"));
    }

    #[test]
    fn test_non_positive_and_odd_numbers_are_not_quantities() {
        let result = parse_ingredient("0 cups flour").unwrap();
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.food_name, "0 cups flour");

        for line in ["-2 cups flour", "inf cups flour", "NaN cups flour", "1e3 cups flour"] {
            let result = parse_ingredient(line).unwrap();
            assert_eq!(result.quantity, 1.0, "line {line}");
        }
    }

    #[test]
    fn test_extra_whitespace() {
        let result = parse_ingredient("  250\tg   dark   chocolate  ").unwrap();
        assert_eq!(result.quantity, 250.0);
        assert_eq!(result.unit, "g");
        assert_eq!(result.food_name, "dark chocolate");
        assert_eq!(result.raw_line, "250\tg   dark   chocolate");
    }

    #[test]
    fn test_decimal_quantities_round_trip_through_lines() {
        for (quantity, unit, canonical) in [
            (0.25, "tsp", "tsp"),
            (2.0, "Kilograms", "kg"),
            (12.5, "OZ", "oz"),
            (3.0, "lbs", "lb"),
            (500.0, "ml", "ml"),
        ] {
            let line = format!("{quantity} {unit} brown rice");
            let result = parse_ingredient(&line).unwrap();
            assert_eq!(result.quantity, quantity, "line {line}");
            assert_eq!(result.canonical_unit, canonical, "line {line}");
            assert_eq!(result.food_name, "brown rice", "line {line}");
        }
    }

    #[test]
    fn test_custom_unit_table() {
        let table = UnitTable::new(vec![UnitDefinition {
            canonical: "pinch",
            aliases: &["pinch", "pinches"],
            reference_grams: 0.36,
        }]);
        let parser = IngredientParser::new(&table);

        let result = parser.parse("2 pinches salt").unwrap();
        assert_eq!(result.unit, "pinch");
        assert_eq!(result.food_name, "salt");

        let result = parser.parse("2 cups flour").unwrap();
        assert_eq!(result.unit, "");
        assert_eq!(result.food_name, "cups flour");
    }

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(parse_quantity("2.5"), Some(2.5));
        assert_eq!(parse_quantity(".5"), Some(0.5));
        assert_eq!(parse_quantity("3/4"), Some(0.75));
        assert_eq!(parse_quantity("0"), None);
        assert_eq!(parse_quantity("1/0"), None);
        assert_eq!(parse_quantity("1."), None);
        assert_eq!(parse_fraction("0/4"), Some(0.0));
        assert_eq!(parse_fraction("2"), None);
    }
}
