//! # Unit Normalization Table
//!
//! Maps the unit spellings found in ingredient lines onto a small set of
//! canonical tokens (`g`, `kg`, `ml`, `l`, `cup`, `tbsp`, `tsp`, `oz`, `lb`).
//!
//! Each canonical unit also carries a reference weight in grams. Nutrient
//! computation does not consume it: the weight of an ingredient always comes
//! from the matched food's own grams-per-measure figure.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_nutrition::unit_table::normalize_unit;
//!
//! assert_eq!(normalize_unit("CUPS"), ("cup".to_string(), "cup".to_string()));
//! assert_eq!(normalize_unit("zorp"), ("zorp".to_string(), "zorp".to_string()));
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

/// Shared standard table used by the free parsing functions
pub static DEFAULT_UNITS: LazyLock<UnitTable> = LazyLock::new(UnitTable::standard);

/// One canonical unit and every spelling that maps onto it
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    /// Canonical token (e.g., "tbsp")
    pub canonical: &'static str,
    /// Accepted spellings, lower-case (e.g., "tablespoon", "tbl", "t")
    pub aliases: &'static [&'static str],
    /// Descriptive weight of one unit in grams
    pub reference_grams: f64,
}

const STANDARD_UNITS: &[UnitDefinition] = &[
    UnitDefinition {
        canonical: "g",
        aliases: &["g", "gram", "grams"],
        reference_grams: 1.0,
    },
    UnitDefinition {
        canonical: "kg",
        aliases: &["kg", "kilogram", "kilograms"],
        reference_grams: 1000.0,
    },
    UnitDefinition {
        canonical: "ml",
        aliases: &["ml", "milliliter", "milliliters"],
        reference_grams: 1.0,
    },
    UnitDefinition {
        canonical: "l",
        aliases: &["l", "liter", "liters"],
        reference_grams: 1000.0,
    },
    UnitDefinition {
        canonical: "cup",
        aliases: &["cup", "cups", "c"],
        reference_grams: 240.0,
    },
    UnitDefinition {
        canonical: "tbsp",
        aliases: &["tbsp", "tablespoon", "tablespoons", "tbl", "t"],
        reference_grams: 15.0,
    },
    UnitDefinition {
        canonical: "tsp",
        aliases: &["tsp", "teaspoon", "teaspoons"],
        reference_grams: 5.0,
    },
    UnitDefinition {
        canonical: "oz",
        aliases: &["oz", "ounce", "ounces"],
        reference_grams: 28.35,
    },
    UnitDefinition {
        canonical: "lb",
        aliases: &["lb", "lbs", "pound", "pounds"],
        reference_grams: 453.59,
    },
];

/// Immutable lookup table from unit spellings to canonical units
#[derive(Debug, Clone)]
pub struct UnitTable {
    definitions: Vec<UnitDefinition>,
    by_alias: HashMap<String, usize>,
}

impl UnitTable {
    /// Build a table from the given definitions.
    ///
    /// Aliases are matched case-insensitively. When two definitions claim the
    /// same alias the first one keeps it.
    pub fn new(definitions: Vec<UnitDefinition>) -> Self {
        let mut by_alias = HashMap::new();
        for (index, definition) in definitions.iter().enumerate() {
            by_alias.entry(definition.canonical.to_lowercase()).or_insert(index);
            for alias in definition.aliases {
                by_alias.entry(alias.to_lowercase()).or_insert(index);
            }
        }
        Self {
            definitions,
            by_alias,
        }
    }

    /// The fixed kitchen unit table
    pub fn standard() -> Self {
        Self::new(STANDARD_UNITS.to_vec())
    }

    /// Find the definition a token spells, ignoring case
    pub fn lookup(&self, token: &str) -> Option<&UnitDefinition> {
        let key = token.trim().to_lowercase();
        self.by_alias.get(&key).map(|&index| &self.definitions[index])
    }

    /// Check whether a token is a known unit spelling
    pub fn is_unit(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }

    /// Canonical token for a spelling, if known
    pub fn canonical(&self, token: &str) -> Option<&'static str> {
        self.lookup(token).map(|definition| definition.canonical)
    }

    /// Normalize a raw unit into `(normalized, canonical)`.
    ///
    /// Known spellings map to their canonical token in both positions. Unknown
    /// units pass through unchanged.
    pub fn normalize(&self, unit: &str) -> (String, String) {
        match self.canonical(unit) {
            Some(canonical) => (canonical.to_string(), canonical.to_string()),
            None => (unit.to_string(), unit.to_string()),
        }
    }

    /// Reference weight in grams of a canonical unit
    pub fn reference_grams(&self, canonical: &str) -> Option<f64> {
        self.definitions
            .iter()
            .find(|definition| definition.canonical.eq_ignore_ascii_case(canonical.trim()))
            .map(|definition| definition.reference_grams)
    }

    /// All definitions in table order
    pub fn definitions(&self) -> &[UnitDefinition] {
        &self.definitions
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Normalize a unit against the standard table
pub fn normalize_unit(unit: &str) -> (String, String) {
    DEFAULT_UNITS.normalize(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_normalizes_to_its_canonical() {
        let table = UnitTable::standard();
        for definition in table.definitions() {
            for alias in definition.aliases {
                assert_eq!(table.canonical(alias), Some(definition.canonical), "alias {alias}");
            }
        }
    }

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(normalize_unit("CUPS"), normalize_unit("cup"));
        assert_eq!(normalize_unit("Cup"), ("cup".to_string(), "cup".to_string()));
        assert_eq!(normalize_unit("Tablespoons").1, "tbsp");
        assert_eq!(normalize_unit("T").1, "tbsp");
        assert_eq!(normalize_unit("LBS").1, "lb");
    }

    #[test]
    fn test_unknown_unit_passes_through() {
        assert_eq!(normalize_unit("zorp"), ("zorp".to_string(), "zorp".to_string()));
        assert_eq!(normalize_unit(""), (String::new(), String::new()));
    }

    #[test]
    fn test_reference_grams() {
        let table = UnitTable::standard();
        assert_eq!(table.reference_grams("cup"), Some(240.0));
        assert_eq!(table.reference_grams("oz"), Some(28.35));
        assert_eq!(table.reference_grams("lb"), Some(453.59));
        assert_eq!(table.reference_grams("pinch"), None);
    }

    #[test]
    fn test_custom_table() {
        let table = UnitTable::new(vec![UnitDefinition {
            canonical: "pinch",
            aliases: &["pinch", "pinches"],
            reference_grams: 0.36,
        }]);
        assert!(table.is_unit("Pinches"));
        assert!(!table.is_unit("cup"));
        assert_eq!(table.normalize("cup"), ("cup".to_string(), "cup".to_string()));
    }
}
