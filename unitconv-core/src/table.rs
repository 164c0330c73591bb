//! The static unit table.
//!
//! Every linear category is expressed relative to one base unit (factor 1),
//! so the table holds one number per unit instead of a pairwise matrix.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::error::{ConvertError, TableError};
use crate::models::{Category, Scale, UnitDefinition, UnitKind};

const LENGTH: &[UnitDefinition] = &[
    UnitDefinition::linear("m", "meter", 1.0, &["meters", "metre"]),
    UnitDefinition::linear("km", "kilometer", 1000.0, &["kilometers"]),
    UnitDefinition::linear("mi", "mile", 1609.34, &["miles"]),
    UnitDefinition::linear("ft", "foot", 0.3048, &["feet"]),
    UnitDefinition::linear("cm", "centimeter", 0.01, &["centimeters"]),
    UnitDefinition::linear("mm", "millimeter", 0.001, &["millimeters"]),
    UnitDefinition::linear("in", "inch", 0.0254, &["inches"]),
    UnitDefinition::linear("yd", "yard", 0.9144, &["yards"]),
];

const MASS: &[UnitDefinition] = &[
    UnitDefinition::linear("kg", "kilogram", 1.0, &["kilograms"]),
    UnitDefinition::linear("g", "gram", 0.001, &["grams"]),
    UnitDefinition::linear("lb", "pound", 0.453592, &["lbs", "pounds"]),
    UnitDefinition::linear("oz", "ounce", 0.0283495, &["ounces"]),
    UnitDefinition::linear("t", "tonne", 1000.0, &["tonnes"]),
];

const TEMPERATURE: &[UnitDefinition] = &[
    UnitDefinition::scale("°C", "celsius", Scale::Celsius, &["C", "degC", "℃"]),
    UnitDefinition::scale("°F", "fahrenheit", Scale::Fahrenheit, &["F", "degF", "℉"]),
    UnitDefinition::scale("K", "kelvin", Scale::Kelvin, &[]),
];

const VOLUME: &[UnitDefinition] = &[
    UnitDefinition::linear("L", "liter", 1.0, &["liters", "litre"]),
    UnitDefinition::linear("mL", "milliliter", 0.001, &["milliliters"]),
    UnitDefinition::linear("gal", "gallon", 3.78541, &["gallons"]),
    UnitDefinition::linear("m³", "cubic meter", 1000.0, &["m3", "m^3"]),
    UnitDefinition::linear("ft³", "cubic foot", 28.3168, &["ft3", "ft^3"]),
    UnitDefinition::linear("fl oz", "fluid ounce", 0.0295735, &["floz", "fl-oz"]),
];

const SPEED: &[UnitDefinition] = &[
    UnitDefinition::linear("m/s", "meters per second", 1.0, &["mps"]),
    UnitDefinition::linear("km/h", "kilometers per hour", 0.277778, &["kph", "kmh"]),
    UnitDefinition::linear("mph", "miles per hour", 0.44704, &["mi/h"]),
    UnitDefinition::linear("kn", "knot", 0.514444, &["knots", "kt"]),
    UnitDefinition::linear("ft/s", "feet per second", 0.3048, &["fps"]),
];

static STANDARD: Lazy<UnitTable> = Lazy::new(|| {
    UnitTable::new(vec![
        (Category::Length, LENGTH),
        (Category::Mass, MASS),
        (Category::Temperature, TEMPERATURE),
        (Category::Volume, VOLUME),
        (Category::Speed, SPEED),
    ])
    .expect("built-in unit table is valid")
});

/// A validated category → units mapping.
#[derive(Debug, Clone)]
pub struct UnitTable {
    categories: Vec<(Category, &'static [UnitDefinition])>,
}

impl UnitTable {
    /// Build a table, checking every invariant up front so lookups never
    /// have to.
    pub fn new(
        categories: Vec<(Category, &'static [UnitDefinition])>,
    ) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for (category, units) in &categories {
            if !seen.insert(*category) {
                return Err(TableError::DuplicateCategory(category.to_string()));
            }
            validate_category(*category, units)?;
        }
        Ok(Self { categories })
    }

    /// The built-in table of length, mass, temperature, volume and speed.
    pub fn standard() -> &'static UnitTable {
        &STANDARD
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().map(|(category, _)| *category)
    }

    pub fn units(&self, category: Category) -> Result<&'static [UnitDefinition], ConvertError> {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, units)| *units)
            .ok_or_else(|| ConvertError::InvalidUnit(format!("Unknown category: {}", category)))
    }

    /// Resolve a category by name.
    pub fn category(&self, name: &str) -> Result<Category, ConvertError> {
        Category::from_str(name)
            .filter(|c| self.categories().any(|known| known == *c))
            .ok_or_else(|| ConvertError::InvalidUnit(format!("Unknown category: {}", name.trim())))
    }

    /// Find a unit within a category by id, name or alias.
    pub fn unit(&self, category: Category, key: &str) -> Result<&'static UnitDefinition, ConvertError> {
        let units = self.units(category)?;
        // Exact id wins over a case-insensitive match.
        units
            .iter()
            .find(|u| u.id == key.trim())
            .or_else(|| units.iter().find(|u| u.matches(key)))
            .ok_or_else(|| {
                ConvertError::InvalidUnit(format!("Unknown {} unit: {}", category, key.trim()))
            })
    }

    /// The single category containing both units.
    pub fn infer_category(&self, from: &str, to: &str) -> Result<Category, ConvertError> {
        let candidates: Vec<Category> = self
            .categories()
            .filter(|c| self.unit(*c, from).is_ok() && self.unit(*c, to).is_ok())
            .collect();

        match candidates.as_slice() {
            [category] => Ok(*category),
            [] => Err(ConvertError::InvalidUnit(format!(
                "No category contains both {} and {}",
                from.trim(),
                to.trim()
            ))),
            _ => Err(ConvertError::InvalidUnit(format!(
                "Units {} and {} are ambiguous; name a category",
                from.trim(),
                to.trim()
            ))),
        }
    }

    /// Default source and target for a freshly selected category: the first
    /// unit and, when there is one, the second.
    pub fn default_units(
        &self,
        category: Category,
    ) -> Result<(&'static UnitDefinition, &'static UnitDefinition), ConvertError> {
        let units = self.units(category)?;
        let from = &units[0];
        let to = units.get(1).unwrap_or(from);
        Ok((from, to))
    }
}

fn validate_category(category: Category, units: &[UnitDefinition]) -> Result<(), TableError> {
    if units.is_empty() {
        return Err(TableError::Empty(category.to_string()));
    }

    let mut keys = HashSet::new();
    for unit in units {
        for key in unit.keys() {
            if !keys.insert(key.to_lowercase()) {
                return Err(TableError::Duplicate {
                    category: category.to_string(),
                    key: key.to_string(),
                });
            }
        }
    }

    if category.is_linear() {
        for unit in units {
            match unit.kind {
                UnitKind::Linear(factor) if factor.is_finite() && factor > 0.0 => {}
                UnitKind::Linear(_) => {
                    return Err(TableError::BadFactor {
                        category: category.to_string(),
                        unit: unit.id.to_string(),
                    })
                }
                UnitKind::Scale(_) => {
                    return Err(TableError::KindMismatch {
                        category: category.to_string(),
                        unit: unit.id.to_string(),
                    })
                }
            }
        }

        let bases = units.iter().filter(|u| u.is_base()).count();
        if bases != 1 {
            return Err(TableError::BaseUnit {
                category: category.to_string(),
                found: bases,
            });
        }
    } else {
        let mut scales = HashSet::new();
        for unit in units {
            match unit.kind {
                UnitKind::Scale(scale) if scales.insert(scale) => {}
                UnitKind::Scale(_) => {
                    return Err(TableError::Duplicate {
                        category: category.to_string(),
                        key: unit.id.to_string(),
                    })
                }
                UnitKind::Linear(_) => {
                    return Err(TableError::KindMismatch {
                        category: category.to_string(),
                        unit: unit.id.to_string(),
                    })
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_complete() {
        let table = UnitTable::standard();
        assert_eq!(table.categories().count(), 5);
        assert_eq!(table.units(Category::Length).unwrap().len(), 8);
        assert_eq!(table.units(Category::Mass).unwrap().len(), 5);
        assert_eq!(table.units(Category::Temperature).unwrap().len(), 3);
        assert_eq!(table.units(Category::Volume).unwrap().len(), 6);
        assert_eq!(table.units(Category::Speed).unwrap().len(), 5);
    }

    #[test]
    fn test_rejects_two_base_units() {
        const BAD: &[UnitDefinition] = &[
            UnitDefinition::linear("a", "alpha", 1.0, &[]),
            UnitDefinition::linear("b", "beta", 1.0, &[]),
        ];
        let err = UnitTable::new(vec![(Category::Length, BAD)]).unwrap_err();
        assert_eq!(
            err,
            TableError::BaseUnit {
                category: "length".to_string(),
                found: 2
            }
        );
    }

    #[test]
    fn test_rejects_missing_base_unit() {
        const BAD: &[UnitDefinition] = &[UnitDefinition::linear("a", "alpha", 2.0, &[])];
        assert!(matches!(
            UnitTable::new(vec![(Category::Mass, BAD)]),
            Err(TableError::BaseUnit { found: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        const BAD: &[UnitDefinition] = &[
            UnitDefinition::linear("a", "alpha", 1.0, &[]),
            UnitDefinition::linear("b", "beta", -3.0, &[]),
        ];
        assert!(matches!(
            UnitTable::new(vec![(Category::Mass, BAD)]),
            Err(TableError::BadFactor { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        const BAD: &[UnitDefinition] = &[
            UnitDefinition::linear("a", "alpha", 1.0, &[]),
            UnitDefinition::linear("b", "beta", 2.0, &["A"]),
        ];
        assert!(matches!(
            UnitTable::new(vec![(Category::Volume, BAD)]),
            Err(TableError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_rejects_factor_in_temperature() {
        const BAD: &[UnitDefinition] = &[UnitDefinition::linear("x", "ex", 1.0, &[])];
        assert!(matches!(
            UnitTable::new(vec![(Category::Temperature, BAD)]),
            Err(TableError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_unit_lookup() {
        let table = UnitTable::standard();
        assert_eq!(table.unit(Category::Volume, "m3").unwrap().id, "m³");
        assert_eq!(table.unit(Category::Volume, "ml").unwrap().id, "mL");
        assert_eq!(table.unit(Category::Temperature, "C").unwrap().id, "°C");
        assert!(table.unit(Category::Length, "parsec").is_err());
    }

    #[test]
    fn test_infer_category() {
        let table = UnitTable::standard();
        assert_eq!(table.infer_category("km", "mi").unwrap(), Category::Length);
        assert_eq!(table.infer_category("°F", "K").unwrap(), Category::Temperature);
        assert_eq!(table.infer_category("ft/s", "kn").unwrap(), Category::Speed);
        assert!(table.infer_category("kg", "m").is_err());
    }

    #[test]
    fn test_default_units_are_first_two() {
        let (from, to) = UnitTable::standard().default_units(Category::Mass).unwrap();
        assert_eq!(from.id, "kg");
        assert_eq!(to.id, "g");
    }
}
