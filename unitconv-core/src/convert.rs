//! Linear and temperature conversion.

use crate::error::ConvertError;
use crate::models::{Category, Scale, UnitDefinition, UnitKind};
use crate::table::UnitTable;

/// Policy knobs for the linear converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionPolicy {
    /// Whether negative values are accepted in linear categories.
    /// Temperatures may always be negative.
    pub allow_negative: bool,
}

impl Default for ConversionPolicy {
    fn default() -> Self {
        Self {
            allow_negative: true,
        }
    }
}

/// Converts values using a unit table and a policy.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'t> {
    table: &'t UnitTable,
    policy: ConversionPolicy,
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::new(UnitTable::standard(), ConversionPolicy::default())
    }
}

impl<'t> Converter<'t> {
    pub fn new(table: &'t UnitTable, policy: ConversionPolicy) -> Self {
        Self { table, policy }
    }

    pub fn table(&self) -> &'t UnitTable {
        self.table
    }

    pub fn policy(&self) -> ConversionPolicy {
        self.policy
    }

    /// Convert `value` from one unit of `category` to another.
    pub fn convert(
        &self,
        value: f64,
        category: Category,
        from: &str,
        to: &str,
    ) -> Result<f64, ConvertError> {
        let from = self.table.unit(category, from)?;
        let to = self.table.unit(category, to)?;
        self.convert_units(value, category, from, to)
    }

    /// Convert between two already resolved units of `category`.
    pub fn convert_units(
        &self,
        value: f64,
        category: Category,
        from: &UnitDefinition,
        to: &UnitDefinition,
    ) -> Result<f64, ConvertError> {
        if !value.is_finite() {
            return Err(ConvertError::InvalidInput(format!("{} is not a finite number", value)));
        }
        if category.is_linear() && !self.policy.allow_negative && value < 0.0 {
            return Err(ConvertError::NegativeValue(category.to_string()));
        }
        if from.id == to.id {
            return Ok(value);
        }

        match (from.kind, to.kind) {
            (UnitKind::Linear(from_factor), UnitKind::Linear(to_factor)) => {
                let base = value * from_factor;
                Ok(base / to_factor)
            }
            (UnitKind::Scale(from_scale), UnitKind::Scale(to_scale)) => {
                Ok(convert_temperature(value, from_scale, to_scale))
            }
            _ => Err(ConvertError::InvalidUnit(format!(
                "Cannot convert between {} and {}",
                from.id, to.id
            ))),
        }
    }
}

/// Convert with the standard table, allowing negatives.
pub fn convert(value: f64, category: Category, from: &str, to: &str) -> Result<f64, ConvertError> {
    Converter::default().convert(value, category, from, to)
}

/// Convert a temperature, routing through Celsius.
///
/// Identical scales short-circuit so the round trip cannot introduce drift.
pub fn convert_temperature(value: f64, from: Scale, to: Scale) -> f64 {
    if from == to {
        return value;
    }
    from_celsius(to_celsius(value, from), to)
}

/// Parse both scale identifiers, then convert.
pub fn convert_temperature_str(value: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
    let from_scale = parse_scale(from)?;
    let to_scale = parse_scale(to)?;
    Ok(convert_temperature(value, from_scale, to_scale))
}

fn parse_scale(s: &str) -> Result<Scale, ConvertError> {
    Scale::from_str(s)
        .ok_or_else(|| ConvertError::InvalidUnit(format!("Unknown temperature scale: {}", s.trim())))
}

fn to_celsius(value: f64, scale: Scale) -> f64 {
    match scale {
        Scale::Celsius => value,
        Scale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        Scale::Kelvin => value - 273.15,
    }
}

fn from_celsius(celsius: f64, scale: Scale) -> f64 {
    match scale {
        Scale::Celsius => celsius,
        Scale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        Scale::Kelvin => celsius + 273.15,
    }
}
