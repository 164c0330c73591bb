//! The conversion form: raw text in, display line out, history kept.

use serde::{Deserialize, Serialize};

use unitconv_core::format_result;
use unitconv_core::models::{Category, ConversionRecord};
use unitconv_core::{
    ConversionPolicy, ConvertError, Converter, HistoryRecorder, HistoryStore, StoreError,
    UnitTable,
};

/// What the user has typed and selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionForm {
    pub input: String,
    /// `None` lets the service infer the category from the two units.
    pub category: Option<String>,
    pub from: String,
    pub to: String,
}

impl ConversionForm {
    pub fn new(input: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            category: None,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Exchange source and target units.
    pub fn swap_units(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

/// A successful conversion, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub category: Category,
    pub input: f64,
    pub result: f64,
    /// The result alone, formatted.
    pub formatted: String,
    /// `"{input} {from} = {result} {to}"`.
    pub display: String,
    pub record: ConversionRecord,
}

/// Drives conversions for one form and owns the history.
pub struct ConverterService<S: HistoryStore> {
    converter: Converter<'static>,
    history: HistoryRecorder<S>,
}

impl<S: HistoryStore> ConverterService<S> {
    /// Build the service and rehydrate history from `store`.
    pub fn new(policy: ConversionPolicy, store: S) -> Self {
        Self {
            converter: Converter::new(UnitTable::standard(), policy),
            history: HistoryRecorder::open(store),
        }
    }

    /// Validate, convert, format and record.
    ///
    /// Invalid input and unknown units return an error and leave the history
    /// untouched. Failing to persist the history is only logged: the
    /// conversion itself succeeded.
    pub fn submit(&mut self, form: &ConversionForm) -> Result<Conversion, ConvertError> {
        let input = parse_input(&form.input)?;
        let table = self.converter.table();

        let category = match form.category.as_deref() {
            Some(name) => table.category(name)?,
            None => table.infer_category(&form.from, &form.to)?,
        };
        let from = table.unit(category, &form.from)?;
        let to = table.unit(category, &form.to)?;

        let result = self.converter.convert_units(input, category, from, to)?;
        let formatted = format_result(result);
        let display = format!(
            "{} {} = {} {}",
            format_result(input),
            from.symbol(),
            formatted,
            to.symbol()
        );
        tracing::debug!(%category, from = from.id, to = to.id, input, result, "Converted");

        let record = ConversionRecord::new(category, input, from.symbol(), to.symbol(), result);
        if let Err(e) = self.history.record(record.clone()) {
            tracing::warn!("Failed to persist conversion history: {}", e);
        }

        Ok(Conversion {
            category,
            input,
            result,
            formatted,
            display,
            record,
        })
    }

    /// Swap the form's units, re-converting when the input is a number.
    pub fn swap(&mut self, form: &mut ConversionForm) -> Option<Result<Conversion, ConvertError>> {
        form.swap_units();
        if parse_input(&form.input).is_ok() {
            Some(self.submit(form))
        } else {
            None
        }
    }

    /// Reset the form's units to the defaults for `category`.
    pub fn select_category(
        &self,
        form: &mut ConversionForm,
        category: &str,
    ) -> Result<Category, ConvertError> {
        let table = self.converter.table();
        let category = table.category(category)?;
        let (from, to) = table.default_units(category)?;
        form.category = Some(category.as_str().to_string());
        form.from = from.id.to_string();
        form.to = to.id.to_string();
        Ok(category)
    }

    pub fn history(&self) -> &[ConversionRecord] {
        self.history.list()
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.history.clear()
    }
}

/// Parse the input field as a finite real number.
pub fn parse_input(text: &str) -> Result<f64, ConvertError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ConvertError::InvalidInput("empty input".to_string()));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ConvertError::InvalidInput(format!("{:?} is not a number", trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_input("-3").unwrap(), -3.0);
        assert_eq!(parse_input("1e3").unwrap(), 1000.0);
        assert!(parse_input("").is_err());
        assert!(parse_input("   ").is_err());
        assert!(parse_input("abc").is_err());
        assert!(parse_input("NaN").is_err());
        assert!(parse_input("inf").is_err());
    }

    #[test]
    fn test_swap_units() {
        let mut form = ConversionForm::new("1", "km", "m");
        form.swap_units();
        assert_eq!(form.from, "m");
        assert_eq!(form.to, "km");
    }
}
