//! Plain-text rendering of the history list and the unit table.

use unitconv_core::format_result;
use unitconv_core::models::{Category, ConversionRecord};
use unitconv_core::UnitTable;

const EMPTY_HISTORY: &str = "No recent conversions";
const BASE_MARKER: &str = " [base]";

/// Render history records, one per line, most recent first.
///
/// Example output:
/// ```text
/// 1 km → 1000 m  (2024-05-01 12:00:00 UTC)
/// 100 °C → 212 °F  (2024-05-01 11:59:10 UTC)
/// ```
pub fn render_history(records: &[ConversionRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", EMPTY_HISTORY);
    }

    let mut output = String::new();
    for record in records {
        output.push_str(&format!(
            "{} {} → {} {}  ({})\n",
            format_result(record.input),
            record.from_unit,
            format_result(record.result),
            record.to_unit,
            record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    output
}

/// Render the units of one category, or of every category.
///
/// Example output:
/// ```text
/// mass
/// ├── kg (kilogram) [base]
/// └── g (gram)
/// ```
pub fn render_units(table: &UnitTable, category: Option<Category>) -> String {
    let categories: Vec<Category> = match category {
        Some(category) => vec![category],
        None => table.categories().collect(),
    };

    let mut output = String::new();
    for category in categories {
        let Ok(units) = table.units(category) else {
            continue;
        };
        output.push_str(category.as_str());
        output.push('\n');
        for (i, unit) in units.iter().enumerate() {
            let branch = if i == units.len() - 1 { "└── " } else { "├── " };
            output.push_str(branch);
            output.push_str(unit.symbol());
            output.push_str(" (");
            output.push_str(unit.name);
            output.push(')');
            if unit.is_base() {
                output.push_str(BASE_MARKER);
            }
            output.push('\n');
        }
    }
    output
}
