use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// Snapshot of one successful conversion.
///
/// Records are created by a conversion and never edited afterwards; the only
/// way to remove one is to clear the whole history. Units are stored as
/// display symbols so the history renders even if lookup keys change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub input: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub result: f64,
    pub category: Category,
}

impl ConversionRecord {
    pub fn new(
        category: Category,
        input: f64,
        from_unit: impl Into<String>,
        to_unit: impl Into<String>,
        result: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input,
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
            result,
            category,
        }
    }
}
