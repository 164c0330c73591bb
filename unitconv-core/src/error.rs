use thiserror::Error;

/// Errors raised while converting a single value.
///
/// Every kind is terminal for the action that triggered it and leaves all
/// state (including history) untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// The value is not a finite real number.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A valid negative value in a category where the active policy forbids
    /// negatives. Carries the category name.
    #[error("Invalid input: {0} cannot be negative")]
    NegativeValue(String),

    /// A category, unit or scale identifier that is not in the table.
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),
}

impl ConvertError {
    /// Message suitable for showing next to the input field.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(_) => "Please enter a valid number".to_string(),
            Self::NegativeValue(category) => {
                format!("Negative values are not allowed for {}", category)
            }
            Self::InvalidUnit(msg) => msg.clone(),
        }
    }
}

/// Errors from the persistence port behind the history.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store cannot be reached, e.g. its lock was poisoned.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A unit table that breaks one of the table invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("Category {0} has no units")]
    Empty(String),

    #[error("Category {category} needs exactly one base unit, found {found}")]
    BaseUnit { category: String, found: usize },

    #[error("Unit {unit} in {category} has a non-positive or non-finite factor")]
    BadFactor { category: String, unit: String },

    #[error("Identifier {key} is used twice in {category}")]
    Duplicate { category: String, key: String },

    #[error("Unit {unit} does not match the kind of category {category}")]
    KindMismatch { category: String, unit: String },

    #[error("Category {0} is defined twice")]
    DuplicateCategory(String),
}
