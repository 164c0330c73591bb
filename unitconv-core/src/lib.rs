//! Core of unitconv: the static unit table, the linear and temperature
//! converters, result formatting, and the bounded conversion history with its
//! SQLite-backed key-value store.

pub mod calculator;
pub mod convert;
pub mod db;
pub mod error;
pub mod format;
pub mod history;
pub mod models;
pub mod table;

pub use convert::{
    convert, convert_temperature, convert_temperature_str, ConversionPolicy, Converter,
};
pub use error::{ConvertError, StoreError, TableError};
pub use format::format_result;
pub use history::{HistoryRecorder, HistoryStore, MemoryStore, HISTORY_KEY, HISTORY_LIMIT};
pub use table::UnitTable;
