//! unitconv: unit conversion with a bounded, persisted history.
//!
//! The pure pieces (unit table, converters, formatting, history policy and
//! the SQLite store) live in `unitconv-core` and are re-exported here. This
//! crate adds configuration, the conversion form service, rendering and the
//! command-line surface.

pub mod cli;
pub mod config;
pub mod render;
pub mod service;

pub use unitconv_core::{calculator, db, models};
pub use unitconv_core::{
    convert, convert_temperature, format_result, ConversionPolicy, ConvertError, Converter,
    HistoryRecorder, HistoryStore, MemoryStore, StoreError, UnitTable, HISTORY_KEY, HISTORY_LIMIT,
};
