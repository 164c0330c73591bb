//! Domain models for unitconv.
//!
//! # Core Concepts
//!
//! - [`Category`]: A family of mutually convertible units (length, mass, ...).
//! - [`UnitDefinition`]: One unit of a category. Linear units carry a factor
//!   relative to the category's base unit; temperature units carry a [`Scale`].
//! - [`ConversionRecord`]: Immutable snapshot of one successful conversion,
//!   kept in the bounded history.

mod category;
mod record;
mod unit;

pub use category::*;
pub use record::*;
pub use unit::*;
