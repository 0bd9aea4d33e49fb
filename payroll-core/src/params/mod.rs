//! Year-and-regime indexed regulatory parameters.
//!
//! A [`ParameterTable`] is filled once at startup, validated on insert, and
//! only read afterwards. Lookups go through [`ParameterTable::resolve`],
//! which substitutes the latest populated year when the requested year has
//! no data and reports the substitution to a [`ParameterObserver`].

mod error;
mod resolver;
mod table;
pub(crate) mod validation;

pub use error::ConfigurationError;
pub use resolver::{ParameterObserver, Resolved, TracingObserver};
pub use table::{ParameterTable, TaxParameters};
