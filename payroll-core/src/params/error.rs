use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Jurisdiction;

/// Errors caused by missing or malformed regulatory parameters.
///
/// These indicate a deployment defect, not bad user input, and are never
/// retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No year has parameters for the regime.
    #[error("no parameters loaded for regime {regime} ({jurisdiction})")]
    NoParameters {
        jurisdiction: Jurisdiction,
        regime: String,
    },

    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: Decimal },

    #[error("{field} must be positive, got {value}")]
    NonPositiveValue { field: &'static str, value: Decimal },

    #[error("no tax brackets configured")]
    NoBrackets,

    #[error("first tax bracket must start at 0, got {0}")]
    FirstBracketNotAtZero(Decimal),

    #[error("tax bracket {index} starts at {from} but the previous bracket ends at {previous_to}")]
    NonContiguousBrackets {
        index: usize,
        from: Decimal,
        previous_to: Decimal,
    },

    #[error("tax bracket {index} upper bound {to} is not above its lower bound {from}")]
    EmptyBracket {
        index: usize,
        from: Decimal,
        to: Decimal,
    },

    #[error("only the last tax bracket may be unbounded, bracket {0} is unbounded")]
    UnboundedBracketBeforeLast(usize),

    #[error("last tax bracket must be unbounded")]
    BoundedLastBracket,

    /// Wraps a validation failure with the entry it was found in.
    #[error("invalid parameters for {jurisdiction} {regime} {year}: {source}")]
    InvalidEntry {
        jurisdiction: Jurisdiction,
        regime: String,
        year: i32,
        #[source]
        source: Box<ConfigurationError>,
    },
}
