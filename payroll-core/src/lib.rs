pub mod calculations;
pub mod calculator;
pub mod models;
pub mod params;

#[cfg(test)]
mod fixtures;

pub use calculator::{EcuadorParameterTable, PayrollCalculator, PeruParameterTable};
pub use models::*;
pub use params::{
    ConfigurationError, ParameterObserver, ParameterTable, TaxParameters, TracingObserver,
};
