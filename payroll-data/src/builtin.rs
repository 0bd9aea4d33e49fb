//! Parameter documents compiled into the binary.

use payroll_core::{EcuadorParameterTable, PayrollCalculator, PeruParameterTable};

use crate::loader::{ParameterLoadError, ParameterLoader};

/// Peruvian parameters for 2023–2026 (`NORMAL` and `RIA`).
pub const BUILTIN_PERU_JSON: &str = include_str!("../data/peru.json");

/// Ecuadorian parameters for 2024–2026.
pub const BUILTIN_ECUADOR_JSON: &str = include_str!("../data/ecuador.json");

pub fn builtin_peru() -> Result<PeruParameterTable, ParameterLoadError> {
    ParameterLoader::peru_from_str(BUILTIN_PERU_JSON)
}

pub fn builtin_ecuador() -> Result<EcuadorParameterTable, ParameterLoadError> {
    ParameterLoader::ecuador_from_str(BUILTIN_ECUADOR_JSON)
}

/// A calculator over both built-in documents, reporting year substitutions
/// through `tracing`.
pub fn builtin_calculator() -> Result<PayrollCalculator, ParameterLoadError> {
    Ok(PayrollCalculator::new(builtin_peru()?, builtin_ecuador()?))
}
