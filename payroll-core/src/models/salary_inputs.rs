use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::regime::{HealthScheme, PeruRegime};

/// Inputs for a Peruvian salary calculation.
///
/// Amounts are expected to be finite and non-negative; callers coerce
/// free-form numeric text before building this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInputs {
    /// Monthly basic salary.
    pub basic_salary: Decimal,

    /// Monthly food allowance. Not pensionable and not part of the
    /// reported gross/net figures, but taxable.
    pub food_allowance: Decimal,

    /// Whether the flat family allowance is paid.
    pub has_family_allowance: bool,

    /// Year whose regulatory parameters apply.
    pub year: i32,

    pub health_scheme: HealthScheme,

    pub regime: PeruRegime,
}

/// Inputs for an Ecuadorian salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcuadorSalaryInputs {
    /// Monthly gross salary.
    pub gross_monthly_salary: Decimal,

    pub year: i32,
}
