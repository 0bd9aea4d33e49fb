use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::breakdown::SalaryBreakdown;
use super::regime::{HealthScheme, PeruRegime};

/// The parameter year that was requested and the one actually used.
///
/// They differ when the requested year had no parameters and the latest
/// populated year was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterYear {
    pub requested: i32,
    pub effective: i32,
}

impl ParameterYear {
    pub fn exact(year: i32) -> Self {
        Self {
            requested: year,
            effective: year,
        }
    }

    pub fn is_substituted(&self) -> bool {
        self.requested != self.effective
    }
}

/// Monthly accrual aliquots of the alternate regime, kept for audit display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualAliquots {
    pub pensionable_base: Decimal,
    pub bonus_aliquot: Decimal,
    pub extra_bonus_aliquot: Decimal,
    pub severance_aliquot: Decimal,
    /// Health rate used for the extra-bonus aliquot, e.g. `"9%"`.
    pub health_rate_label: String,
}

/// Result of a Peruvian salary calculation.
///
/// Gross and net figures exclude the food allowance; it is reported
/// separately and only enters the income-tax base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryResults {
    pub regime: PeruRegime,
    pub health_scheme: HealthScheme,
    pub parameter_year: ParameterYear,

    // Inputs
    pub basic_salary: Decimal,
    pub food_allowance: Decimal,
    /// Family allowance actually applied (zero when not eligible).
    pub family_allowance: Decimal,

    // Monthly
    pub gross_monthly_salary: Decimal,
    /// Pension-fund (AFP) deduction.
    pub pension_deduction: Decimal,
    /// Monthly share of the fifth-category income tax.
    pub monthly_income_tax: Decimal,
    pub net_monthly_salary: Decimal,

    // Annual
    pub annual_gross_income: Decimal,
    pub july_bonus: Decimal,
    pub christmas_bonus: Decimal,
    pub health_bonus: Decimal,
    pub total_annual_income: Decimal,
    pub annual_food_allowance: Decimal,
    pub annual_pension_deduction: Decimal,
    pub annual_income_tax: Decimal,
    /// Twelve monthly salaries net of pension and annual income tax.
    pub net_annual_salary: Decimal,
    /// Total annual income, bonuses included, net of pension and annual
    /// income tax.
    pub net_annual_income: Decimal,

    /// Present for the alternate regime only.
    pub accrual_aliquots: Option<AccrualAliquots>,

    pub breakdown: SalaryBreakdown,
}

/// Result of an Ecuadorian salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcuadorSalaryResults {
    pub parameter_year: ParameterYear,

    // Monthly
    pub gross_monthly_salary: Decimal,
    /// Thirteenth-salary bonus, mensualized.
    pub decimo_third_monthly: Decimal,
    /// Fourth-salary bonus, mensualized.
    pub decimo_fourth_monthly: Decimal,
    pub reserve_fund_monthly: Decimal,
    /// Employee social-security (IESS) withholding.
    pub social_security_withholding: Decimal,
    pub monthly_income_tax: Decimal,
    /// Net monthly pay in the first year of employment (no reserve fund).
    pub net_monthly_salary: Decimal,
    /// Net monthly pay from the second year, reserve fund included.
    pub net_monthly_salary_year2: Decimal,

    // Annual
    pub gross_annual_12: Decimal,
    pub gross_annual_13: Decimal,
    pub decimo_third_annual: Decimal,
    pub decimo_fourth_annual: Decimal,
    pub reserve_fund_annual: Decimal,
    pub annual_social_security: Decimal,
    /// Income tax from the bracket table, before the personal-expense rebate.
    pub income_tax_before_deduction: Decimal,
    pub annual_income_tax: Decimal,
    pub total_annual_income: Decimal,
    pub net_annual_salary: Decimal,
    pub employer_annual_cost: Decimal,

    pub breakdown: SalaryBreakdown,
}

/// A bonus net of fifth-category tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusNet {
    pub bonus_net: Decimal,
    pub monthly_tax_with_bonus: Decimal,
    pub annual_tax_with_bonus: Decimal,
}
