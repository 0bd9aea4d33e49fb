//! Ecuadorian net-salary calculation.
//!
//! Monthly pay adds the thirteenth and fourth salaries (mensualized) to the
//! gross salary and withholds the employee IESS contribution and income
//! tax. The reserve fund is reported separately: employers may retain it
//! during the first year of employment, so it only enters net pay from the
//! second year on.
//!
//! Income tax comes from the published "fixed amount plus rate on excess"
//! table applied to gross × 12 less the annual IESS withholding, reduced by
//! the personal-expense rebate and clamped at zero.

use rust_decimal::Decimal;
use tracing::debug;

use super::brackets::FixedAmountSchedule;
use super::common::{NumberLocale, as_deduction, format_percent, max, round_half_up};
use crate::models::{
    EcuadorSalaryInputs, EcuadorSalaryResults, EcuadorTaxParameters, LineItem, ParameterYear,
    SalaryBreakdown,
};

const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const PAID_SALARIES: Decimal = Decimal::from_parts(13, 0, 0, false, 0);

/// Calculator for Ecuadorian salaries under one resolved parameter set.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::EcuadorSalaryEngine;
/// use payroll_core::{EcuadorSalaryInputs, EcuadorTaxParameters, FixedAmountBracket};
///
/// let params = EcuadorTaxParameters {
///     basic_unified_salary: dec!(470),
///     reserve_fund_rate: dec!(0.0833),
///     social_security_rate: dec!(0.0945),
///     brackets: vec![
///         FixedAmountBracket { from: dec!(0), to: Some(dec!(12081)), fixed: dec!(0), rate: dec!(0) },
///         FixedAmountBracket { from: dec!(12081), to: None, fixed: dec!(0), rate: dec!(0.05) },
///     ],
///     personal_expenses_deduction: dec!(0),
/// };
///
/// let inputs = EcuadorSalaryInputs { gross_monthly_salary: dec!(1000), year: 2025 };
/// let results = EcuadorSalaryEngine::new(&params).calculate(&inputs);
///
/// assert_eq!(results.net_monthly_salary, dec!(1028.00));
/// assert_eq!(results.net_monthly_salary_year2, dec!(1111.30));
/// ```
#[derive(Debug, Clone)]
pub struct EcuadorSalaryEngine<'a> {
    params: &'a EcuadorTaxParameters,
}

impl<'a> EcuadorSalaryEngine<'a> {
    pub fn new(params: &'a EcuadorTaxParameters) -> Self {
        Self { params }
    }

    pub fn calculate(
        &self,
        inputs: &EcuadorSalaryInputs,
    ) -> EcuadorSalaryResults {
        debug!(year = inputs.year, "calculating Ecuador salary");

        let gross = inputs.gross_monthly_salary;
        let decimo_third = gross / MONTHS;
        let decimo_fourth = self.params.basic_unified_salary / MONTHS;
        let reserve_fund = gross * self.params.reserve_fund_rate;
        let reserve_fund_annual = reserve_fund * MONTHS;
        let social_security = gross * self.params.social_security_rate;

        let tax_base = self.annual_tax_base(gross, social_security);
        let tax = FixedAmountSchedule::new(&self.params.brackets, NumberLocale::Ecuador)
            .calculate(tax_base);
        let tax_before_deduction = tax.rounded_total();
        let annual_tax = self.apply_personal_expenses(tax_before_deduction);
        let monthly_tax = annual_tax / MONTHS;

        let net_monthly = gross + decimo_third + decimo_fourth - social_security - monthly_tax;
        let net_monthly_year2 = net_monthly + reserve_fund;
        let net_annual = net_monthly * MONTHS + reserve_fund_annual;

        let gross_annual_13 = gross * PAID_SALARIES;
        let employer_cost = gross_annual_13 + decimo_fourth * MONTHS + reserve_fund_annual;
        let total_annual_income =
            gross * MONTHS + decimo_third * MONTHS + decimo_fourth * MONTHS + reserve_fund_annual;

        let monthly = vec![
            LineItem::new("1", "Salario base", gross),
            LineItem::new("2", "Décimo tercero (mensualizado)", round_half_up(decimo_third))
                .with_formula("SB / 12"),
            LineItem::new("3", "Décimo cuarto (mensualizado)", round_half_up(decimo_fourth))
                .with_formula("SBU / 12"),
            LineItem::new(
                "4",
                format!(
                    "IESS personal ({}%)",
                    format_percent(self.params.social_security_rate)
                ),
                as_deduction(round_half_up(social_security)),
            ),
            LineItem::new(
                "5",
                "Impuesto a la Renta (mensual)",
                as_deduction(round_half_up(monthly_tax)),
            ),
            LineItem::new("6", "Neto mensual (Año 1)", round_half_up(net_monthly)),
            LineItem::new(
                "7",
                "Fondo de reserva (desde Año 2)",
                round_half_up(reserve_fund),
            ),
        ];

        let annual = vec![
            LineItem::new("1", "Sueldo bruto × 13", round_half_up(gross_annual_13)),
            LineItem::new(
                "2",
                "Décimo cuarto anual",
                round_half_up(decimo_fourth * MONTHS),
            ),
            LineItem::new(
                "3",
                "Fondo de reserva anual",
                round_half_up(reserve_fund_annual),
            ),
            LineItem::new("4", "Costo anual total empresa", round_half_up(employer_cost)),
            LineItem::new("5", "Neto anual equivalente", round_half_up(net_annual)),
        ];

        EcuadorSalaryResults {
            parameter_year: ParameterYear::exact(inputs.year),
            gross_monthly_salary: round_half_up(gross),
            decimo_third_monthly: round_half_up(decimo_third),
            decimo_fourth_monthly: round_half_up(decimo_fourth),
            reserve_fund_monthly: round_half_up(reserve_fund),
            social_security_withholding: round_half_up(social_security),
            monthly_income_tax: round_half_up(monthly_tax),
            net_monthly_salary: round_half_up(net_monthly),
            net_monthly_salary_year2: round_half_up(net_monthly_year2),
            gross_annual_12: round_half_up(gross * MONTHS),
            gross_annual_13: round_half_up(gross_annual_13),
            decimo_third_annual: round_half_up(decimo_third * MONTHS),
            decimo_fourth_annual: round_half_up(decimo_fourth * MONTHS),
            reserve_fund_annual: round_half_up(reserve_fund_annual),
            annual_social_security: round_half_up(social_security * MONTHS),
            income_tax_before_deduction: tax_before_deduction,
            annual_income_tax: round_half_up(annual_tax),
            total_annual_income: round_half_up(total_annual_income),
            net_annual_salary: round_half_up(net_annual),
            employer_annual_cost: round_half_up(employer_cost),
            breakdown: SalaryBreakdown {
                monthly,
                annual,
                income_tax_brackets: tax.lines,
            },
        }
    }

    /// Gross × 12 less the annual IESS withholding. The thirteenth and
    /// fourth salaries stay outside the base.
    fn annual_tax_base(
        &self,
        gross_monthly: Decimal,
        social_security_monthly: Decimal,
    ) -> Decimal {
        gross_monthly * MONTHS - social_security_monthly * MONTHS
    }

    fn apply_personal_expenses(
        &self,
        annual_tax: Decimal,
    ) -> Decimal {
        max(
            Decimal::ZERO,
            annual_tax - self.params.personal_expenses_deduction,
        )
    }
}
