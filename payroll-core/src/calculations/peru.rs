//! Peruvian net-salary calculation.
//!
//! Two regimes share the same skeleton:
//!
//! | Step | Standard | Alternate (RIA) |
//! |------|----------|-----------------|
//! | Pensionable base | basic + family allowance | same |
//! | Monthly gross | pensionable base | base + aliquots, or base × months / 12 |
//! | Pension (AFP) | base × rate + min(base, cap) × extra rate | same, on the pensionable base |
//! | Bonuses | two semiannual bonuses + health bonus | folded into the monthly aliquots |
//! | Income-tax base | (base + food) × 12 + bonuses + health bonus | same, with bonus equivalents |
//! | Income tax | progressive brackets on the base net of the UIT deduction | same |
//!
//! The food allowance is taxable but is reported outside the gross and net
//! figures.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::PeruSalaryEngine;
//! use payroll_core::{
//!     AccrualBasis, HealthBonusRates, HealthScheme, PensionRates, PeruRegime,
//!     PeruTaxParameters, SalaryInputs, UnitBracket,
//! };
//!
//! let params = PeruTaxParameters {
//!     unit_value: dec!(5350),
//!     family_allowance: dec!(113),
//!     health_bonus: HealthBonusRates {
//!         by_scheme: BTreeMap::from([(HealthScheme::Essalud, dec!(0.09))]),
//!         flat_rate: None,
//!     },
//!     pension: PensionRates {
//!         base_rate: dec!(0.10),
//!         extra_rate: dec!(0.0137),
//!         extra_cap: dec!(12234.11),
//!     },
//!     brackets: vec![
//!         UnitBracket { from_units: dec!(0), to_units: Some(dec!(5)), rate: dec!(0.08) },
//!         UnitBracket { from_units: dec!(5), to_units: None, rate: dec!(0.14) },
//!     ],
//!     deduction_units: dec!(7),
//!     accrual_basis: AccrualBasis::Components,
//!     include_health_bonus_equivalent: None,
//! };
//!
//! let inputs = SalaryInputs {
//!     basic_salary: dec!(3000),
//!     food_allowance: dec!(0),
//!     has_family_allowance: false,
//!     year: 2025,
//!     health_scheme: HealthScheme::Essalud,
//!     regime: PeruRegime::Standard,
//! };
//!
//! let results = PeruSalaryEngine::new(&params).calculate(&inputs);
//!
//! assert_eq!(results.pension_deduction, dec!(341.10));
//! assert_eq!(results.monthly_income_tax, dec!(33.93));
//! assert_eq!(results.net_monthly_salary, dec!(2624.97));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use super::brackets::{BracketTax, ProgressiveSchedule};
use super::common::{
    NumberLocale, as_deduction, format_amount, format_percent, format_percent_fixed,
    format_whole_percent, max, round_half_up,
};
use crate::models::{
    AccrualAliquots, AccrualBasis, HealthScheme, LineItem, ParameterYear, PeruRegime,
    PeruTaxParameters, SalaryBreakdown, SalaryInputs, SalaryResults,
};

const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const BONUS_PAYMENTS: Decimal = Decimal::TWO;
const ALIQUOT_DIVISOR: Decimal = Decimal::from_parts(6, 0, 0, false, 0);

const FOOD_ALLOWANCE_LINE: &str = "Vale de alimentos (no remunerativo, fuera de neto)";
const NET_MONTHLY_LINE: &str = "Sueldo neto mensual (sin vale)";
const ANNUAL_GROSS_LINE: &str = "(Bruto mensual sin vale × 12)";
const ANNUAL_FOOD_LINE: &str = "Vale de alimentos (anual)";
const TAXABLE_BASE_LINE: &str = "Base imponible (neta de 7 UIT)";

/// Annual fifth-category income tax for one tax base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IncomeTax {
    /// Tax base before the UIT deduction.
    pub annual_base: Decimal,
    pub deduction: Decimal,
    /// Tax base after the deduction, never negative.
    pub taxable_base: Decimal,
    pub brackets: BracketTax,
}

impl IncomeTax {
    /// Annual tax rounded once for presentation.
    pub fn annual(&self) -> Decimal {
        self.brackets.rounded_total()
    }

    /// Monthly share, rounded from the unrounded annual tax.
    pub fn monthly(&self) -> Decimal {
        round_half_up(self.brackets.total / MONTHS)
    }
}

/// Unrounded accrual aliquots of the alternate regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Aliquots {
    bonus: Decimal,
    extra_bonus: Decimal,
    severance: Decimal,
}

/// Calculator for Peruvian salaries under one resolved parameter set.
#[derive(Debug, Clone)]
pub struct PeruSalaryEngine<'a> {
    params: &'a PeruTaxParameters,
}

impl<'a> PeruSalaryEngine<'a> {
    pub fn new(params: &'a PeruTaxParameters) -> Self {
        Self { params }
    }

    /// Runs the calculation for the regime named in `inputs`.
    ///
    /// The result's `parameter_year` reports `inputs.year` as both requested
    /// and effective; [`crate::PayrollCalculator`] overwrites it when a
    /// fallback year was used.
    pub fn calculate(
        &self,
        inputs: &SalaryInputs,
    ) -> SalaryResults {
        debug!(
            regime = %inputs.regime,
            health_scheme = %inputs.health_scheme,
            year = inputs.year,
            "calculating Peru salary"
        );

        match inputs.regime {
            PeruRegime::Standard => self.calculate_standard(inputs),
            PeruRegime::Alternate => self.calculate_alternate(inputs),
        }
    }

    /// Family allowance applied for the given eligibility.
    fn family_allowance(
        &self,
        has_family_allowance: bool,
    ) -> Decimal {
        if has_family_allowance {
            self.params.family_allowance
        } else {
            Decimal::ZERO
        }
    }

    /// Pension-fund deduction on the pensionable base. The extra rate only
    /// applies up to the configured cap.
    pub fn pension_deduction(
        &self,
        pensionable_base: Decimal,
    ) -> Decimal {
        let pension = &self.params.pension;
        let extra_base = pensionable_base.min(pension.extra_cap);

        round_half_up(pensionable_base * pension.base_rate + extra_base * pension.extra_rate)
    }

    fn health_rate(
        &self,
        scheme: HealthScheme,
    ) -> Decimal {
        self.params.health_bonus.rate_for(scheme)
    }

    /// Health bonus (or its alternate-regime equivalent) on the two
    /// semiannual bonuses.
    fn health_bonus(
        &self,
        regime: PeruRegime,
        pensionable_base: Decimal,
        scheme: HealthScheme,
    ) -> Decimal {
        let applies = match regime {
            PeruRegime::Standard => true,
            PeruRegime::Alternate => self.params.taxes_health_bonus_equivalent(),
        };
        if applies {
            pensionable_base * BONUS_PAYMENTS * self.health_rate(scheme)
        } else {
            Decimal::ZERO
        }
    }

    /// Annual income-tax base before the UIT deduction.
    ///
    /// Both regimes count two semiannual bonuses; the alternate regime uses
    /// them as equivalents of what its monthly aliquots pay out.
    pub(crate) fn annual_tax_base(
        &self,
        regime: PeruRegime,
        pensionable_base: Decimal,
        food_allowance: Decimal,
        scheme: HealthScheme,
    ) -> Decimal {
        (pensionable_base + food_allowance) * MONTHS
            + pensionable_base * BONUS_PAYMENTS
            + self.health_bonus(regime, pensionable_base, scheme)
    }

    /// Applies the UIT deduction and the progressive brackets.
    pub(crate) fn income_tax(
        &self,
        annual_base: Decimal,
    ) -> IncomeTax {
        let deduction = self.params.deduction_amount();
        let taxable_base = max(Decimal::ZERO, annual_base - deduction);
        let brackets = ProgressiveSchedule::new(
            &self.params.brackets,
            self.params.unit_value,
            NumberLocale::Peru,
        )
        .calculate(taxable_base);

        IncomeTax {
            annual_base,
            deduction,
            taxable_base,
            brackets,
        }
    }

    fn aliquots(
        &self,
        pensionable_base: Decimal,
        health_rate: Decimal,
    ) -> Aliquots {
        let bonus = pensionable_base / ALIQUOT_DIVISOR;
        let extra_bonus = if self.params.pays_extra_bonus_aliquot() {
            pensionable_base * health_rate / ALIQUOT_DIVISOR
        } else {
            Decimal::ZERO
        };
        let severance = (pensionable_base + bonus) / MONTHS;

        Aliquots {
            bonus,
            extra_bonus,
            severance,
        }
    }

    /// Unrounded monthly gross of the alternate regime.
    fn accrual_gross(
        &self,
        pensionable_base: Decimal,
        aliquots: &Aliquots,
    ) -> Decimal {
        match &self.params.accrual_basis {
            AccrualBasis::Components => {
                pensionable_base + aliquots.bonus + aliquots.extra_bonus + aliquots.severance
            }
            AccrualBasis::MonthMultiplier {
                bonus_months,
                severance_months,
            } => pensionable_base * (MONTHS + bonus_months + severance_months) / MONTHS,
        }
    }

    fn pension_formula(&self) -> String {
        let pension = &self.params.pension;
        format!(
            "{}% + SISCO {}% (tope S/ {}) sobre baseSF",
            format_percent_fixed(pension.base_rate),
            format_percent_fixed(pension.extra_rate),
            format_amount(pension.extra_cap, NumberLocale::Peru),
        )
    }

    fn deduction_label(&self) -> String {
        format!(
            "Deducción {} UIT",
            format_amount(self.params.deduction_units, NumberLocale::Peru)
        )
    }

    fn calculate_standard(
        &self,
        inputs: &SalaryInputs,
    ) -> SalaryResults {
        let family_allowance = self.family_allowance(inputs.has_family_allowance);
        let pensionable_base = inputs.basic_salary + family_allowance;
        let gross_monthly = pensionable_base;
        let pension = self.pension_deduction(pensionable_base);

        let july_bonus = pensionable_base;
        let christmas_bonus = pensionable_base;
        let total_bonuses = july_bonus + christmas_bonus;
        let health_rate = self.health_rate(inputs.health_scheme);
        let health_bonus = self.health_bonus(
            PeruRegime::Standard,
            pensionable_base,
            inputs.health_scheme,
        );

        let tax = self.income_tax(self.annual_tax_base(
            PeruRegime::Standard,
            pensionable_base,
            inputs.food_allowance,
            inputs.health_scheme,
        ));
        let monthly_tax = tax.monthly();
        let net_monthly = round_half_up(gross_monthly - pension - monthly_tax);

        let annual_gross = gross_monthly * MONTHS;
        let annual_pension = pension * MONTHS;
        let annual_food = inputs.food_allowance * MONTHS;
        let total_annual = annual_gross + total_bonuses + health_bonus;

        let mut monthly = vec![LineItem::new("1", "Sueldo básico", inputs.basic_salary)];
        if inputs.has_family_allowance {
            monthly.push(LineItem::new("2", "Asignación familiar", family_allowance));
        }
        monthly.extend([
            LineItem::new("3", "Sueldo bruto mensual (sin vale)", gross_monthly)
                .with_formula("Básico + Familiar"),
            LineItem::new("4", FOOD_ALLOWANCE_LINE, inputs.food_allowance),
            LineItem::new("5", "Descuento AFP", as_deduction(pension))
                .with_formula(self.pension_formula()),
            LineItem::new("6", "Impuesto 5ta categoría (mensual)", as_deduction(monthly_tax))
                .with_formula("Impuesto anual ÷ 12"),
            LineItem::new("7", NET_MONTHLY_LINE, net_monthly),
        ]);

        let annual = vec![
            LineItem::new("1", ANNUAL_GROSS_LINE, round_half_up(annual_gross)),
            LineItem::new("2", "Gratificación julio", round_half_up(july_bonus)),
            LineItem::new("3", "Gratificación diciembre", round_half_up(christmas_bonus)),
            LineItem::new(
                "4",
                format!("Bono salud ({})", inputs.health_scheme),
                round_half_up(health_bonus),
            )
            .with_formula(format!(
                "({}) × {}%",
                format_amount(total_bonuses, NumberLocale::Peru),
                format_percent(health_rate)
            )),
            LineItem::new("5", ANNUAL_FOOD_LINE, round_half_up(annual_food)),
            LineItem::new("6", "Total base anual para 5ta", round_half_up(tax.annual_base)),
            LineItem::new("7", self.deduction_label(), as_deduction(tax.deduction)).with_formula(
                format!(
                    "{} × S/ {}",
                    format_amount(self.params.deduction_units, NumberLocale::Peru),
                    format_amount(self.params.unit_value, NumberLocale::Peru)
                ),
            ),
            LineItem::new("8", TAXABLE_BASE_LINE, round_half_up(tax.taxable_base)),
            LineItem::new("9", "Impuesto 5ta categoría anual", tax.annual())
                .with_formula("Tramos progresivos en UIT"),
        ];

        SalaryResults {
            regime: PeruRegime::Standard,
            health_scheme: inputs.health_scheme,
            parameter_year: ParameterYear::exact(inputs.year),
            basic_salary: inputs.basic_salary,
            food_allowance: inputs.food_allowance,
            family_allowance,
            gross_monthly_salary: round_half_up(gross_monthly),
            pension_deduction: pension,
            monthly_income_tax: monthly_tax,
            net_monthly_salary: net_monthly,
            annual_gross_income: round_half_up(annual_gross),
            july_bonus: round_half_up(july_bonus),
            christmas_bonus: round_half_up(christmas_bonus),
            health_bonus: round_half_up(health_bonus),
            total_annual_income: round_half_up(total_annual),
            annual_food_allowance: round_half_up(annual_food),
            annual_pension_deduction: round_half_up(annual_pension),
            annual_income_tax: tax.annual(),
            net_annual_salary: round_half_up(annual_gross - annual_pension - tax.brackets.total),
            net_annual_income: round_half_up(total_annual - annual_pension - tax.brackets.total),
            accrual_aliquots: None,
            breakdown: SalaryBreakdown {
                monthly,
                annual,
                income_tax_brackets: tax.brackets.lines,
            },
        }
    }

    fn calculate_alternate(
        &self,
        inputs: &SalaryInputs,
    ) -> SalaryResults {
        let family_allowance = self.family_allowance(inputs.has_family_allowance);
        let pensionable_base = inputs.basic_salary + family_allowance;
        let health_rate = self.health_rate(inputs.health_scheme);
        let aliquots = self.aliquots(pensionable_base, health_rate);
        let gross_monthly = self.accrual_gross(pensionable_base, &aliquots);
        let pension = self.pension_deduction(pensionable_base);

        let tax = self.income_tax(self.annual_tax_base(
            PeruRegime::Alternate,
            pensionable_base,
            inputs.food_allowance,
            inputs.health_scheme,
        ));
        let monthly_tax = tax.monthly();
        let net_monthly = round_half_up(gross_monthly - pension - monthly_tax);

        let annual_gross = gross_monthly * MONTHS;
        let annual_pension = pension * MONTHS;
        let annual_food = inputs.food_allowance * MONTHS;
        let net_annual = round_half_up(annual_gross - annual_pension - tax.brackets.total);

        let monthly = vec![
            LineItem::new("1", "Base pensionable (baseSF)", pensionable_base),
            LineItem::new(
                "2",
                "Alícuota Gratificación (baseSF/6)",
                round_half_up(aliquots.bonus),
            )
            .with_formula("baseSF / 6"),
            LineItem::new(
                "3",
                format!("Alícuota Bono Extraord. ({})", format_whole_percent(health_rate)),
                round_half_up(aliquots.extra_bonus),
            )
            .with_formula("(baseSF × tasa) / 6"),
            LineItem::new(
                "4",
                "Alícuota CTS ((baseSF + baseSF/6)/12)",
                round_half_up(aliquots.severance),
            )
            .with_formula("(baseSF + baseSF/6) / 12"),
            LineItem::new(
                "5",
                "Cuota RIA pensionable (bruto sin vale)",
                round_half_up(gross_monthly),
            ),
            LineItem::new("6", FOOD_ALLOWANCE_LINE, inputs.food_allowance),
            LineItem::new("7", "Descuento AFP", as_deduction(pension))
                .with_formula(self.pension_formula()),
            LineItem::new("8", "Impuesto 5ta (mensual)", as_deduction(monthly_tax))
                .with_formula("Impuesto anual ÷ 12"),
            LineItem::new("9", NET_MONTHLY_LINE, net_monthly),
        ];

        let annual = vec![
            LineItem::new("1", ANNUAL_GROSS_LINE, round_half_up(annual_gross)),
            LineItem::new("2", ANNUAL_FOOD_LINE, round_half_up(annual_food)),
            LineItem::new("3", "Base anual para 5ta", round_half_up(tax.annual_base)),
            LineItem::new("4", self.deduction_label(), as_deduction(tax.deduction)),
            LineItem::new("5", TAXABLE_BASE_LINE, round_half_up(tax.taxable_base)),
            LineItem::new("6", "Impuesto 5ta anual", tax.annual()),
        ];

        SalaryResults {
            regime: PeruRegime::Alternate,
            health_scheme: inputs.health_scheme,
            parameter_year: ParameterYear::exact(inputs.year),
            basic_salary: inputs.basic_salary,
            food_allowance: inputs.food_allowance,
            family_allowance,
            gross_monthly_salary: round_half_up(gross_monthly),
            pension_deduction: pension,
            monthly_income_tax: monthly_tax,
            net_monthly_salary: net_monthly,
            annual_gross_income: round_half_up(annual_gross),
            july_bonus: Decimal::ZERO,
            christmas_bonus: Decimal::ZERO,
            health_bonus: Decimal::ZERO,
            total_annual_income: round_half_up(annual_gross),
            annual_food_allowance: round_half_up(annual_food),
            annual_pension_deduction: round_half_up(annual_pension),
            annual_income_tax: tax.annual(),
            net_annual_salary: net_annual,
            net_annual_income: net_annual,
            accrual_aliquots: Some(AccrualAliquots {
                pensionable_base,
                bonus_aliquot: round_half_up(aliquots.bonus),
                extra_bonus_aliquot: round_half_up(aliquots.extra_bonus),
                severance_aliquot: round_half_up(aliquots.severance),
                health_rate_label: format!("{}%", format_percent(health_rate)),
            }),
            breakdown: SalaryBreakdown {
                monthly,
                annual,
                income_tax_brackets: tax.brackets.lines,
            },
        }
    }
}
