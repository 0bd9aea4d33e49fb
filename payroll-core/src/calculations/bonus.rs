//! Extra-bonus helpers for Peruvian salaries.
//!
//! A bonus is netted against fifth-category income tax only: the annual tax
//! base of the salary calculation is rebuilt, the bonus is added, and the
//! monthly share of the new annual tax is subtracted from the bonus. Pension
//! contributions are never charged on it.

use rust_decimal::Decimal;
use tracing::debug;

use super::common::{max, round_half_up};
use super::peru::PeruSalaryEngine;
use crate::models::{BonusNet, PeruTaxParameters, SalaryInputs, SalaryResults};

/// Gross amount of a bonus worth `multiple` months of basic salary plus
/// food allowance.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::compute_bonus_gross;
///
/// assert_eq!(compute_bonus_gross(dec!(3000), dec!(500), dec!(1.5)), dec!(5250.00));
/// assert_eq!(compute_bonus_gross(dec!(3000), dec!(0), dec!(0)), dec!(0));
/// ```
pub fn compute_bonus_gross(
    basic_salary: Decimal,
    food_allowance: Decimal,
    multiple: Decimal,
) -> Decimal {
    round_half_up((basic_salary + food_allowance) * multiple)
}

/// Nets bonuses against the parameter set that produced a result.
#[derive(Debug, Clone)]
pub struct BonusCalculator<'a> {
    engine: PeruSalaryEngine<'a>,
}

impl<'a> BonusCalculator<'a> {
    pub fn new(params: &'a PeruTaxParameters) -> Self {
        Self {
            engine: PeruSalaryEngine::new(params),
        }
    }

    /// Computes `bonus_gross` net of the fifth-category tax it causes.
    ///
    /// `results` is only read: the pensionable base and food allowance are
    /// taken from it, the regime and health scheme from `inputs`. The net
    /// bonus is clamped at zero.
    pub fn bonus_net(
        &self,
        inputs: &SalaryInputs,
        results: &SalaryResults,
        bonus_gross: Decimal,
    ) -> BonusNet {
        let pensionable_base = results.basic_salary + results.family_allowance;
        let base_without_bonus = self.engine.annual_tax_base(
            inputs.regime,
            pensionable_base,
            results.food_allowance,
            inputs.health_scheme,
        );

        let tax = self.engine.income_tax(base_without_bonus + bonus_gross);
        let monthly_tax_with_bonus = tax.monthly();
        let bonus_net = round_half_up(max(Decimal::ZERO, bonus_gross - monthly_tax_with_bonus));

        debug!(
            %bonus_gross,
            %bonus_net,
            %monthly_tax_with_bonus,
            "bonus netted against income tax"
        );

        BonusNet {
            bonus_net,
            monthly_tax_with_bonus,
            annual_tax_with_bonus: tax.annual(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::fixtures::peru_2025;
    use crate::models::{HealthScheme, PeruRegime};

    fn inputs(
        basic_salary: Decimal,
        regime: PeruRegime,
    ) -> SalaryInputs {
        SalaryInputs {
            basic_salary,
            food_allowance: dec!(0),
            has_family_allowance: false,
            year: 2025,
            health_scheme: HealthScheme::Essalud,
            regime,
        }
    }

    // =========================================================================
    // compute_bonus_gross tests
    // =========================================================================

    #[test]
    fn compute_bonus_gross_includes_food_allowance() {
        assert_eq!(
            compute_bonus_gross(dec!(3000), dec!(500), dec!(2)),
            dec!(7000.00)
        );
    }

    #[test]
    fn compute_bonus_gross_rounds_fractional_multiples() {
        // 1234.56 * 0.333 = 411.10848
        assert_eq!(
            compute_bonus_gross(dec!(1234.56), dec!(0), dec!(0.333)),
            dec!(411.11)
        );
    }

    // =========================================================================
    // bonus_net tests
    // =========================================================================

    #[test]
    fn bonus_net_standard_regime() {
        let params = peru_2025();
        let inputs = inputs(dec!(3000), PeruRegime::Standard);
        let results = PeruSalaryEngine::new(&params).calculate(&inputs);

        let net = BonusCalculator::new(&params).bonus_net(&inputs, &results, dec!(6000));

        // taxable 48540 - 37450 = 11090 at 8%
        assert_eq!(
            net,
            BonusNet {
                bonus_net: dec!(5926.07),
                monthly_tax_with_bonus: dec!(73.93),
                annual_tax_with_bonus: dec!(887.20),
            }
        );
    }

    #[test]
    fn bonus_net_alternate_regime_uses_bonus_equivalents() {
        let params = peru_2025();
        let inputs = inputs(dec!(3000), PeruRegime::Alternate);
        let results = PeruSalaryEngine::new(&params).calculate(&inputs);

        let net = BonusCalculator::new(&params).bonus_net(&inputs, &results, dec!(6000));

        assert_eq!(net.annual_tax_with_bonus, dec!(887.20));
        assert_eq!(net.bonus_net, dec!(5926.07));
    }

    #[test]
    fn bonus_net_is_never_negative() {
        let params = peru_2025();
        let inputs = inputs(dec!(50000), PeruRegime::Standard);
        let results = PeruSalaryEngine::new(&params).calculate(&inputs);

        let net = BonusCalculator::new(&params).bonus_net(&inputs, &results, dec!(100));

        assert_eq!(net.bonus_net, dec!(0));
        assert!(net.monthly_tax_with_bonus > dec!(100));
    }

    #[test]
    fn bonus_net_of_zero_bonus_matches_salary_tax() {
        let params = peru_2025();
        let mut inputs = inputs(dec!(4200), PeruRegime::Standard);
        inputs.food_allowance = dec!(350);
        inputs.has_family_allowance = true;
        let results = PeruSalaryEngine::new(&params).calculate(&inputs);

        let net = BonusCalculator::new(&params).bonus_net(&inputs, &results, dec!(0));

        assert_eq!(net.bonus_net, dec!(0));
        assert_eq!(net.monthly_tax_with_bonus, results.monthly_income_tax);
        assert_eq!(net.annual_tax_with_bonus, results.annual_income_tax);
    }
}
