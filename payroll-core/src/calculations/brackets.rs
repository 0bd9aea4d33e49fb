//! Income-tax bracket calculators.
//!
//! Two bracket forms are supported:
//!
//! - [`ProgressiveSchedule`]: marginal brackets expressed in multiples of a
//!   unit value. Each bracket taxes the slice of the base that falls inside
//!   it, and every non-empty slice produces one itemization line.
//! - [`FixedAmountSchedule`]: a published table where the single bracket
//!   containing the base yields `fixed + (base - from) * rate`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::UnitBracket;
//! use payroll_core::calculations::ProgressiveSchedule;
//! use payroll_core::calculations::common::NumberLocale;
//!
//! let brackets = vec![
//!     UnitBracket { from_units: dec!(0), to_units: Some(dec!(5)), rate: dec!(0.08) },
//!     UnitBracket { from_units: dec!(5), to_units: None, rate: dec!(0.14) },
//! ];
//!
//! let schedule = ProgressiveSchedule::new(&brackets, dec!(5350), NumberLocale::Peru);
//! let tax = schedule.calculate(dec!(30000));
//!
//! // 26,750 at 8% + 3,250 at 14%
//! assert_eq!(tax.rounded_total(), dec!(2595.00));
//! assert_eq!(tax.lines.len(), 2);
//! ```

use rust_decimal::Decimal;

use super::common::{NumberLocale, format_amount, format_whole_percent, max, round_half_up};
use crate::models::{FixedAmountBracket, LineItem, UnitBracket};

/// Total tax and per-bracket itemization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTax {
    /// Unrounded total; callers round it once where they present it.
    pub total: Decimal,
    /// One line per bracket that taxed a non-zero slice. Amounts are
    /// rounded to cents.
    pub lines: Vec<LineItem>,
}

impl BracketTax {
    pub fn zero() -> Self {
        Self {
            total: Decimal::ZERO,
            lines: Vec::new(),
        }
    }

    pub fn rounded_total(&self) -> Decimal {
        round_half_up(self.total)
    }
}

fn bracket_line(
    rate: Decimal,
    from: Decimal,
    to: Option<Decimal>,
    amount: Decimal,
    locale: NumberLocale,
) -> LineItem {
    let prefix = locale.currency_prefix();
    let upper = match to {
        Some(to) => format!("{prefix}{}", format_amount(to, locale)),
        None => "∞".to_string(),
    };
    let percent = format_whole_percent(rate);

    LineItem::new(
        format!("Tramo {percent}"),
        format!("{prefix}{} - {upper}", format_amount(from, locale)),
        round_half_up(amount),
    )
    .with_formula(percent)
}

/// Progressive marginal brackets indexed by a unit value.
#[derive(Debug, Clone)]
pub struct ProgressiveSchedule<'a> {
    brackets: &'a [UnitBracket],
    unit_value: Decimal,
    locale: NumberLocale,
}

impl<'a> ProgressiveSchedule<'a> {
    /// Brackets must be sorted ascending; the last one is treated as
    /// unbounded.
    pub fn new(
        brackets: &'a [UnitBracket],
        unit_value: Decimal,
        locale: NumberLocale,
    ) -> Self {
        Self {
            brackets,
            unit_value,
            locale,
        }
    }

    /// Taxes `taxable_base` slice by slice, stopping once it is exhausted.
    pub fn calculate(
        &self,
        taxable_base: Decimal,
    ) -> BracketTax {
        let mut total = Decimal::ZERO;
        let mut remaining = taxable_base;
        let mut lines = Vec::new();
        let last = self.brackets.len().saturating_sub(1);

        for (index, bracket) in self.brackets.iter().enumerate() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let from = bracket.from_amount(self.unit_value);
            let to = if index == last {
                None
            } else {
                bracket.to_amount(self.unit_value)
            };
            let width = match to {
                Some(to) => max(Decimal::ZERO, remaining.min(to - from)),
                None => remaining,
            };
            if width <= Decimal::ZERO {
                continue;
            }

            let tax_here = width * bracket.rate;
            total += tax_here;
            remaining -= width;

            lines.push(bracket_line(bracket.rate, from, to, tax_here, self.locale));
        }

        BracketTax { total, lines }
    }
}

/// "Fixed amount plus marginal rate on the excess" brackets.
#[derive(Debug, Clone)]
pub struct FixedAmountSchedule<'a> {
    brackets: &'a [FixedAmountBracket],
    locale: NumberLocale,
}

impl<'a> FixedAmountSchedule<'a> {
    pub fn new(
        brackets: &'a [FixedAmountBracket],
        locale: NumberLocale,
    ) -> Self {
        Self { brackets, locale }
    }

    /// Taxes `base` with the bracket whose `[from, to)` range contains it.
    ///
    /// Returns zero tax and no itemization when no bracket matches, which
    /// only happens with a table whose last bracket is bounded.
    pub fn calculate(
        &self,
        base: Decimal,
    ) -> BracketTax {
        let Some(bracket) = self.brackets.iter().find(|b| b.contains(base)) else {
            return BracketTax::zero();
        };

        let total = round_half_up(bracket.fixed + (base - bracket.from) * bracket.rate);
        let line = bracket_line(bracket.rate, bracket.from, bracket.to, total, self.locale);

        BracketTax {
            total,
            lines: vec![line],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn peru_brackets() -> Vec<UnitBracket> {
        vec![
            UnitBracket {
                from_units: dec!(0),
                to_units: Some(dec!(5)),
                rate: dec!(0.08),
            },
            UnitBracket {
                from_units: dec!(5),
                to_units: Some(dec!(20)),
                rate: dec!(0.14),
            },
            UnitBracket {
                from_units: dec!(20),
                to_units: Some(dec!(35)),
                rate: dec!(0.17),
            },
            UnitBracket {
                from_units: dec!(35),
                to_units: Some(dec!(45)),
                rate: dec!(0.20),
            },
            UnitBracket {
                from_units: dec!(45),
                to_units: None,
                rate: dec!(0.30),
            },
        ]
    }

    fn ecuador_brackets() -> Vec<FixedAmountBracket> {
        vec![
            FixedAmountBracket {
                from: dec!(0),
                to: Some(dec!(12081)),
                fixed: dec!(0),
                rate: dec!(0),
            },
            FixedAmountBracket {
                from: dec!(12081),
                to: Some(dec!(15387)),
                fixed: dec!(0),
                rate: dec!(0.05),
            },
            FixedAmountBracket {
                from: dec!(15387),
                to: Some(dec!(19978)),
                fixed: dec!(165),
                rate: dec!(0.10),
            },
            FixedAmountBracket {
                from: dec!(19978),
                to: Some(dec!(26422)),
                fixed: dec!(624),
                rate: dec!(0.12),
            },
            FixedAmountBracket {
                from: dec!(26422),
                to: None,
                fixed: dec!(1398),
                rate: dec!(0.15),
            },
        ]
    }

    // =========================================================================
    // ProgressiveSchedule tests
    // =========================================================================

    #[test]
    fn progressive_zero_base_has_no_tax_and_no_lines() {
        let brackets = peru_brackets();
        let schedule = ProgressiveSchedule::new(&brackets, dec!(5350), NumberLocale::Peru);

        let tax = schedule.calculate(dec!(0));

        assert_eq!(tax, BracketTax::zero());
    }

    #[test]
    fn progressive_first_bracket_only() {
        let brackets = peru_brackets();
        let schedule = ProgressiveSchedule::new(&brackets, dec!(5350), NumberLocale::Peru);

        let tax = schedule.calculate(dec!(5090));

        assert_eq!(tax.total, dec!(407.20));
        assert_eq!(
            tax.lines,
            vec![LineItem::new("Tramo 8%", "S/ 0 - S/ 26,750", dec!(407.20)).with_formula("8%")]
        );
    }

    #[test]
    fn progressive_spans_two_brackets() {
        let brackets = peru_brackets();
        let schedule = ProgressiveSchedule::new(&brackets, dec!(5350), NumberLocale::Peru);

        let tax = schedule.calculate(dec!(100000));

        // 26750 * 0.08 = 2140, 73250 * 0.14 = 10255
        assert_eq!(tax.rounded_total(), dec!(12395.00));
        assert_eq!(tax.lines.len(), 2);
        assert_eq!(tax.lines[1].step, "Tramo 14%");
        assert_eq!(tax.lines[1].description, "S/ 26,750 - S/ 107,000");
        assert_eq!(tax.lines[1].amount, dec!(10255.00));
    }

    #[test]
    fn progressive_reaches_top_bracket() {
        let brackets = peru_brackets();
        let schedule = ProgressiveSchedule::new(&brackets, dec!(5350), NumberLocale::Peru);

        let tax = schedule.calculate(dec!(300000));

        // 2140 + 11235 + 13642.50 + 10700 + 59250 * 0.30
        assert_eq!(tax.rounded_total(), dec!(55492.50));
        assert_eq!(tax.lines.len(), 5);
        assert_eq!(tax.lines[4].description, "S/ 240,750 - ∞");
        assert_eq!(tax.lines[4].amount, dec!(17775.00));
    }

    #[test]
    fn progressive_last_bracket_is_unbounded_even_if_configured_bounded() {
        let mut brackets = peru_brackets();
        brackets[4].to_units = Some(dec!(50));
        let schedule = ProgressiveSchedule::new(&brackets, dec!(5350), NumberLocale::Peru);

        let tax = schedule.calculate(dec!(300000));

        assert_eq!(tax.rounded_total(), dec!(55492.50));
    }

    #[test]
    fn progressive_itemization_sums_to_total() {
        let brackets = peru_brackets();
        let schedule = ProgressiveSchedule::new(&brackets, dec!(5350), NumberLocale::Peru);

        for base in [dec!(1), dec!(26750), dec!(26750.01), dec!(123456.78), dec!(987654.32)] {
            let tax = schedule.calculate(base);
            let itemized: Decimal = tax.lines.iter().map(|l| l.amount).sum();

            assert!(
                (itemized - tax.rounded_total()).abs() <= dec!(0.01),
                "itemization {itemized} does not match total {} for base {base}",
                tax.rounded_total()
            );
        }
    }

    #[test]
    fn progressive_is_monotonic() {
        let brackets = peru_brackets();
        let schedule = ProgressiveSchedule::new(&brackets, dec!(5350), NumberLocale::Peru);

        let mut previous = Decimal::ZERO;
        let mut base = Decimal::ZERO;
        while base <= dec!(400000) {
            let tax = schedule.calculate(base).total;
            assert!(tax >= previous, "tax decreased at base {base}");
            previous = tax;
            base += dec!(3333.33);
        }
    }

    #[test]
    fn progressive_negative_base_is_untaxed() {
        let brackets = peru_brackets();
        let schedule = ProgressiveSchedule::new(&brackets, dec!(5350), NumberLocale::Peru);

        assert_eq!(schedule.calculate(dec!(-100)), BracketTax::zero());
    }

    // =========================================================================
    // FixedAmountSchedule tests
    // =========================================================================

    #[test]
    fn fixed_amount_zero_rate_bracket_has_zero_tax_line() {
        let brackets = ecuador_brackets();
        let schedule = FixedAmountSchedule::new(&brackets, NumberLocale::Ecuador);

        let tax = schedule.calculate(dec!(10866));

        assert_eq!(tax.total, dec!(0));
        assert_eq!(
            tax.lines,
            vec![LineItem::new("Tramo 0%", "$0 - $12.081", dec!(0)).with_formula("0%")]
        );
    }

    #[test]
    fn fixed_amount_adds_marginal_excess() {
        let brackets = ecuador_brackets();
        let schedule = FixedAmountSchedule::new(&brackets, NumberLocale::Ecuador);

        let tax = schedule.calculate(dec!(21732));

        // 624 + (21732 - 19978) * 0.12 = 834.48
        assert_eq!(tax.total, dec!(834.48));
        assert_eq!(tax.lines.len(), 1);
        assert_eq!(tax.lines[0].step, "Tramo 12%");
        assert_eq!(tax.lines[0].description, "$19.978 - $26.422");
        assert_eq!(tax.lines[0].amount, dec!(834.48));
    }

    #[test]
    fn fixed_amount_boundary_belongs_to_upper_bracket() {
        let brackets = ecuador_brackets();
        let schedule = FixedAmountSchedule::new(&brackets, NumberLocale::Ecuador);

        let tax = schedule.calculate(dec!(15387));

        assert_eq!(tax.total, dec!(165.00));
        assert_eq!(tax.lines[0].step, "Tramo 10%");
    }

    #[test]
    fn fixed_amount_top_bracket_is_open_ended() {
        let brackets = ecuador_brackets();
        let schedule = FixedAmountSchedule::new(&brackets, NumberLocale::Ecuador);

        let tax = schedule.calculate(dec!(36422));

        // 1398 + 10000 * 0.15
        assert_eq!(tax.total, dec!(2898.00));
        assert_eq!(tax.lines[0].description, "$26.422 - ∞");
    }

    #[test]
    fn fixed_amount_without_matching_bracket_is_zero() {
        let brackets = vec![FixedAmountBracket {
            from: dec!(0),
            to: Some(dec!(1000)),
            fixed: dec!(0),
            rate: dec!(0.10),
        }];
        let schedule = FixedAmountSchedule::new(&brackets, NumberLocale::Ecuador);

        assert_eq!(schedule.calculate(dec!(5000)), BracketTax::zero());
    }
}
