use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::regime::HealthScheme;
use super::tax_bracket::{FixedAmountBracket, UnitBracket};
use crate::params::validation::{
    check_fixed_brackets, check_non_negative, check_positive, check_rate, check_unit_brackets,
};
use crate::params::{ConfigurationError, TaxParameters};

/// Pension-fund contribution rates.
///
/// The extra rate (insurance premium) applies only to the part of the
/// pensionable base up to `extra_cap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionRates {
    pub base_rate: Decimal,
    pub extra_rate: Decimal,
    pub extra_cap: Decimal,
}

/// Health-bonus rates keyed by health scheme, with an optional flat
/// fallback rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBonusRates {
    pub by_scheme: BTreeMap<HealthScheme, Decimal>,
    pub flat_rate: Option<Decimal>,
}

impl HealthBonusRates {
    /// Rate used when neither a scheme rate nor a flat rate is configured (9%).
    pub const DEFAULT_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 2);

    /// Resolves the rate for `scheme`: the scheme's own rate, else the flat
    /// rate, else [`Self::DEFAULT_RATE`].
    pub fn rate_for(
        &self,
        scheme: HealthScheme,
    ) -> Decimal {
        self.by_scheme
            .get(&scheme)
            .copied()
            .or(self.flat_rate)
            .unwrap_or(Self::DEFAULT_RATE)
    }
}

/// How the alternate regime builds its monthly gross payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccrualBasis {
    /// Base plus the bonus, extra-bonus and severance aliquots.
    Components,
    /// Base scaled by `(12 + bonus_months + severance_months) / 12`.
    MonthMultiplier {
        bonus_months: Decimal,
        severance_months: Decimal,
    },
}

/// Peruvian regulatory parameters for one (regime, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeruTaxParameters {
    /// Tax unit value (UIT).
    pub unit_value: Decimal,

    /// Flat family allowance added to the pensionable base when it applies.
    pub family_allowance: Decimal,

    pub health_bonus: HealthBonusRates,

    pub pension: PensionRates,

    /// Fifth-category income-tax brackets in multiples of `unit_value`.
    pub brackets: Vec<UnitBracket>,

    /// Annual deduction from the income-tax base, in multiples of `unit_value`.
    pub deduction_units: Decimal,

    /// Alternate regime only.
    pub accrual_basis: AccrualBasis,

    /// Alternate regime only. Left unset, the monthly extra-bonus aliquot is
    /// omitted while the tax-base health-bonus equivalent is still included.
    pub include_health_bonus_equivalent: Option<bool>,
}

impl PeruTaxParameters {
    /// The annual income-tax deduction in currency.
    pub fn deduction_amount(&self) -> Decimal {
        self.deduction_units * self.unit_value
    }

    /// Whether the alternate regime pays a monthly extra-bonus aliquot.
    pub fn pays_extra_bonus_aliquot(&self) -> bool {
        self.include_health_bonus_equivalent == Some(true)
    }

    /// Whether the alternate regime adds a health-bonus equivalent to the
    /// income-tax base.
    pub fn taxes_health_bonus_equivalent(&self) -> bool {
        self.include_health_bonus_equivalent != Some(false)
    }
}

impl TaxParameters for PeruTaxParameters {
    fn validate(&self) -> Result<(), ConfigurationError> {
        check_positive("UIT", self.unit_value)?;
        check_non_negative("FAMILY_ALLOWANCE", self.family_allowance)?;
        for rate in self.health_bonus.by_scheme.values() {
            check_rate("HEALTH_BONUS", *rate)?;
        }
        if let Some(rate) = self.health_bonus.flat_rate {
            check_rate("HEALTH_BONUS_RATE", rate)?;
        }
        check_rate("AFP_BASE_RATE", self.pension.base_rate)?;
        check_rate("AFP_EXTRA_RATE", self.pension.extra_rate)?;
        check_non_negative("AFP_EXTRA_CAP", self.pension.extra_cap)?;
        check_non_negative("DEDUCTION_UIT", self.deduction_units)?;
        if let AccrualBasis::MonthMultiplier {
            bonus_months,
            severance_months,
        } = &self.accrual_basis
        {
            check_non_negative("GRATI_ANNUAL_MONTHS", *bonus_months)?;
            check_non_negative("CTS_ANNUAL_MONTHS", *severance_months)?;
        }
        check_unit_brackets(&self.brackets)
    }
}

/// Ecuadorian regulatory parameters for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcuadorTaxParameters {
    /// Unified basic salary (SBU); the fourth-salary bonus is one SBU a year.
    pub basic_unified_salary: Decimal,

    pub reserve_fund_rate: Decimal,

    /// Employee social-security (IESS) withholding rate.
    pub social_security_rate: Decimal,

    pub brackets: Vec<FixedAmountBracket>,

    /// Flat personal-expense rebate subtracted from the computed annual tax.
    pub personal_expenses_deduction: Decimal,
}

impl TaxParameters for EcuadorTaxParameters {
    fn validate(&self) -> Result<(), ConfigurationError> {
        check_non_negative("benefits.decimoFourth.sbu", self.basic_unified_salary)?;
        check_rate("benefits.reserveFund.rate", self.reserve_fund_rate)?;
        check_rate("iess.employee", self.social_security_rate)?;
        check_non_negative(
            "incomeTax.defaultPersonalExpensesDeduction",
            self.personal_expenses_deduction,
        )?;
        check_fixed_brackets(&self.brackets)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn peru_params() -> PeruTaxParameters {
        PeruTaxParameters {
            unit_value: dec!(5350),
            family_allowance: dec!(113),
            health_bonus: HealthBonusRates {
                by_scheme: BTreeMap::from([
                    (HealthScheme::Essalud, dec!(0.09)),
                    (HealthScheme::Eps, dec!(0.0675)),
                ]),
                flat_rate: None,
            },
            pension: PensionRates {
                base_rate: dec!(0.10),
                extra_rate: dec!(0.0137),
                extra_cap: dec!(12234.11),
            },
            brackets: vec![
                UnitBracket {
                    from_units: dec!(0),
                    to_units: Some(dec!(5)),
                    rate: dec!(0.08),
                },
                UnitBracket {
                    from_units: dec!(5),
                    to_units: None,
                    rate: dec!(0.14),
                },
            ],
            deduction_units: dec!(7),
            accrual_basis: AccrualBasis::Components,
            include_health_bonus_equivalent: Some(true),
        }
    }

    // =========================================================================
    // HealthBonusRates tests
    // =========================================================================

    #[test]
    fn rate_for_uses_scheme_rate() {
        let params = peru_params();

        assert_eq!(params.health_bonus.rate_for(HealthScheme::Eps), dec!(0.0675));
    }

    #[test]
    fn rate_for_falls_back_to_flat_rate() {
        let rates = HealthBonusRates {
            by_scheme: BTreeMap::from([(HealthScheme::Essalud, dec!(0.09))]),
            flat_rate: Some(dec!(0.08)),
        };

        assert_eq!(rates.rate_for(HealthScheme::Eps), dec!(0.08));
    }

    #[test]
    fn rate_for_defaults_to_nine_percent() {
        let rates = HealthBonusRates::default();

        assert_eq!(rates.rate_for(HealthScheme::Eps), dec!(0.09));
    }

    // =========================================================================
    // health-bonus-equivalent flag tests
    // =========================================================================

    #[test]
    fn unset_flag_taxes_equivalent_but_pays_no_aliquot() {
        let mut params = peru_params();
        params.include_health_bonus_equivalent = None;

        assert!(!params.pays_extra_bonus_aliquot());
        assert!(params.taxes_health_bonus_equivalent());
    }

    #[test]
    fn explicit_false_disables_both() {
        let mut params = peru_params();
        params.include_health_bonus_equivalent = Some(false);

        assert!(!params.pays_extra_bonus_aliquot());
        assert!(!params.taxes_health_bonus_equivalent());
    }

    #[test]
    fn deduction_amount_multiplies_units() {
        assert_eq!(peru_params().deduction_amount(), dec!(37450));
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_well_formed_parameters() {
        assert_eq!(peru_params().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_unit_value() {
        let mut params = peru_params();
        params.unit_value = dec!(0);

        assert_eq!(
            params.validate(),
            Err(ConfigurationError::NonPositiveValue {
                field: "UIT",
                value: dec!(0),
            })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut params = peru_params();
        params.pension.base_rate = dec!(10);

        assert_eq!(
            params.validate(),
            Err(ConfigurationError::RateOutOfRange {
                field: "AFP_BASE_RATE",
                value: dec!(10),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_months() {
        let mut params = peru_params();
        params.accrual_basis = AccrualBasis::MonthMultiplier {
            bonus_months: dec!(2),
            severance_months: dec!(-1),
        };

        assert_eq!(
            params.validate(),
            Err(ConfigurationError::NegativeValue {
                field: "CTS_ANNUAL_MONTHS",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_ecuador_rejects_bad_withholding_rate() {
        let params = EcuadorTaxParameters {
            basic_unified_salary: dec!(470),
            reserve_fund_rate: dec!(0.0833),
            social_security_rate: dec!(-0.0945),
            brackets: vec![FixedAmountBracket {
                from: dec!(0),
                to: None,
                fixed: dec!(0),
                rate: dec!(0),
            }],
            personal_expenses_deduction: dec!(0),
        };

        assert_eq!(
            params.validate(),
            Err(ConfigurationError::RateOutOfRange {
                field: "iess.employee",
                value: dec!(-0.0945),
            })
        );
    }
}
