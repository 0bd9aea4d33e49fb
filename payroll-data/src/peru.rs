use std::collections::BTreeMap;

use payroll_core::{
    AccrualBasis, HealthBonusRates, HealthScheme, PensionRates, PeruTaxParameters, UnitBracket,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::loader::{ParameterLoadError, YearRecord, required};

/// One bracket of `FIFTH_CATEGORY_BRACKETS_UIT`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UnitBracketRecord {
    #[serde(rename = "fromUIT")]
    pub from_uit: Decimal,
    /// `null` or absent for the open-ended top bracket.
    #[serde(rename = "toUIT", default)]
    pub to_uit: Option<Decimal>,
    pub rate: Decimal,
}

/// A Peruvian year entry. Every key is optional so that `{}` parses; a
/// non-empty entry must still carry the required keys.
///
/// `VACATION_ANNUAL_MONTHS` is accepted for compatibility with existing
/// documents but does not enter the month multiplier.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PeruYearRecord {
    pub uit: Option<Decimal>,
    pub family_allowance: Option<Decimal>,
    pub health_bonus: Option<BTreeMap<String, Decimal>>,
    pub health_bonus_rate: Option<Decimal>,
    pub afp_base_rate: Option<Decimal>,
    pub afp_extra_rate: Option<Decimal>,
    pub afp_extra_cap: Option<Decimal>,
    pub fifth_category_brackets_uit: Option<Vec<UnitBracketRecord>>,
    pub deduction_uit: Option<Decimal>,
    pub build_from_components: Option<bool>,
    pub grati_annual_months: Option<Decimal>,
    pub vacation_annual_months: Option<Decimal>,
    pub cts_annual_months: Option<Decimal>,
    pub include_health_bonus_equiv: Option<bool>,
}

impl PeruYearRecord {
    fn health_bonus_rates(
        &self,
        regime: &str,
        year: i32,
    ) -> Result<HealthBonusRates, ParameterLoadError> {
        let mut by_scheme = BTreeMap::new();
        for (name, rate) in self.health_bonus.iter().flatten() {
            let scheme =
                HealthScheme::parse(name).ok_or_else(|| ParameterLoadError::UnknownHealthScheme {
                    regime: regime.to_string(),
                    year,
                    name: name.clone(),
                })?;
            by_scheme.insert(scheme, *rate);
        }

        Ok(HealthBonusRates {
            by_scheme,
            flat_rate: self.health_bonus_rate,
        })
    }

    fn accrual_basis(&self) -> AccrualBasis {
        if self.build_from_components == Some(true) {
            AccrualBasis::Components
        } else {
            AccrualBasis::MonthMultiplier {
                bonus_months: self.grati_annual_months.unwrap_or_default(),
                severance_months: self.cts_annual_months.unwrap_or_default(),
            }
        }
    }
}

impl YearRecord for PeruYearRecord {
    type Params = PeruTaxParameters;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn into_params(
        self,
        regime: &str,
        year: i32,
    ) -> Result<PeruTaxParameters, ParameterLoadError> {
        let unit_value = required(self.uit, regime, year, "UIT")?;
        let family_allowance = required(self.family_allowance, regime, year, "FAMILY_ALLOWANCE")?;
        let health_bonus = self.health_bonus_rates(regime, year)?;
        let accrual_basis = self.accrual_basis();
        let pension = PensionRates {
            base_rate: required(self.afp_base_rate, regime, year, "AFP_BASE_RATE")?,
            extra_rate: required(self.afp_extra_rate, regime, year, "AFP_EXTRA_RATE")?,
            extra_cap: required(self.afp_extra_cap, regime, year, "AFP_EXTRA_CAP")?,
        };
        let brackets = required(
            self.fifth_category_brackets_uit,
            regime,
            year,
            "FIFTH_CATEGORY_BRACKETS_UIT",
        )?;
        let deduction_units = required(self.deduction_uit, regime, year, "DEDUCTION_UIT")?;

        Ok(PeruTaxParameters {
            unit_value,
            family_allowance,
            health_bonus,
            pension,
            brackets: brackets
                .into_iter()
                .map(|b| UnitBracket {
                    from_units: b.from_uit,
                    to_units: b.to_uit,
                    rate: b.rate,
                })
                .collect(),
            deduction_units,
            accrual_basis,
            include_health_bonus_equivalent: self.include_health_bonus_equiv,
        })
    }
}
