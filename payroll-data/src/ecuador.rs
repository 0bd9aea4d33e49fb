use payroll_core::{EcuadorTaxParameters, FixedAmountBracket};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::loader::{ParameterLoadError, YearRecord, required};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecimoFourthRecord {
    /// Unified basic salary (SBU).
    pub sbu: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReserveFundRecord {
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitsRecord {
    pub decimo_fourth: DecimoFourthRecord,
    pub reserve_fund: ReserveFundRecord,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IessRecord {
    /// Employee contribution rate.
    pub employee: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixedBracketRecord {
    pub from: Decimal,
    #[serde(default)]
    pub to: Option<Decimal>,
    pub fixed: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxRecord {
    pub brackets: Vec<FixedBracketRecord>,
    #[serde(default)]
    pub default_personal_expenses_deduction: Option<Decimal>,
}

/// An Ecuadorian year entry. The three sections are optional so that `{}`
/// parses; a non-empty entry must carry all of them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcuadorYearRecord {
    pub benefits: Option<BenefitsRecord>,
    pub iess: Option<IessRecord>,
    pub income_tax: Option<IncomeTaxRecord>,
}

impl YearRecord for EcuadorYearRecord {
    type Params = EcuadorTaxParameters;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn into_params(
        self,
        regime: &str,
        year: i32,
    ) -> Result<EcuadorTaxParameters, ParameterLoadError> {
        let benefits = required(self.benefits, regime, year, "benefits")?;
        let iess = required(self.iess, regime, year, "iess")?;
        let income_tax = required(self.income_tax, regime, year, "incomeTax")?;

        Ok(EcuadorTaxParameters {
            basic_unified_salary: benefits.decimo_fourth.sbu,
            reserve_fund_rate: benefits.reserve_fund.rate,
            social_security_rate: iess.employee,
            brackets: income_tax
                .brackets
                .into_iter()
                .map(|b| FixedAmountBracket {
                    from: b.from,
                    to: b.to,
                    fixed: b.fixed,
                    rate: b.rate,
                })
                .collect(),
            personal_expenses_deduction: income_tax
                .default_personal_expenses_deduction
                .unwrap_or_default(),
        })
    }
}
