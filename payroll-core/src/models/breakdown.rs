use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a calculation breakdown.
///
/// Negative amounts are deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub step: String,
    pub description: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl LineItem {
    pub fn new(
        step: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            step: step.into(),
            description: description.into(),
            amount,
            formula: None,
        }
    }

    pub fn with_formula(
        mut self,
        formula: impl Into<String>,
    ) -> Self {
        self.formula = Some(formula.into());
        self
    }
}

/// The audit trail of a salary calculation.
///
/// Line order follows the calculation sequence and is part of the output
/// contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    #[serde(rename = "monthlyCalculation")]
    pub monthly: Vec<LineItem>,

    #[serde(rename = "annualCalculation")]
    pub annual: Vec<LineItem>,

    /// Per-bracket income tax itemization.
    #[serde(rename = "fifthCategoryDetails")]
    pub income_tax_brackets: Vec<LineItem>,
}

impl SalaryBreakdown {
    /// Sum of the bracket itemization amounts.
    pub fn bracket_total(&self) -> Decimal {
        self.income_tax_brackets.iter().map(|line| line.amount).sum()
    }

    /// Finds a monthly line by step label.
    pub fn monthly_step(
        &self,
        step: &str,
    ) -> Option<&LineItem> {
        self.monthly.iter().find(|line| line.step == step)
    }

    /// Finds an annual line by step label.
    pub fn annual_step(
        &self,
        step: &str,
    ) -> Option<&LineItem> {
        self.annual.iter().find(|line| line.step == step)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn line_item_with_formula_sets_annotation() {
        let line = LineItem::new("6", "Impuesto 5ta categoría (mensual)", dec!(-33.93))
            .with_formula("Impuesto anual ÷ 12");

        assert_eq!(line.formula.as_deref(), Some("Impuesto anual ÷ 12"));
        assert_eq!(line.amount, dec!(-33.93));
    }

    #[test]
    fn bracket_total_sums_itemization() {
        let breakdown = SalaryBreakdown {
            income_tax_brackets: vec![
                LineItem::new("Tramo 8%", "S/ 0 - S/ 26,750", dec!(2140.00)),
                LineItem::new("Tramo 14%", "S/ 26,750 - S/ 107,000", dec!(10255.00)),
            ],
            ..Default::default()
        };

        assert_eq!(breakdown.bracket_total(), dec!(12395.00));
    }

    #[test]
    fn step_lookup_finds_by_label() {
        let breakdown = SalaryBreakdown {
            monthly: vec![LineItem::new("1", "Sueldo básico", dec!(3000))],
            annual: vec![LineItem::new("9", "Impuesto 5ta categoría anual", dec!(407.20))],
            ..Default::default()
        };

        assert_eq!(breakdown.monthly_step("1").map(|l| l.amount), Some(dec!(3000)));
        assert_eq!(breakdown.annual_step("9").map(|l| l.amount), Some(dec!(407.20)));
        assert!(breakdown.monthly_step("2").is_none());
    }
}
