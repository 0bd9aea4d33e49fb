use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A progressive income-tax bracket whose bounds are multiples of the
/// jurisdiction's unit value (the Peruvian UIT).
///
/// `to_units` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitBracket {
    pub from_units: Decimal,
    pub to_units: Option<Decimal>,
    pub rate: Decimal,
}

impl UnitBracket {
    /// Lower bound in currency.
    pub fn from_amount(
        &self,
        unit_value: Decimal,
    ) -> Decimal {
        self.from_units * unit_value
    }

    /// Upper bound in currency, `None` when unbounded.
    pub fn to_amount(
        &self,
        unit_value: Decimal,
    ) -> Option<Decimal> {
        self.to_units.map(|to| to * unit_value)
    }
}

/// A "fixed amount plus marginal rate on the excess" bracket expressed in
/// currency, as published in the Ecuadorian income-tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAmountBracket {
    pub from: Decimal,
    pub to: Option<Decimal>,
    pub fixed: Decimal,
    pub rate: Decimal,
}

impl FixedAmountBracket {
    /// Whether `base` falls inside `[from, to)`.
    pub fn contains(
        &self,
        base: Decimal,
    ) -> bool {
        base >= self.from && self.to.is_none_or(|to| base < to)
    }
}
