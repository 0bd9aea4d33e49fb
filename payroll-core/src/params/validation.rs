//! Load-time checks shared by the parameter types.

use rust_decimal::Decimal;

use super::ConfigurationError;
use crate::models::{FixedAmountBracket, UnitBracket};

pub(crate) fn check_rate(
    field: &'static str,
    value: Decimal,
) -> Result<(), ConfigurationError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ConfigurationError::RateOutOfRange { field, value });
    }
    Ok(())
}

pub(crate) fn check_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), ConfigurationError> {
    if value < Decimal::ZERO {
        return Err(ConfigurationError::NegativeValue { field, value });
    }
    Ok(())
}

pub(crate) fn check_positive(
    field: &'static str,
    value: Decimal,
) -> Result<(), ConfigurationError> {
    if value <= Decimal::ZERO {
        return Err(ConfigurationError::NonPositiveValue { field, value });
    }
    Ok(())
}

pub(crate) fn check_unit_brackets(brackets: &[UnitBracket]) -> Result<(), ConfigurationError> {
    check_bracket_shape(
        brackets
            .iter()
            .map(|b| (b.from_units, b.to_units, b.rate)),
    )
}

pub(crate) fn check_fixed_brackets(
    brackets: &[FixedAmountBracket]
) -> Result<(), ConfigurationError> {
    for bracket in brackets {
        check_non_negative("incomeTax.brackets.fixed", bracket.fixed)?;
    }
    check_bracket_shape(brackets.iter().map(|b| (b.from, b.to, b.rate)))
}

/// Brackets must start at zero, be contiguous and ascending, and only the
/// last one may (and must) be unbounded.
fn check_bracket_shape(
    bounds: impl ExactSizeIterator<Item = (Decimal, Option<Decimal>, Decimal)>
) -> Result<(), ConfigurationError> {
    let count = bounds.len();
    if count == 0 {
        return Err(ConfigurationError::NoBrackets);
    }

    let mut previous_to: Option<Decimal> = None;
    for (index, (from, to, rate)) in bounds.enumerate() {
        check_rate("bracket rate", rate)?;

        match previous_to {
            None if from != Decimal::ZERO => {
                return Err(ConfigurationError::FirstBracketNotAtZero(from));
            }
            Some(previous_to) if from != previous_to => {
                return Err(ConfigurationError::NonContiguousBrackets {
                    index,
                    from,
                    previous_to,
                });
            }
            _ => {}
        }

        let is_last = index + 1 == count;
        match to {
            Some(to) if to <= from => {
                return Err(ConfigurationError::EmptyBracket { index, from, to });
            }
            Some(_) if is_last => return Err(ConfigurationError::BoundedLastBracket),
            None if !is_last => return Err(ConfigurationError::UnboundedBracketBeforeLast(index)),
            _ => {}
        }

        previous_to = to;
    }

    Ok(())
}
