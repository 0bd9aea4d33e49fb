use rust_decimal::Decimal;
use thiserror::Error;

/// Largest accepted monthly amount. Keeps annualised figures and bracket
/// products well inside the range of [`Decimal`].
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Error returned when a string is not a usable amount.
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("invalid decimal '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("amount '{input}' exceeds the maximum of {MAX_AMOUNT}")]
    TooLarge { input: String },
}

/// Error returned when a string is not a recognised yes/no value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid flag '{0}', expected yes/no, true/false or 1/0")]
pub struct ParseFlagError(String);

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
/// Returns an error and logs when the input is invalid (non-empty but not parseable).
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a monetary input the way the salary form coerces it: thousands
/// commas stripped, empty as 0, negative amounts clamped to 0.
///
/// Amounts above [`MAX_AMOUNT`] are rejected.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseDecimalError> {
    let value = parse_decimal(s)?;
    if value.is_sign_negative() && !value.is_zero() {
        tracing::warn!(input = %s, "negative amount clamped to 0");
        return Ok(Decimal::ZERO);
    }
    if value > MAX_AMOUNT {
        return Err(ParseDecimalError::TooLarge {
            input: s.to_string(),
        });
    }
    Ok(value)
}

/// Parses a yes/no cell. Empty input is `false`.
pub fn parse_flag(s: &str) -> Result<bool, ParseFlagError> {
    match s.trim().to_lowercase().as_str() {
        "" | "0" | "no" | "n" | "false" => Ok(false),
        "1" | "yes" | "y" | "true" | "si" | "sí" => Ok(true),
        _ => Err(ParseFlagError(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn parse_decimal_keeps_sign() {
        assert_eq!(parse_decimal("-10").unwrap(), dec!(-10));
    }

    #[test]
    fn parse_amount_clamps_negative_to_zero() {
        assert_eq!(parse_amount("-250.00").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("3,000").unwrap(), dec!(3000));
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_invalid_returns_error() {
        assert!(matches!(
            parse_amount("12x"),
            Err(ParseDecimalError::Invalid { .. })
        ));
    }

    #[test]
    fn parse_amount_accepts_the_ceiling() {
        assert_eq!(parse_amount("1,000,000,000").unwrap(), MAX_AMOUNT);
    }

    #[test]
    fn parse_amount_rejects_amounts_above_ceiling() {
        for input in ["1000000000.01", "10000000000000000000000000000"] {
            assert!(
                matches!(parse_amount(input), Err(ParseDecimalError::TooLarge { .. })),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        for input in ["yes", "Y", "true", "1", " Sí "] {
            assert_eq!(parse_flag(input), Ok(true), "input {input:?}");
        }
        for input in ["", "no", "FALSE", "0"] {
            assert_eq!(parse_flag(input), Ok(false), "input {input:?}");
        }
    }

    #[test]
    fn parse_flag_rejects_other_values() {
        assert_eq!(parse_flag("maybe"), Err(ParseFlagError("maybe".to_string())));
    }
}
