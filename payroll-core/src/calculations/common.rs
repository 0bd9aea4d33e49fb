//! Rounding and number formatting shared by both salary engines.
//!
//! Every monetary figure a caller sees passes through [`round_half_up`];
//! breakdown descriptions format amounts with [`format_amount`] in the
//! locale of the jurisdiction.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, with midpoints going away from zero (`0.005` becomes
/// `0.01`, `-0.005` becomes `-0.01`).
///
/// Payroll figures must match statutory worksheets to the cent, so this is
/// the only rounding applied to amounts.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(291.665)), dec!(291.67));
/// assert_eq!(round_half_up(dec!(33.9266)), dec!(33.93));
/// assert_eq!(round_half_up(dec!(-2.345)), dec!(-2.35));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The larger of two amounts; used to clamp taxable bases and taxes at 0.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    a.max(b)
}

/// Signed amount for a deduction line. A zero deduction stays zero
/// instead of becoming negative zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::as_deduction;
///
/// assert_eq!(as_deduction(dec!(341.10)), dec!(-341.10));
/// assert!(!as_deduction(dec!(0)).is_sign_negative());
/// ```
pub fn as_deduction(value: Decimal) -> Decimal {
    if value.is_zero() { Decimal::ZERO } else { -value }
}

/// Number conventions of the supported locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLocale {
    /// es-PE: `1,234.5`, amounts in soles.
    Peru,
    /// es-EC: `1.234,5`, amounts in US dollars.
    Ecuador,
}

impl NumberLocale {
    fn group_separator(self) -> char {
        match self {
            Self::Peru => ',',
            Self::Ecuador => '.',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Self::Peru => '.',
            Self::Ecuador => ',',
        }
    }

    /// Currency prefix used in bracket ranges.
    pub fn currency_prefix(self) -> &'static str {
        match self {
            Self::Peru => "S/ ",
            Self::Ecuador => "$",
        }
    }
}

/// Formats an amount with grouped thousands and between zero and two
/// fraction digits (trailing zeros dropped).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::{NumberLocale, format_amount};
///
/// assert_eq!(format_amount(dec!(26750), NumberLocale::Peru), "26,750");
/// assert_eq!(format_amount(dec!(12234.105), NumberLocale::Peru), "12,234.11");
/// assert_eq!(format_amount(dec!(19978.5), NumberLocale::Ecuador), "19.978,5");
/// ```
pub fn format_amount(
    value: Decimal,
    locale: NumberLocale,
) -> String {
    let rounded = round_half_up(value).normalize();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(locale.group_separator());
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push(locale.decimal_separator());
        out.push_str(frac_part);
    }
    out
}

/// Formats a rate as a whole percentage, e.g. `0.08` as `"8%"`.
pub fn format_whole_percent(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent}%")
}

/// Formats a rate as a percentage with up to two decimals, e.g. `0.0675`
/// as `"6.75"` (no percent sign).
pub fn format_percent(rate: Decimal) -> String {
    round_half_up(rate * Decimal::ONE_HUNDRED)
        .normalize()
        .to_string()
}

/// Formats a rate as a percentage with exactly two decimals, e.g. `0.1`
/// as `"10.00"` (no percent sign).
pub fn format_percent_fixed(rate: Decimal) -> String {
    let mut percent = round_half_up(rate * Decimal::ONE_HUNDRED);
    percent.rescale(2);
    percent.to_string()
}
