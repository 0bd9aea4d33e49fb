//! Parameter sets shared by the unit tests.

use std::collections::BTreeMap;

use rust_decimal_macros::dec;

use crate::models::{
    AccrualBasis, EcuadorTaxParameters, FixedAmountBracket, HealthBonusRates, HealthScheme,
    PensionRates, PeruTaxParameters, UnitBracket,
};

fn unit_bracket(
    from_units: rust_decimal::Decimal,
    to_units: Option<rust_decimal::Decimal>,
    rate: rust_decimal::Decimal,
) -> UnitBracket {
    UnitBracket {
        from_units,
        to_units,
        rate,
    }
}

/// Peruvian parameters for 2025 with the alternate regime built from
/// components and the health-bonus equivalent enabled.
pub(crate) fn peru_2025() -> PeruTaxParameters {
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
            unit_bracket(dec!(0), Some(dec!(5)), dec!(0.08)),
            unit_bracket(dec!(5), Some(dec!(20)), dec!(0.14)),
            unit_bracket(dec!(20), Some(dec!(35)), dec!(0.17)),
            unit_bracket(dec!(35), Some(dec!(45)), dec!(0.20)),
            unit_bracket(dec!(45), None, dec!(0.30)),
        ],
        deduction_units: dec!(7),
        accrual_basis: AccrualBasis::Components,
        include_health_bonus_equivalent: Some(true),
    }
}

/// Ecuadorian parameters for 2025.
pub(crate) fn ecuador_2025() -> EcuadorTaxParameters {
    let table = [
        (dec!(0), Some(dec!(12081)), dec!(0), dec!(0)),
        (dec!(12081), Some(dec!(15387)), dec!(0), dec!(0.05)),
        (dec!(15387), Some(dec!(19978)), dec!(165), dec!(0.10)),
        (dec!(19978), Some(dec!(26422)), dec!(624), dec!(0.12)),
        (dec!(26422), Some(dec!(34770)), dec!(1398), dec!(0.15)),
        (dec!(34770), Some(dec!(46089)), dec!(2650), dec!(0.20)),
        (dec!(46089), Some(dec!(61359)), dec!(4914), dec!(0.25)),
        (dec!(61359), Some(dec!(81817)), dec!(8731), dec!(0.30)),
        (dec!(81817), Some(dec!(108810)), dec!(14869), dec!(0.35)),
        (dec!(108810), None, dec!(24316), dec!(0.37)),
    ];

    EcuadorTaxParameters {
        basic_unified_salary: dec!(470),
        reserve_fund_rate: dec!(0.0833),
        social_security_rate: dec!(0.0945),
        brackets: table
            .into_iter()
            .map(|(from, to, fixed, rate)| FixedAmountBracket {
                from,
                to,
                fixed,
                rate,
            })
            .collect(),
        personal_expenses_deduction: dec!(0),
    }
}
