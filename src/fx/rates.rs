use crate::error::PaymentError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Converted amounts are rounded to 2 places with banker's rounding
/// (half to even): 0.125 -> 0.12, 0.375 -> 0.38.
pub const AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Clone)]
pub struct FxRateTable {
    rates: HashMap<(String, String), Decimal>,
}

impl Default for FxRateTable {
    fn default() -> Self {
        Self::from_pairs([
            ("USD", "EUR", dec!(0.92)),
            ("EUR", "USD", dec!(1.09)),
            ("USD", "GBP", dec!(0.79)),
            ("GBP", "USD", dec!(1.27)),
            ("EUR", "GBP", dec!(0.86)),
            ("GBP", "EUR", dec!(1.16)),
            ("USD", "INR", dec!(83.12)),
            ("INR", "USD", dec!(0.012)),
        ])
    }
}

impl FxRateTable {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str, Decimal)>) -> Self {
        let rates = pairs
            .into_iter()
            .map(|(from, to, rate)| ((from.to_string(), to.to_string()), rate))
            .collect();
        Self { rates }
    }

    pub fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates.get(&(from.to_string(), to.to_string())).copied()
    }

    /// Returns `(rate, converted_amount)`.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<(Decimal, Decimal), PaymentError> {
        let rate = self
            .rate(from, to)
            .ok_or_else(|| PaymentError::UnsupportedCurrencyPair {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        Ok((rate, round_amount(amount * rate)))
    }
}

pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_usd_to_eur() {
        let table = FxRateTable::default();
        let (rate, converted) = table.convert(dec!(100), "USD", "EUR").unwrap();
        assert_eq!(rate, dec!(0.92));
        assert_eq!(converted, dec!(92.00));
    }

    #[test]
    fn unknown_pair_is_rejected() {
        let table = FxRateTable::default();
        let err = table.convert(dec!(100), "USD", "JPY").unwrap_err();
        assert_eq!(
            err,
            PaymentError::UnsupportedCurrencyPair {
                from: "USD".to_string(),
                to: "JPY".to_string()
            }
        );
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(round_amount(dec!(2.345)), dec!(2.34));
        assert_eq!(round_amount(dec!(2.355)), dec!(2.36));
        assert_eq!(round_amount(dec!(0.125)), dec!(0.12));
        assert_eq!(round_amount(dec!(0.375)), dec!(0.38));
        assert_eq!(round_amount(dec!(2.3451)), dec!(2.35));
    }

    #[test]
    fn conversion_rounds_boundary_halves() {
        let table = FxRateTable::from_pairs([("AAA", "BBB", dec!(0.5))]);
        assert_eq!(table.convert(dec!(0.25), "AAA", "BBB").unwrap().1, dec!(0.12));
        assert_eq!(table.convert(dec!(0.75), "AAA", "BBB").unwrap().1, dec!(0.38));
    }
}
