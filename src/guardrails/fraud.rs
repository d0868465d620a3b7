use crate::domain::payment::PaymentRequest;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudFlag {
    HighAmount,
    SuspiciousAccount,
}

impl FraudFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudFlag::HighAmount => "high_amount",
            FraudFlag::SuspiciousAccount => "suspicious_account",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FraudScreen {
    pub amount_ceiling: Decimal,
    pub denylist: HashSet<String>,
}

impl FraudScreen {
    pub fn new(amount_ceiling: Decimal, denylist: impl IntoIterator<Item = String>) -> Self {
        Self {
            amount_ceiling,
            denylist: denylist.into_iter().collect(),
        }
    }

    /// Every rule that fires is reported; an empty result means clean.
    pub fn screen(&self, req: &PaymentRequest) -> Vec<FraudFlag> {
        let mut flags = Vec::new();
        if req.amount > self.amount_ceiling {
            flags.push(FraudFlag::HighAmount);
        }
        if self.denylist.contains(&req.to_account) {
            flags.push(FraudFlag::SuspiciousAccount);
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn screen() -> FraudScreen {
        FraudScreen::new(dec!(10000), vec!["ACC-DENY-0001".to_string()])
    }

    fn req(amount: Decimal, to: &str) -> PaymentRequest {
        PaymentRequest {
            from_account: "ACC-1".to_string(),
            to_account: to.to_string(),
            amount,
            currency: "USD".to_string(),
            target_currency: None,
        }
    }

    #[test]
    fn ceiling_itself_is_allowed() {
        assert!(screen().screen(&req(dec!(10000), "ACC-2")).is_empty());
    }

    #[test]
    fn both_rules_reported_together() {
        let flags = screen().screen(&req(dec!(10000.01), "ACC-DENY-0001"));
        assert_eq!(flags, vec![FraudFlag::HighAmount, FraudFlag::SuspiciousAccount]);
    }

    #[test]
    fn denylisted_destination_alone() {
        let flags = screen().screen(&req(dec!(5), "ACC-DENY-0001"));
        assert_eq!(flags, vec![FraudFlag::SuspiciousAccount]);
    }
}
