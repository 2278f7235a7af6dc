use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    EWallet,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::EWallet => "e_wallet",
            PaymentMethod::Other => "other",
        }
    }

    /// Collapses the gateway's `payment_type` vocabulary onto the stored label.
    pub fn from_gateway(payment_type: &str) -> Self {
        match payment_type {
            "credit_card" => PaymentMethod::CreditCard,
            "bank_transfer" | "echannel" | "permata" => PaymentMethod::BankTransfer,
            "gopay" | "shopeepay" | "qris" => PaymentMethod::EWallet,
            _ => PaymentMethod::Other,
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_gateway_payment_types() {
        assert_eq!(
            PaymentMethod::from_gateway("credit_card"),
            PaymentMethod::CreditCard
        );
        assert_eq!(
            PaymentMethod::from_gateway("echannel"),
            PaymentMethod::BankTransfer
        );
        assert_eq!(PaymentMethod::from_gateway("qris"), PaymentMethod::EWallet);
        assert_eq!(
            PaymentMethod::from_gateway("cstore"),
            PaymentMethod::Other
        );
    }
}
