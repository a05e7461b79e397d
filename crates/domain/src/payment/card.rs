//! Card payment details.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, require_non_blank};

/// Debit or credit card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Debit,
    Credit,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Debit => "Debit",
            CardType::Credit => "Credit",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Card data supplied with a card payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    number: String,
    holder_name: String,
    cvv: String,
    expiry: NaiveDate,
    card_type: CardType,
    installments: u32,
}

impl CardDetails {
    /// Creates card details. Shape checks (length, expiry) happen at processing time.
    pub fn new(
        number: impl Into<String>,
        holder_name: impl Into<String>,
        cvv: impl Into<String>,
        expiry: NaiveDate,
        card_type: CardType,
        installments: u32,
    ) -> Result<Self, DomainError> {
        if installments == 0 {
            return Err(DomainError::invalid_argument(
                "installments",
                "must be greater than 0",
            ));
        }

        Ok(Self {
            number: require_non_blank("card number", number.into())?,
            holder_name: require_non_blank("holder name", holder_name.into())?,
            cvv: require_non_blank("cvv", cvv.into())?,
            expiry,
            card_type,
            installments,
        })
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub fn installments(&self) -> u32 {
        self.installments
    }

    /// Checks number length (13-19), CVV length (3-4), and that the card has
    /// not expired as of `today`.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        let number_len = self.number.chars().count();
        let cvv_len = self.cvv.chars().count();

        (13..=19).contains(&number_len) && (3..=4).contains(&cvv_len) && self.expiry >= today
    }

    /// Returns the number with all but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let chars: Vec<char> = self.number.chars().collect();
        if chars.len() < 4 {
            return "****".to_string();
        }
        let last4: String = chars[chars.len() - 4..].iter().collect();
        format!("**** **** **** {last4}")
    }

    /// Fee percentage: debit 2%, credit single installment 3%, credit split 5%.
    pub fn fee_percent(&self) -> u32 {
        match (self.card_type, self.installments) {
            (CardType::Debit, _) => 2,
            (CardType::Credit, 1) => 3,
            (CardType::Credit, _) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn card(number: &str, cvv: &str, expiry: NaiveDate) -> CardDetails {
        CardDetails::new(number, "Ana Silva", cvv, expiry, CardType::Credit, 1).unwrap()
    }

    #[test]
    fn test_valid_card() {
        let today = date(2026, 1, 1);
        assert!(card("4111111111111111", "123", date(2027, 1, 1)).is_valid_on(today));
        assert!(card("4111111111111", "1234", today).is_valid_on(today));
    }

    #[test]
    fn test_number_length_bounds() {
        let today = date(2026, 1, 1);
        let expiry = date(2027, 1, 1);
        assert!(!card("411111111111", "123", expiry).is_valid_on(today));
        assert!(!card("41111111111111111111", "123", expiry).is_valid_on(today));
    }

    #[test]
    fn test_cvv_and_expiry() {
        let today = date(2026, 6, 1);
        assert!(!card("4111111111111111", "12", date(2027, 1, 1)).is_valid_on(today));
        assert!(!card("4111111111111111", "12345", date(2027, 1, 1)).is_valid_on(today));
        assert!(!card("4111111111111111", "123", date(2026, 5, 31)).is_valid_on(today));
    }

    #[test]
    fn test_masked_number() {
        assert_eq!(
            card("4111111111111234", "123", date(2027, 1, 1)).masked_number(),
            "**** **** **** 1234"
        );
        assert_eq!(card("123", "123", date(2027, 1, 1)).masked_number(), "****");
    }

    #[test]
    fn test_fee_schedule() {
        let expiry = date(2027, 1, 1);
        let debit = CardDetails::new("4111", "A", "123", expiry, CardType::Debit, 1).unwrap();
        let credit = CardDetails::new("4111", "A", "123", expiry, CardType::Credit, 1).unwrap();
        let split = CardDetails::new("4111", "A", "123", expiry, CardType::Credit, 3).unwrap();
        assert_eq!(debit.fee_percent(), 2);
        assert_eq!(credit.fee_percent(), 3);
        assert_eq!(split.fee_percent(), 5);
    }

    #[test]
    fn test_zero_installments_rejected() {
        let result = CardDetails::new("4111", "A", "123", date(2027, 1, 1), CardType::Credit, 0);
        assert!(matches!(
            result,
            Err(DomainError::InvalidArgument {
                field: "installments",
                ..
            })
        ));
    }
}
