//! Card details entered on the card payment form.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card network, detected from the leading digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Other,
}

impl CardBrand {
    /// `4…` is Visa, `51…`–`55…` is Mastercard.
    pub fn detect(number: &str) -> Self {
        let mut digits = number.chars().filter(char::is_ascii_digit);
        match (digits.next(), digits.next()) {
            (Some('4'), _) => CardBrand::Visa,
            (Some('5'), Some('1'..='5')) => CardBrand::Mastercard,
            _ => CardBrand::Other,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::Other => "Card",
        }
    }
}

/// Card number, expiry (`MM/YY`) and cvv.
///
/// `Debug` masks the number and hides the cvv.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    card_number: String,
    expiry: String,
    cvv: String,
}

impl CardDetails {
    /// Build card details. Non-digits are stripped from the number.
    pub fn new(number: &str, expiry: impl Into<String>, cvv: impl Into<String>) -> Self {
        Self {
            card_number: number.chars().filter(char::is_ascii_digit).collect(),
            expiry: expiry.into().trim().to_string(),
            cvv: cvv.into().trim().to_string(),
        }
    }

    pub fn number(&self) -> &str {
        &self.card_number
    }

    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    pub fn brand(&self) -> CardBrand {
        CardBrand::detect(&self.card_number)
    }

    pub fn last4(&self) -> &str {
        let start = self.card_number.len().saturating_sub(4);
        &self.card_number[start..]
    }

    /// `**** **** **** 1234`
    pub fn masked(&self) -> String {
        format!("**** **** **** {}", self.last4())
    }

    /// Names of the fields that are malformed.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut invalid = Vec::new();
        if !all_digits(&self.card_number, 16) {
            invalid.push("card number");
        }
        let expiry_ok = match self.expiry.split_once('/') {
            Some((mm, yy)) => all_digits(mm, 2) && all_digits(yy, 2),
            None => false,
        };
        if !expiry_ok {
            invalid.push("expiry");
        }
        if !all_digits(&self.cvv, 3) {
            invalid.push("cvv");
        }
        invalid
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        let invalid = self.invalid_fields();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::InvalidCard(invalid.join(", ")))
        }
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &self.masked())
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .finish()
    }
}

fn all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}
