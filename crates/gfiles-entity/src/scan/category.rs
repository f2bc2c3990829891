//! Personal-data category tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category of personal data detectable by the scanner.
///
/// Categories are persisted as their kebab-case tag in the
/// `personal_data_types` array column, so the string form is part of the
/// stored contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonalDataType {
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Tax / VAT identification number.
    TaxId,
    /// National identity number.
    NationalId,
    /// International bank account number.
    Iban,
    /// Payment card number.
    CreditCard,
    /// Date of birth.
    DateOfBirth,
    /// Content could not be read; conservative classification applied.
    UnreadableContent,
}

impl PersonalDataType {
    /// Return the persisted tag for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::TaxId => "tax-id",
            Self::NationalId => "national-id",
            Self::Iban => "iban",
            Self::CreditCard => "credit-card",
            Self::DateOfBirth => "date-of-birth",
            Self::UnreadableContent => "unreadable-content",
        }
    }
}

impl fmt::Display for PersonalDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PersonalDataType {
    type Err = gfiles_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "tax-id" => Ok(Self::TaxId),
            "national-id" => Ok(Self::NationalId),
            "iban" => Ok(Self::Iban),
            "credit-card" => Ok(Self::CreditCard),
            "date-of-birth" => Ok(Self::DateOfBirth),
            "unreadable-content" => Ok(Self::UnreadableContent),
            _ => Err(gfiles_core::AppError::validation(format!(
                "Unknown personal data category: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for tag in [
            PersonalDataType::Email,
            PersonalDataType::TaxId,
            PersonalDataType::UnreadableContent,
        ] {
            assert_eq!(tag.as_str().parse::<PersonalDataType>().unwrap(), tag);
        }
    }
}
