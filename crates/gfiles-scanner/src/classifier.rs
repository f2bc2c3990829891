//! Deterministic risk classification.

use gfiles_entity::scan::{PersonalDataType, RiskLevel};

/// Derive the risk level from the detected categories.
///
/// The level is a pure function of *which* categories matched and *how
/// many*: highly sensitive identifiers (national id, payment card, IBAN)
/// or unreadable content classify critical regardless of count; four or
/// more categories also classify critical; tax ids or three categories
/// classify high; any remaining match is medium; no match is low.
pub fn classify_risk(detected: &[PersonalDataType]) -> RiskLevel {
    if detected.is_empty() {
        return RiskLevel::Low;
    }

    let has_critical_category = detected.iter().any(|t| {
        matches!(
            t,
            PersonalDataType::NationalId
                | PersonalDataType::CreditCard
                | PersonalDataType::Iban
                | PersonalDataType::UnreadableContent
        )
    });
    if has_critical_category || detected.len() >= 4 {
        return RiskLevel::Critical;
    }

    if detected.contains(&PersonalDataType::TaxId) || detected.len() >= 3 {
        return RiskLevel::High;
    }

    RiskLevel::Medium
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_low() {
        assert_eq!(classify_risk(&[]), RiskLevel::Low);
    }

    #[test]
    fn test_single_contact_category_is_medium() {
        assert_eq!(classify_risk(&[PersonalDataType::Email]), RiskLevel::Medium);
        assert_eq!(
            classify_risk(&[PersonalDataType::Email, PersonalDataType::Phone]),
            RiskLevel::Medium
        );
    }

    #[test]
    fn test_tax_id_is_high() {
        assert_eq!(classify_risk(&[PersonalDataType::TaxId]), RiskLevel::High);
    }

    #[test]
    fn test_three_categories_are_high() {
        assert_eq!(
            classify_risk(&[
                PersonalDataType::Email,
                PersonalDataType::Phone,
                PersonalDataType::DateOfBirth,
            ]),
            RiskLevel::High
        );
    }

    #[test]
    fn test_sensitive_identifiers_are_critical() {
        assert_eq!(
            classify_risk(&[PersonalDataType::NationalId]),
            RiskLevel::Critical
        );
        assert_eq!(classify_risk(&[PersonalDataType::Iban]), RiskLevel::Critical);
        assert_eq!(
            classify_risk(&[PersonalDataType::UnreadableContent]),
            RiskLevel::Critical
        );
    }

    #[test]
    fn test_four_categories_are_critical() {
        assert_eq!(
            classify_risk(&[
                PersonalDataType::Email,
                PersonalDataType::Phone,
                PersonalDataType::TaxId,
                PersonalDataType::DateOfBirth,
            ]),
            RiskLevel::Critical
        );
    }
}
