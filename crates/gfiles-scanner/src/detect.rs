//! Personal-data category detection.

use regex::Regex;
use serde::{Deserialize, Serialize};

use gfiles_entity::scan::{PersonalDataType, RiskLevel};

use crate::classifier::classify_risk;

/// Input to one scan.
#[derive(Debug, Clone)]
pub struct ScanInput<'a> {
    /// Path of the file.
    pub file_path: &'a str,
    /// File name.
    pub file_name: &'a str,
    /// File type / extension, if known.
    pub file_type: Option<&'a str>,
    /// Decoded text content. `None` means the content could not be read
    /// or decoded.
    pub content: Option<&'a str>,
}

/// Result of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Whether any personal data was detected.
    pub has_personal_data: bool,
    /// Detected categories, sorted and deduplicated.
    pub personal_data_types: Vec<PersonalDataType>,
    /// Derived risk level.
    pub risk_level: RiskLevel,
    /// Errors encountered while reading the content.
    pub errors: Vec<String>,
}

/// Scans text content for personal-data categories using compiled
/// patterns.
#[derive(Debug)]
pub struct PersonalDataScanner {
    detectors: Vec<(PersonalDataType, Regex)>,
}

impl PersonalDataScanner {
    /// Create a scanner with the built-in category detectors.
    pub fn new() -> Self {
        let patterns: &[(PersonalDataType, &str)] = &[
            (
                PersonalDataType::Email,
                r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b",
            ),
            // Requires a leading + or 0 so card numbers don't double-count.
            (
                PersonalDataType::Phone,
                r"(?:\+|\b0)[0-9][0-9 \-/]{6,}[0-9]\b",
            ),
            // EU VAT format: country prefix + 8-12 digits.
            (PersonalDataType::TaxId, r"\b[A-Z]{2}[0-9]{8,12}\b"),
            (PersonalDataType::NationalId, r"\b[0-9]{3}-[0-9]{2}-[0-9]{4}\b"),
            (
                PersonalDataType::Iban,
                r"\b[A-Z]{2}[0-9]{2}[A-Z0-9]{11,30}\b",
            ),
            (
                PersonalDataType::CreditCard,
                r"\b[0-9]{4}[ -]?[0-9]{4}[ -]?[0-9]{4}[ -]?[0-9]{4}\b",
            ),
            (
                PersonalDataType::DateOfBirth,
                r"(?i)\b(?:born|birth|dob|geb(?:oren)?)\b.{0,20}\b[0-9]{1,2}[./-][0-9]{1,2}[./-][0-9]{2,4}\b",
            ),
        ];

        let detectors = patterns
            .iter()
            .filter_map(|(tag, pattern)| Regex::new(pattern).ok().map(|re| (*tag, re)))
            .collect();

        Self { detectors }
    }

    /// Scan one file.
    ///
    /// Unreadable content classifies conservatively: the file is treated
    /// as carrying personal data at critical risk rather than silently
    /// passing.
    pub fn scan(&self, input: &ScanInput<'_>) -> Classification {
        let Some(content) = input.content else {
            return Classification {
                has_personal_data: true,
                personal_data_types: vec![PersonalDataType::UnreadableContent],
                risk_level: RiskLevel::Critical,
                errors: vec![format!(
                    "content of '{}' could not be read or decoded",
                    input.file_path
                )],
            };
        };

        let mut detected: Vec<PersonalDataType> = self
            .detectors
            .iter()
            .filter(|(_, re)| re.is_match(content))
            .map(|(tag, _)| *tag)
            .collect();
        detected.sort();
        detected.dedup();

        let risk_level = classify_risk(&detected);

        Classification {
            has_personal_data: !detected.is_empty(),
            personal_data_types: detected,
            risk_level,
            errors: Vec::new(),
        }
    }
}

impl Default for PersonalDataScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_text(content: &str) -> Classification {
        let scanner = PersonalDataScanner::new();
        scanner.scan(&ScanInput {
            file_path: "/docs/test.txt",
            file_name: "test.txt",
            file_type: Some("txt"),
            content: Some(content),
        })
    }

    #[test]
    fn test_clean_content() {
        let result = scan_text("quarterly numbers look fine, ship it");
        assert!(!result.has_personal_data);
        assert!(result.personal_data_types.is_empty());
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_email_detection() {
        let result = scan_text("contact anna.schmidt@example.com for details");
        assert!(result.has_personal_data);
        assert_eq!(result.personal_data_types, vec![PersonalDataType::Email]);
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_phone_detection() {
        let result = scan_text("call +49 170 123456 tomorrow");
        assert!(result
            .personal_data_types
            .contains(&PersonalDataType::Phone));
    }

    #[test]
    fn test_vat_number_detection() {
        let result = scan_text("invoice for DE123456789");
        assert!(result
            .personal_data_types
            .contains(&PersonalDataType::TaxId));
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_iban_and_card_are_critical() {
        let result = scan_text("pay to DE44500105175407324931");
        assert!(result.personal_data_types.contains(&PersonalDataType::Iban));
        assert_eq!(result.risk_level, RiskLevel::Critical);

        let result = scan_text("card 4111 1111 1111 1111 on file");
        assert!(result
            .personal_data_types
            .contains(&PersonalDataType::CreditCard));
        assert_eq!(result.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_date_of_birth_requires_context() {
        let with_context = scan_text("born 12.03.1985 in Hamburg");
        assert!(with_context
            .personal_data_types
            .contains(&PersonalDataType::DateOfBirth));

        let without_context = scan_text("meeting moved to 12.03.2024");
        assert!(!without_context
            .personal_data_types
            .contains(&PersonalDataType::DateOfBirth));
    }

    #[test]
    fn test_card_number_does_not_count_as_phone() {
        let result = scan_text("card 4111 1111 1111 1111 on file");
        assert!(!result
            .personal_data_types
            .contains(&PersonalDataType::Phone));
    }

    #[test]
    fn test_unreadable_content_is_conservative() {
        let scanner = PersonalDataScanner::new();
        let result = scanner.scan(&ScanInput {
            file_path: "/docs/blob.bin",
            file_name: "blob.bin",
            file_type: Some("bin"),
            content: None,
        });
        assert!(result.has_personal_data);
        assert_eq!(
            result.personal_data_types,
            vec![PersonalDataType::UnreadableContent]
        );
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let content = "anna@example.com, DE123456789, +49 170 1234567";
        let first = scan_text(content);
        let second = scan_text(content);
        assert_eq!(first.personal_data_types, second.personal_data_types);
        assert_eq!(first.risk_level, second.risk_level);
    }
}
