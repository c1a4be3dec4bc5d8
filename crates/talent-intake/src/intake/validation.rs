use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

use super::domain::{ApplicationType, PRIMARY_DISCIPLINES, VENDOR_TYPES};
use super::sanitize::SanitizedSubmission;

const MIN_NAME_CHARS: usize = 2;
const MIN_BIO_CHARS: usize = 50;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A single rule the submission failed. The display text is what the form shows the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("Invalid application type")]
    InvalidType,
    #[error("Name is required (min 2 characters)")]
    NameTooShort,
    #[error("Valid email is required")]
    InvalidEmail,
    #[error("Bio must be at least 50 characters")]
    BioTooShort,
    #[error("Primary discipline is required")]
    MissingPrimaryDiscipline,
    #[error("Vendor type is required")]
    MissingVendorType,
    #[error("Invalid website URL")]
    InvalidWebsite,
    #[error("Invalid portfolio URL")]
    InvalidPortfolioUrl,
    #[error("Invalid LinkedIn URL")]
    InvalidLinkedinUrl,
}

/// Every rule that failed, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    /// User-facing messages for the `details` array of a 400 response.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A sanitized submission whose `type` has been pinned down and whose rules all passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedApplication {
    pub application_type: ApplicationType,
    pub fields: SanitizedSubmission,
}

/// Check every rule and collect all failures rather than stopping at the first.
pub fn validate(fields: SanitizedSubmission) -> Result<ValidatedApplication, ValidationErrors> {
    let mut issues = Vec::new();

    let application_type = ApplicationType::parse(&fields.application_type);
    if application_type.is_none() {
        issues.push(ValidationIssue::InvalidType);
    }

    if fields.name.chars().count() < MIN_NAME_CHARS {
        issues.push(ValidationIssue::NameTooShort);
    }

    if !EMAIL_SHAPE.is_match(&fields.email) {
        issues.push(ValidationIssue::InvalidEmail);
    }

    if fields.bio.chars().count() < MIN_BIO_CHARS {
        issues.push(ValidationIssue::BioTooShort);
    }

    match application_type {
        Some(ApplicationType::Talent)
            if !PRIMARY_DISCIPLINES.contains(&fields.primary_discipline.as_str()) =>
        {
            issues.push(ValidationIssue::MissingPrimaryDiscipline);
        }
        Some(ApplicationType::Vendor) if !VENDOR_TYPES.contains(&fields.vendor_type.as_str()) => {
            issues.push(ValidationIssue::MissingVendorType);
        }
        _ => {}
    }

    let optional_urls = [
        (&fields.website, ValidationIssue::InvalidWebsite),
        (&fields.portfolio_url, ValidationIssue::InvalidPortfolioUrl),
        (&fields.linkedin_url, ValidationIssue::InvalidLinkedinUrl),
    ];
    for (value, issue) in optional_urls {
        if !value.is_empty() && !is_absolute_url(value) {
            issues.push(issue);
        }
    }

    match application_type {
        Some(application_type) if issues.is_empty() => Ok(ValidatedApplication {
            application_type,
            fields,
        }),
        _ => Err(ValidationErrors(issues)),
    }
}

/// Any scheme is accepted as long as the URL parses as absolute.
fn is_absolute_url(raw: &str) -> bool {
    Url::parse(raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talent() -> SanitizedSubmission {
        SanitizedSubmission {
            application_type: "talent".to_string(),
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            bio: "Photographer covering live music, brand launches and festivals.".to_string(),
            primary_discipline: "Photography".to_string(),
            ..SanitizedSubmission::default()
        }
    }

    fn vendor() -> SanitizedSubmission {
        SanitizedSubmission {
            application_type: "vendor".to_string(),
            vendor_type: "Print & Signage".to_string(),
            primary_discipline: String::new(),
            ..talent()
        }
    }

    #[test]
    fn accepts_complete_talent_submission() {
        let validated = validate(talent()).expect("talent submission is valid");
        assert_eq!(validated.application_type, ApplicationType::Talent);
    }

    #[test]
    fn accepts_complete_vendor_submission() {
        let validated = validate(vendor()).expect("vendor submission is valid");
        assert_eq!(validated.application_type, ApplicationType::Vendor);
    }

    #[test]
    fn collects_every_failure_in_order() {
        let fields = SanitizedSubmission {
            application_type: "vendor".to_string(),
            name: "A".to_string(),
            email: "bad-email".to_string(),
            bio: "short".to_string(),
            ..SanitizedSubmission::default()
        };

        let errors = validate(fields).expect_err("submission is invalid");
        assert_eq!(
            errors.issues(),
            &[
                ValidationIssue::NameTooShort,
                ValidationIssue::InvalidEmail,
                ValidationIssue::BioTooShort,
                ValidationIssue::MissingVendorType,
            ]
        );
        assert_eq!(
            errors.messages(),
            vec![
                "Name is required (min 2 characters)",
                "Valid email is required",
                "Bio must be at least 50 characters",
                "Vendor type is required",
            ]
        );
    }

    #[test]
    fn unknown_type_skips_type_specific_rules() {
        let fields = SanitizedSubmission {
            application_type: "agency".to_string(),
            primary_discipline: String::new(),
            ..talent()
        };

        let errors = validate(fields).expect_err("type is invalid");
        assert_eq!(errors.issues(), &[ValidationIssue::InvalidType]);
    }

    #[test]
    fn discipline_must_come_from_the_fixed_set() {
        let fields = SanitizedSubmission {
            primary_discipline: "photography".to_string(),
            ..talent()
        };
        let errors = validate(fields).expect_err("discipline is case sensitive");
        assert!(errors
            .issues()
            .contains(&ValidationIssue::MissingPrimaryDiscipline));

        let fields = SanitizedSubmission {
            vendor_type: "Caterer".to_string(),
            ..vendor()
        };
        let errors = validate(fields).expect_err("vendor type is unknown");
        assert_eq!(errors.issues(), &[ValidationIssue::MissingVendorType]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let fields = SanitizedSubmission {
            name: "Zoë".to_string(),
            bio: "é".repeat(49),
            ..talent()
        };
        let errors = validate(fields).expect_err("bio is one character short");
        assert_eq!(errors.issues(), &[ValidationIssue::BioTooShort]);

        let fields = SanitizedSubmission {
            name: "李".to_string(),
            bio: "é".repeat(50),
            ..talent()
        };
        let errors = validate(fields).expect_err("single character name");
        assert_eq!(errors.issues(), &[ValidationIssue::NameTooShort]);
    }

    #[test]
    fn email_shape_rules() {
        for email in ["jo@x.com", "first.last+tag@studio.co.uk"] {
            let fields = SanitizedSubmission {
                email: email.to_string(),
                ..talent()
            };
            assert!(validate(fields).is_ok(), "{email} should be accepted");
        }

        for email in ["", "jo@x", "jo x@y.com", "@x.com", "jo@@x.com", "jo@x."] {
            let fields = SanitizedSubmission {
                email: email.to_string(),
                ..talent()
            };
            let errors = validate(fields).expect_err("email rejected");
            assert_eq!(errors.issues(), &[ValidationIssue::InvalidEmail], "{email}");
        }
    }

    #[test]
    fn optional_urls_must_be_absolute_when_present() {
        let fields = SanitizedSubmission {
            website: "studio.example".to_string(),
            portfolio_url: "not a url".to_string(),
            linkedin_url: "/in/jo".to_string(),
            ..talent()
        };
        let errors = validate(fields).expect_err("urls are relative");
        assert_eq!(
            errors.messages(),
            vec![
                "Invalid website URL",
                "Invalid portfolio URL",
                "Invalid LinkedIn URL"
            ]
        );

        let fields = SanitizedSubmission {
            website: "https://studio.example".to_string(),
            portfolio_url: "ftp://files.example/reel".to_string(),
            linkedin_url: String::new(),
            ..talent()
        };
        assert!(validate(fields).is_ok());
    }
}
