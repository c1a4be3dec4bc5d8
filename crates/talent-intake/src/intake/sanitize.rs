use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::domain::ApplicationSubmission;

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));

/// Remove every `<...>` run and trim the result.
///
/// Purely syntactic: matches are removed in a single left-to-right pass and the output is not
/// re-scanned. A stray `<` with no closing `>` after it is left in place.
pub fn strip_markup(raw: &str) -> String {
    MARKUP_TAG.replace_all(raw, "").trim().to_string()
}

/// Sanitize a loosely-typed form value. Anything that is not a JSON string becomes `""`.
pub fn sanitize(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(raw)) => strip_markup(raw),
        _ => String::new(),
    }
}

/// Sanitize each element of an array field, dropping elements that end up empty.
///
/// Returns `None` when the field is absent or not an array, so callers can tell "not
/// provided" apart from "provided but empty".
pub fn sanitize_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| sanitize(Some(item)))
                .filter(|item| !item.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

/// A submission after every user-supplied string has been through [`strip_markup`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizedSubmission {
    pub application_type: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub company: String,
    pub website: String,
    pub portfolio_url: String,
    pub linkedin_url: String,
    pub bio: String,
    pub referral_source: String,
    pub primary_discipline: String,
    pub disciplines: Option<Vec<String>>,
    /// Kept untyped: numbers pass through, strings are sanitized, everything else is dropped.
    pub years_experience: Option<Value>,
    pub vendor_type: String,
    pub services_offered: Option<Vec<String>>,
    pub website_url: String,
}

impl SanitizedSubmission {
    /// Whether the hidden trap field was filled in.
    pub fn is_honeypot_triggered(&self) -> bool {
        !self.website_url.is_empty()
    }
}

impl From<&ApplicationSubmission> for SanitizedSubmission {
    fn from(raw: &ApplicationSubmission) -> Self {
        let years_experience = match raw.years_experience.as_ref() {
            Some(Value::Number(number)) => Some(Value::Number(number.clone())),
            Some(Value::String(text)) => Some(Value::String(strip_markup(text))),
            _ => None,
        };

        Self {
            application_type: sanitize(raw.application_type.as_ref()),
            name: sanitize(raw.name.as_ref()),
            email: sanitize(raw.email.as_ref()),
            phone: sanitize(raw.phone.as_ref()),
            location: sanitize(raw.location.as_ref()),
            company: sanitize(raw.company.as_ref()),
            website: sanitize(raw.website.as_ref()),
            portfolio_url: sanitize(raw.portfolio_url.as_ref()),
            linkedin_url: sanitize(raw.linkedin_url.as_ref()),
            bio: sanitize(raw.bio.as_ref()),
            referral_source: sanitize(raw.referral_source.as_ref()),
            primary_discipline: sanitize(raw.primary_discipline.as_ref()),
            disciplines: sanitize_list(raw.disciplines.as_ref()),
            years_experience,
            vendor_type: sanitize(raw.vendor_type.as_ref()),
            services_offered: sanitize_list(raw.services_offered.as_ref()),
            website_url: sanitize(raw.website_url.as_ref()),
        }
    }
}
