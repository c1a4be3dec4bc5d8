use serde_json::{Number, Value};

use super::domain::{NormalizedApplicationRecord, RequestMetadata};
use super::validation::ValidatedApplication;

impl NormalizedApplicationRecord {
    /// Shape a validated submission into the row written to the persistence API.
    pub fn from_validated(validated: ValidatedApplication, metadata: RequestMetadata) -> Self {
        let ValidatedApplication {
            application_type,
            fields,
        } = validated;

        Self {
            application_type,
            name: fields.name,
            email: fields.email,
            phone: non_empty(fields.phone),
            location: non_empty(fields.location),
            company: non_empty(fields.company),
            website: non_empty(fields.website),
            portfolio_url: non_empty(fields.portfolio_url),
            linkedin_url: non_empty(fields.linkedin_url),
            bio: fields.bio,
            referral_source: non_empty(fields.referral_source),
            primary_discipline: non_empty(fields.primary_discipline),
            disciplines: fields.disciplines,
            years_experience: fields.years_experience.as_ref().and_then(coerce_number),
            vendor_type: non_empty(fields.vendor_type),
            services_offered: fields.services_offered,
            ip_address: metadata.ip_address,
            user_agent: metadata.user_agent,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Numbers pass through; numeric strings become integers where possible, floats otherwise.
/// Anything else, including non-finite values, becomes `None` rather than zero.
fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(number) => Some(number.clone()),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(whole) = text.parse::<i64>() {
                return Some(Number::from(whole));
            }
            text.parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite())
                .and_then(Number::from_f64)
        }
        _ => None,
    }
}
