//! Application intake: origin negotiation, sanitization, honeypot screening, validation,
//! record shaping and the single write to the persistence API.

pub mod cors;
pub mod domain;
pub mod record;
pub mod router;
pub mod sanitize;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use cors::CorsPolicy;
pub use domain::{
    ApplicationSubmission, ApplicationType, NormalizedApplicationRecord, RequestMetadata,
    PRIMARY_DISCIPLINES, VENDOR_TYPES,
};
pub use router::{intake_router, MAX_BODY_BYTES};
pub use sanitize::{sanitize, strip_markup, SanitizedSubmission};
pub use service::{
    prepare_submission, IntakeError, IntakeOutcome, IntakeService, PreparedSubmission,
    SUBMISSIONS_METRIC,
};
pub use store::{ApplicationStore, RestApplicationStore, StoreError};
pub use validation::{validate, ValidatedApplication, ValidationErrors, ValidationIssue};
