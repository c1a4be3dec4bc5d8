use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, info};

use super::cors::CorsPolicy;
use super::domain::{ApplicationSubmission, NormalizedApplicationRecord, RequestMetadata};
use super::sanitize::SanitizedSubmission;
use super::store::{ApplicationStore, StoreError};
use super::validation::{validate, ValidationErrors};

/// Counter of handled submissions, labelled by `outcome`.
pub const SUBMISSIONS_METRIC: &str = "intake_submissions_total";

/// Result of running a body through sanitization, the honeypot and validation.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedSubmission {
    /// The trap field was filled in; the caller is told "ok" and nothing is stored.
    Honeypot,
    Accepted(Box<NormalizedApplicationRecord>),
}

/// Outcome of a successful `submit`. Both variants answer the caller with `{ok: true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeOutcome {
    Saved,
    Discarded,
}

/// Per-request failures. Each variant maps onto exactly one HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Server configuration error")]
    NotConfigured,
    #[error("Missing request body")]
    MissingBody,
    #[error("Validation failed")]
    Validation(#[source] ValidationErrors),
    #[error("Failed to save application")]
    Store(#[source] StoreError),
}

impl IntakeError {
    pub fn status(&self) -> StatusCode {
        match self {
            IntakeError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            IntakeError::MissingBody | IntakeError::Validation(_) => StatusCode::BAD_REQUEST,
            IntakeError::NotConfigured | IntakeError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            IntakeError::Validation(errors) => json!({
                "error": self.to_string(),
                "details": errors.messages(),
            }),
            // Upstream detail stays in the logs; the caller only sees the display text.
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Sanitize, screen and validate a raw body without touching the store.
pub fn prepare_submission(
    body: &[u8],
    metadata: RequestMetadata,
) -> Result<PreparedSubmission, IntakeError> {
    let raw = ApplicationSubmission::from_json(body).ok_or(IntakeError::MissingBody)?;
    let sanitized = SanitizedSubmission::from(&raw);

    if sanitized.is_honeypot_triggered() {
        return Ok(PreparedSubmission::Honeypot);
    }

    let validated = validate(sanitized).map_err(IntakeError::Validation)?;
    let record = NormalizedApplicationRecord::from_validated(validated, metadata);
    Ok(PreparedSubmission::Accepted(Box::new(record)))
}

/// Service composing the origin policy and the persistence store.
pub struct IntakeService<S> {
    cors: CorsPolicy,
    store: Option<Arc<S>>,
}

impl<S> IntakeService<S>
where
    S: ApplicationStore + 'static,
{
    pub fn new(cors: CorsPolicy, store: Arc<S>) -> Self {
        Self {
            cors,
            store: Some(store),
        }
    }

    /// A service with no persistence credentials; every submission fails with a
    /// configuration error.
    pub fn unconfigured(cors: CorsPolicy) -> Self {
        Self { cors, store: None }
    }

    pub fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    /// Run one POST body through the full pipeline and, if accepted, write it.
    pub async fn submit(
        &self,
        body: &[u8],
        metadata: RequestMetadata,
    ) -> Result<IntakeOutcome, IntakeError> {
        let Some(store) = self.store.as_ref() else {
            error!("persistence credentials missing; rejecting submission");
            record_outcome("failed");
            return Err(IntakeError::NotConfigured);
        };

        let caller_ip = metadata.ip_address.clone();
        let record = match prepare_submission(body, metadata) {
            Ok(PreparedSubmission::Accepted(record)) => record,
            Ok(PreparedSubmission::Honeypot) => {
                info!(ip = ?caller_ip, "honeypot field filled; discarding submission");
                record_outcome("honeypot");
                return Ok(IntakeOutcome::Discarded);
            }
            Err(IntakeError::Validation(errors)) => {
                info!(issues = errors.issues().len(), "submission failed validation");
                record_outcome("invalid");
                return Err(IntakeError::Validation(errors));
            }
            Err(other) => {
                record_outcome("invalid");
                return Err(other);
            }
        };

        if let Err(err) = store.insert(&record).await {
            match &err {
                StoreError::Rejected { status, body } => {
                    error!(%status, %body, "persistence API rejected application");
                }
                StoreError::Transport(source) => {
                    error!(error = %source, "persistence API request failed");
                }
            }
            record_outcome("failed");
            return Err(IntakeError::Store(err));
        }

        info!(
            application_type = record.application_type.label(),
            "application saved"
        );
        record_outcome("accepted");
        Ok(IntakeOutcome::Saved)
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!(SUBMISSIONS_METRIC, "outcome" => outcome).increment(1);
}
