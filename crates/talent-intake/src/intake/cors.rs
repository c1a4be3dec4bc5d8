//! Origin negotiation for the browser form.
//!
//! The allowed origin is echoed back verbatim rather than answered with `*`, so credentialed
//! requests work from every approved host. Method and header advertisements are sent on every
//! response whether or not the origin was approved.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, VARY,
};
use axum::http::{HeaderMap, HeaderValue};

/// Production sites that host the application form.
pub const PRODUCTION_ORIGINS: [&str; 2] = [
    "https://talentnetwork.studio",
    "https://www.talentnetwork.studio",
];

/// Any origin starting with this prefix is treated as a local development server.
pub const LOCAL_DEVELOPMENT_PREFIX: &str = "http://localhost";

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::with_extra_origins(std::iter::empty::<String>())
    }
}

impl CorsPolicy {
    /// The production allow-list plus any deployment-specific origins.
    pub fn with_extra_origins<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut allowed_origins: Vec<String> =
            PRODUCTION_ORIGINS.iter().map(|origin| origin.to_string()).collect();
        allowed_origins.extend(extra.into_iter().map(Into::into));
        Self { allowed_origins }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        origin.starts_with(LOCAL_DEVELOPMENT_PREFIX)
            || self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Response headers for a request carrying the given `Origin` header.
    pub fn headers_for(&self, origin: Option<&HeaderValue>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(VARY, HeaderValue::from_static("Origin"));

        if let Some(origin) = origin {
            if origin.to_str().is_ok_and(|value| self.is_allowed(value)) {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
            }
        }

        headers
    }
}
