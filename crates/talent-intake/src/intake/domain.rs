use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Talent disciplines accepted for `primary_discipline`.
pub const PRIMARY_DISCIPLINES: [&str; 15] = [
    "Photography",
    "Videography",
    "Directing",
    "Graphic Design",
    "Motion Design",
    "Web Development",
    "App Development",
    "Production Management",
    "Event Management",
    "AV Engineering",
    "Sound Design",
    "Lighting Design",
    "Fabrication",
    "Styling",
    "Other",
];

/// Vendor categories accepted for `vendor_type`.
pub const VENDOR_TYPES: [&str; 9] = [
    "Fabrication & Build",
    "Print & Signage",
    "AV & Equipment Rental",
    "Catering & F&B",
    "Venue",
    "Furniture & Decor Rental",
    "Staffing",
    "Transportation & Logistics",
    "Other",
];

/// Raw submission exactly as posted by the form.
///
/// Every field is kept as an untyped JSON value so that a number or object posted where a
/// string is expected degrades to an empty string during sanitization instead of rejecting
/// the whole body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApplicationSubmission {
    #[serde(default, rename = "type")]
    pub application_type: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub company: Option<Value>,
    #[serde(default)]
    pub website: Option<Value>,
    #[serde(default)]
    pub portfolio_url: Option<Value>,
    #[serde(default)]
    pub linkedin_url: Option<Value>,
    #[serde(default)]
    pub bio: Option<Value>,
    #[serde(default)]
    pub referral_source: Option<Value>,
    #[serde(default)]
    pub primary_discipline: Option<Value>,
    #[serde(default)]
    pub disciplines: Option<Value>,
    #[serde(default)]
    pub years_experience: Option<Value>,
    #[serde(default)]
    pub vendor_type: Option<Value>,
    #[serde(default)]
    pub services_offered: Option<Value>,
    /// Hidden honeypot input; humans never see it, so any value means a bot filled it in.
    #[serde(default)]
    pub website_url: Option<Value>,
}

impl ApplicationSubmission {
    /// Parse a request body. Only a JSON object counts as a submission.
    pub fn from_json(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(body).ok()? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

/// The two kinds of application the form supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    Talent,
    Vendor,
}

impl ApplicationType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "talent" => Some(Self::Talent),
            "vendor" => Some(Self::Vendor),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationType::Talent => "talent",
            ApplicationType::Vendor => "vendor",
        }
    }
}

/// Audit fields captured from the inbound request rather than the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestMetadata {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let forwarded = header_str(headers, "x-forwarded-for")
            .and_then(|raw| raw.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        let ip_address = forwarded
            .or_else(|| header_str(headers, "x-real-ip").map(str::trim))
            .filter(|ip| !ip.is_empty())
            .map(str::to_string);

        let user_agent = header_str(headers, "user-agent")
            .filter(|agent| !agent.is_empty())
            .map(str::to_string);

        Self {
            ip_address,
            user_agent,
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Shaped record written to the persistence API.
///
/// Serialized field names match the target table's columns; optional columns are written as
/// explicit `null` so "not provided" stays distinguishable from an empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedApplicationRecord {
    #[serde(rename = "type")]
    pub application_type: ApplicationType,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub bio: String,
    pub referral_source: Option<String>,
    pub primary_discipline: Option<String>,
    pub disciplines: Option<Vec<String>>,
    pub years_experience: Option<Number>,
    pub vendor_type: Option<String>,
    pub services_offered: Option<Vec<String>>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
