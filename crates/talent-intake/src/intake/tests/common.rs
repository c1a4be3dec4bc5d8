use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};

use crate::intake::domain::NormalizedApplicationRecord;
use crate::intake::store::{ApplicationStore, StoreError};
use crate::intake::{intake_router, CorsPolicy, IntakeService};

pub(super) const BIO: &str =
    "Freelance photographer covering festivals, brand launches and backstage portraits.";

pub(super) fn talent_body() -> Value {
    json!({
        "type": "talent",
        "name": "Jo",
        "email": "jo@x.com",
        "bio": BIO,
        "primary_discipline": "Photography",
    })
}

pub(super) fn vendor_body() -> Value {
    json!({
        "type": "vendor",
        "name": "Northside Print Co",
        "email": "hello@northside.example",
        "bio": BIO,
        "vendor_type": "Print & Signage",
        "services_offered": ["Large format", "<b>Vinyl</b>", ""],
        "website": "https://northside.example",
    })
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<Vec<NormalizedApplicationRecord>>>,
}

impl MemoryStore {
    pub(super) fn records(&self) -> Vec<NormalizedApplicationRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert(&self, record: &NormalizedApplicationRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .push(record.clone());
        Ok(())
    }
}

pub(super) struct RejectingStore;

#[async_trait]
impl ApplicationStore for RejectingStore {
    async fn insert(&self, _record: &NormalizedApplicationRecord) -> Result<(), StoreError> {
        Err(StoreError::Rejected {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: r#"{"message":"Invalid API key","hint":"db-internal-hint"}"#.to_string(),
        })
    }
}

pub(super) struct PanickingStore;

#[async_trait]
impl ApplicationStore for PanickingStore {
    async fn insert(&self, _record: &NormalizedApplicationRecord) -> Result<(), StoreError> {
        panic!("store exploded mid-write");
    }
}

pub(super) fn build_service() -> (IntakeService<MemoryStore>, MemoryStore) {
    let store = MemoryStore::default();
    let service = IntakeService::new(CorsPolicy::default(), Arc::new(store.clone()));
    (service, store)
}

pub(super) fn router_with_service<S>(service: IntakeService<S>) -> axum::Router
where
    S: ApplicationStore + 'static,
{
    intake_router(Arc::new(service))
}

pub(super) fn post_json(origin: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::post("/")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, "intake-tests/1.0")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1");
    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).expect("body serializes")))
        .expect("request builds")
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("body is json")
}

pub(super) async fn assert_ok_response(response: Response) {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!({ "ok": true }));
}

pub(super) fn details(payload: &Value) -> Vec<String> {
    payload["details"]
        .as_array()
        .expect("details array present")
        .iter()
        .map(|detail| detail.as_str().expect("detail is a string").to_string())
        .collect()
}
