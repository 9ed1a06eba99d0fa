use axum::{
    body::Bytes,
    extract::{Extension, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Caller;
use crate::entities::RideReceipt;
use crate::error::Error;
use crate::server::DynAPI;

/// Body of a callable invocation. The arguments travel in `data`.
#[derive(Default, Deserialize)]
pub struct CallableRequest {
    #[serde(default)]
    data: Value,
}

impl CallableRequest {
    /// Unreadable bodies carry no arguments; validation rejects them after the caller is checked.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct CallableResponse<T> {
    result: T,
}

pub async fn request_ride(
    Extension(api): Extension<DynAPI>,
    Caller(caller): Caller,
    body: Bytes,
) -> Result<Json<CallableResponse<RideReceipt>>, Error> {
    let CallableRequest { data } = CallableRequest::from_body(&body);
    let receipt = api.submit_ride_request(caller, data).await?;

    Ok(CallableResponse { result: receipt }.into())
}

#[test]
fn callable_request_test() {
    let request = CallableRequest::from_body(
        br#"{"data": {"pickup": "Pier 4", "dropoff": "Dock B", "boatType": "skiff"}}"#,
    );
    assert_eq!(request.data["pickup"], "Pier 4");

    let request = CallableRequest::from_body(b"");
    assert!(request.data.is_null());

    let request = CallableRequest::from_body(b"{not json");
    assert!(request.data.is_null());

    let request = CallableRequest::from_body(br#"{"pickup": "Pier 4"}"#);
    assert!(request.data.is_null());
}

#[test]
fn request_ride_test() {
    use std::sync::Arc;

    use axum::http::{HeaderMap, HeaderValue};

    use crate::auth::{principal_from_headers, IdentityHeader, DEFAULT_IDENTITY_HEADER};
    use crate::db::MemoryStore;
    use crate::engine::Engine;

    let store = Arc::new(MemoryStore::default());
    let api = Arc::new(Engine::with_store(store.clone())) as DynAPI;

    let mut headers = HeaderMap::new();
    headers.insert(DEFAULT_IDENTITY_HEADER, HeaderValue::from_static("u1"));
    let caller = Caller(principal_from_headers(&headers, &IdentityHeader::default()));

    let body = Bytes::from_static(
        br#"{"data": {"pickup": " Pier 4 ", "dropoff": "Dock B", "boatType": "skiff"}}"#,
    );

    let Json(response) =
        tokio_test::block_on(request_ride(Extension(api.clone()), caller, body)).unwrap();
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["result"]["message"], "Ride request submitted successfully!");

    let rides = tokio_test::block_on(store.rides());
    assert_eq!(rides.len(), 1);
    assert_eq!(value["result"]["rideId"], rides[0].id.as_str());

    let err = tokio_test::block_on(request_ride(
        Extension(api),
        Caller(None),
        Bytes::from_static(b"{not json"),
    ))
    .unwrap_err();
    assert_eq!(err.status(), "unauthenticated");
}
