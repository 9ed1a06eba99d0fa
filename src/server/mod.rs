mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Extension, routing::post, Router};

use crate::server::handlers::rides;
use crate::{api::API, auth::IdentityHeader, error::server_error, error::Error};

type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router<T: API + Sync + Send + 'static>(api: T, identity_header: IdentityHeader) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/requestRide", post(rides::request_ride))
        .layer(Extension(api))
        .layer(Extension(identity_header))
}

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    addr: SocketAddr,
    identity_header: IdentityHeader,
) -> Result<(), Error> {
    let app = router(api, identity_header);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(server_error)
}

#[cfg(test)]
async fn post_request_ride(
    app: Router,
    header: (&str, &str),
    body: &'static str,
) -> (axum::http::StatusCode, serde_json::Value) {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let request = Request::builder()
        .method("POST")
        .uri("/requestRide")
        .header("content-type", "application/json")
        .header(header.0, header.1)
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn request_ride_through_router_test() {
    use axum::http::{header::HeaderName, StatusCode};

    use crate::db::MemoryStore;
    use crate::engine::Engine;

    let store = Arc::new(MemoryStore::default());
    let app = router(
        Engine::with_store(store.clone()),
        IdentityHeader(HeaderName::from_static("x-passenger")),
    );

    let (status, body) = post_request_ride(
        app.clone(),
        ("x-passenger", "u1"),
        r#"{"data": {"pickup": " Pier 4 ", "dropoff": "Dock B", "boatType": "skiff"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["message"], "Ride request submitted successfully!");

    let rides = store.rides().await;
    assert_eq!(rides.len(), 1);
    assert_eq!(body["result"]["rideId"], rides[0].id.as_str());
    assert_eq!(rides[0].passenger_id, "u1");
    assert_eq!(rides[0].pickup_location, "Pier 4");

    // the default header is ignored once another one is configured
    let (status, body) = post_request_ride(
        app.clone(),
        ("x-authenticated-uid", "u1"),
        r#"{"data": {"pickup": "Pier 4", "dropoff": "Dock B", "boatType": "skiff"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["status"], "unauthenticated");

    let (status, body) = post_request_ride(
        app,
        ("x-passenger", "u1"),
        r#"{"data": {"pickup": "  ", "dropoff": "Dock B", "boatType": "skiff"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], "invalid-argument");

    assert_eq!(store.rides().await.len(), 1);
}
