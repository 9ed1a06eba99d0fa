use super::Engine;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    api::RideAPI,
    auth::Principal,
    entities::{RideDetails, RideDocument, RideReceipt},
    error::{unauthenticated_error, Error},
};

#[async_trait]
impl RideAPI for Engine {
    #[tracing::instrument(skip(self, payload))]
    async fn submit_ride_request(
        &self,
        caller: Option<Principal>,
        payload: Value,
    ) -> Result<RideReceipt, Error> {
        let principal = caller.ok_or_else(|| unauthenticated_error())?;
        let details = RideDetails::from_payload(&payload)?;

        let ride_id = self.store.new_ride_id();
        let document = RideDocument::pending(principal.uid, details);

        let ride = self.store.create_ride(&ride_id, &document).await?;

        tracing::info!(
            ride_id = %ride.id,
            passenger_id = %ride.passenger_id,
            pickup = %ride.pickup_location,
            dropoff = %ride.dropoff_location,
            boat_type = %ride.boat_type,
            "new ride request"
        );

        Ok(RideReceipt::new(ride.id))
    }
}

#[cfg(test)]
fn engine_with_memory_store() -> (Engine, std::sync::Arc<crate::db::MemoryStore>) {
    let store = std::sync::Arc::new(crate::db::MemoryStore::default());
    let engine = Engine::with_store(store.clone());

    (engine, store)
}

#[test]
fn pending_ride_is_recorded_test() {
    use crate::entities::RideStatus;
    use serde_json::json;

    let (engine, store) = engine_with_memory_store();

    let payload = json!({ "pickup": " Pier 4 ", "dropoff": "Dock B", "boatType": "skiff" });
    let receipt =
        tokio_test::block_on(engine.submit_ride_request(Some(Principal::new("u1")), payload))
            .unwrap();

    assert_eq!(receipt.message, "Ride request submitted successfully!");

    let rides = tokio_test::block_on(store.rides());
    assert_eq!(rides.len(), 1);

    let ride = &rides[0];
    assert_eq!(ride.id, receipt.ride_id);
    assert_eq!(ride.passenger_id, "u1");
    assert_eq!(ride.pickup_location, "Pier 4");
    assert_eq!(ride.dropoff_location, "Dock B");
    assert_eq!(ride.boat_type, "skiff");
    assert_eq!(ride.status, RideStatus::Pending);
}

#[test]
fn empty_pickup_is_rejected_test() {
    use serde_json::json;

    let (engine, store) = engine_with_memory_store();

    let payload = json!({ "pickup": "", "dropoff": "Dock B", "boatType": "skiff" });
    let err = tokio_test::block_on(engine.submit_ride_request(Some(Principal::new("u1")), payload))
        .unwrap_err();

    assert_eq!(err.status(), "invalid-argument");
    assert!(tokio_test::block_on(store.rides()).is_empty());
}

#[test]
fn unauthenticated_caller_is_rejected_test() {
    use serde_json::json;

    let (engine, store) = engine_with_memory_store();

    let payloads = vec![
        json!({ "pickup": "Pier 4", "dropoff": "Dock B", "boatType": "skiff" }),
        json!({ "pickup": "", "dropoff": "Dock B", "boatType": "skiff" }),
        json!(null),
    ];

    for payload in payloads {
        let err = tokio_test::block_on(engine.submit_ride_request(None, payload)).unwrap_err();
        assert_eq!(err.status(), "unauthenticated");
    }

    assert!(tokio_test::block_on(store.rides()).is_empty());
}

#[test]
fn repeated_requests_create_distinct_rides_test() {
    use serde_json::json;

    let (engine, store) = engine_with_memory_store();

    let payload = json!({ "pickup": "Pier 4", "dropoff": "Dock B", "boatType": "skiff" });

    let first = tokio_test::block_on(
        engine.submit_ride_request(Some(Principal::new("u1")), payload.clone()),
    )
    .unwrap();
    let second =
        tokio_test::block_on(engine.submit_ride_request(Some(Principal::new("u1")), payload))
            .unwrap();

    assert_ne!(first.ride_id, second.ride_id);

    let rides = tokio_test::block_on(store.rides());
    assert_eq!(rides.len(), 2);
    assert!(rides.iter().all(|ride| ride.passenger_id == "u1"));
}

#[test]
fn passenger_id_comes_from_caller_test() {
    use serde_json::json;

    let (engine, store) = engine_with_memory_store();

    let payload = json!({
        "pickup": "Pier 4",
        "dropoff": "Dock B",
        "boatType": "skiff",
        "passengerId": "someone-else",
    });
    tokio_test::block_on(engine.submit_ride_request(Some(Principal::new("u1")), payload))
        .unwrap();

    let rides = tokio_test::block_on(store.rides());
    assert_eq!(rides[0].passenger_id, "u1");
}
