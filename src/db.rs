use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    entities::{Ride, RideDocument},
    error::Error,
};

/// Document store holding ride records.
#[async_trait]
pub trait RideStore {
    /// Fresh identifier for a document that does not exist yet.
    fn new_ride_id(&self) -> String;

    /// Writes `ride` under `id`. The timestamp is taken from the store's own clock.
    async fn create_ride(&self, id: &str, ride: &RideDocument) -> Result<Ride, Error>;
}

pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip_all)]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        // TODO: move this to migrations
        pool.execute("CREATE TABLE IF NOT EXISTS rides (id VARCHAR PRIMARY KEY, status VARCHAR NOT NULL, data JSONB NOT NULL, created_at TIMESTAMPTZ NOT NULL DEFAULT now())")
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl RideStore for PgStore {
    fn new_ride_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    #[tracing::instrument(skip(self, ride))]
    async fn create_ride(&self, id: &str, ride: &RideDocument) -> Result<Ride, Error> {
        let row = self
            .pool
            .fetch_one(
                sqlx::query(
                    "INSERT INTO rides (id, status, data) VALUES ($1, $2, $3) RETURNING created_at",
                )
                .bind(id)
                .bind(ride.status.name())
                .bind(Json(ride)),
            )
            .await?;

        let timestamp: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Ride::new(id.into(), ride.clone(), timestamp))
    }
}

/// Process-local store. Rides live as long as the process does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rides: Mutex<Vec<Ride>>,
}

impl MemoryStore {
    pub async fn rides(&self) -> Vec<Ride> {
        self.rides.lock().await.clone()
    }
}

#[async_trait]
impl RideStore for MemoryStore {
    fn new_ride_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    #[tracing::instrument(skip(self, ride))]
    async fn create_ride(&self, id: &str, ride: &RideDocument) -> Result<Ride, Error> {
        let ride = Ride::new(id.into(), ride.clone(), Utc::now());

        self.rides.lock().await.push(ride.clone());

        Ok(ride)
    }
}

#[test]
fn memory_store_create_ride_test() {
    use crate::entities::{RideDetails, RideStatus};

    let store = MemoryStore::default();
    let details = RideDetails {
        pickup: "Pier 4".into(),
        dropoff: "Dock B".into(),
        boat_type: "skiff".into(),
    };
    let document = RideDocument::pending("u1".into(), details);

    let before = Utc::now();
    let id = store.new_ride_id();
    let ride = tokio_test::block_on(store.create_ride(&id, &document)).unwrap();

    assert_eq!(ride.id, id);
    assert_eq!(ride.passenger_id, "u1");
    assert_eq!(ride.status, RideStatus::Pending);
    assert!(ride.timestamp >= before);

    let rides = tokio_test::block_on(store.rides());
    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0].id, id);
}

#[test]
fn memory_store_ids_are_unique_test() {
    let store = MemoryStore::default();

    assert_ne!(store.new_ride_id(), store.new_ride_id());
}
