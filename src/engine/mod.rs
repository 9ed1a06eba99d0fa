mod ride_api;

use std::sync::Arc;

use crate::{api::API, db::RideStore};

type DynStore = Arc<dyn RideStore + Send + Sync>;

pub struct Engine {
    store: DynStore,
}

impl Engine {
    pub fn new<S: RideStore + Send + Sync + 'static>(store: S) -> Self {
        Self::with_store(Arc::new(store))
    }

    pub fn with_store(store: DynStore) -> Self {
        Self { store }
    }
}

impl API for Engine {}
