use async_trait::async_trait;
use serde_json::Value;

use crate::auth::Principal;
use crate::entities::RideReceipt;
use crate::error::Error;

#[async_trait]
pub trait RideAPI {
    /// Records a pending ride for `caller` from the `pickup`, `dropoff` and
    /// `boatType` fields of `payload`.
    async fn submit_ride_request(
        &self,
        caller: Option<Principal>,
        payload: Value,
    ) -> Result<RideReceipt, Error>;
}

pub trait API: RideAPI {}
