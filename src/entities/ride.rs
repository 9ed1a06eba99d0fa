use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{invalid_argument_error, Error};

pub const SUBMITTED_MESSAGE: &str = "Ride request submitted successfully!";

const MISSING_DETAILS_MESSAGE: &str =
    "Missing ride details. Please provide pickup location, dropoff location, and boat type.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Pending => "pending".into(),
        }
    }
}

/// Validated, trimmed details of a ride request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RideDetails {
    pub pickup: String,
    pub dropoff: String,
    pub boat_type: String,
}

impl RideDetails {
    /// Every field has to be a string that is non-empty once trimmed.
    pub fn from_payload(data: &Value) -> Result<Self, Error> {
        let pickup = text_field(data, "pickup");
        let dropoff = text_field(data, "dropoff");
        let boat_type = text_field(data, "boatType");

        match (pickup, dropoff, boat_type) {
            (Some(pickup), Some(dropoff), Some(boat_type)) => Ok(Self {
                pickup,
                dropoff,
                boat_type,
            }),
            _ => Err(invalid_argument_error(MISSING_DETAILS_MESSAGE)),
        }
    }
}

fn text_field(data: &Value, key: &str) -> Option<String> {
    let value = data
        .get(key)?
        .as_str()?
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

    if value.is_empty() {
        return None;
    }

    Some(value.to_string())
}

/// Fields written for a new ride. The id and timestamp come from the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideDocument {
    pub passenger_id: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub boat_type: String,
    pub status: Status,
}

impl RideDocument {
    pub fn pending(passenger_id: String, details: RideDetails) -> Self {
        Self {
            passenger_id,
            pickup_location: details.pickup,
            dropoff_location: details.dropoff,
            boat_type: details.boat_type,
            status: Status::Pending,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: String,
    pub passenger_id: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub boat_type: String,
    pub status: Status,
    pub timestamp: DateTime<Utc>,
}

impl Ride {
    pub fn new(id: String, document: RideDocument, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            passenger_id: document.passenger_id,
            pickup_location: document.pickup_location,
            dropoff_location: document.dropoff_location,
            boat_type: document.boat_type,
            status: document.status,
            timestamp,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideReceipt {
    pub ride_id: String,
    pub message: String,
}

impl RideReceipt {
    pub fn new(ride_id: String) -> Self {
        Self {
            ride_id,
            message: SUBMITTED_MESSAGE.into(),
        }
    }
}

#[test]
fn details_are_trimmed_test() {
    use serde_json::json;

    let data = json!({ "pickup": " Pier 4 ", "dropoff": "Dock B\n", "boatType": "\tskiff" });
    let details = RideDetails::from_payload(&data).unwrap();

    assert_eq!(details.pickup, "Pier 4");
    assert_eq!(details.dropoff, "Dock B");
    assert_eq!(details.boat_type, "skiff");
}

#[test]
fn byte_order_mark_is_trimmed_test() {
    use serde_json::json;

    let data = json!({ "pickup": "\u{feff}Pier 4\u{feff}", "dropoff": "Dock B", "boatType": "skiff" });
    let details = RideDetails::from_payload(&data).unwrap();
    assert_eq!(details.pickup, "Pier 4");

    let data = json!({ "pickup": "\u{feff}", "dropoff": "Dock B", "boatType": "skiff" });
    let err = RideDetails::from_payload(&data).unwrap_err();
    assert_eq!(err.status(), "invalid-argument");
}

#[test]
fn invalid_payloads_test() {
    use serde_json::json;

    let payloads = vec![
        json!(null),
        json!("Pier 4"),
        json!([]),
        json!({}),
        json!({ "dropoff": "Dock B", "boatType": "skiff" }),
        json!({ "pickup": "", "dropoff": "Dock B", "boatType": "skiff" }),
        json!({ "pickup": "Pier 4", "dropoff": "   ", "boatType": "skiff" }),
        json!({ "pickup": "Pier 4", "dropoff": "Dock B", "boatType": 3 }),
        json!({ "pickup": "Pier 4", "dropoff": null, "boatType": "skiff" }),
        json!({ "pickup": ["Pier 4"], "dropoff": "Dock B", "boatType": "skiff" }),
        json!({ "pickup": "Pier 4", "dropoff": "Dock B", "boat_type": "skiff" }),
    ];

    for payload in payloads {
        let err = RideDetails::from_payload(&payload).unwrap_err();
        assert_eq!(err.status(), "invalid-argument");
        assert_eq!(err.message, MISSING_DETAILS_MESSAGE);
    }
}

#[test]
fn pending_document_test() {
    let details = RideDetails {
        pickup: "Pier 4".into(),
        dropoff: "Dock B".into(),
        boat_type: "skiff".into(),
    };
    let document = RideDocument::pending("u1".into(), details);

    assert_eq!(document.status, Status::Pending);
    assert_eq!(document.status.name(), "pending");

    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(value["passengerId"], "u1");
    assert_eq!(value["pickupLocation"], "Pier 4");
    assert_eq!(value["dropoffLocation"], "Dock B");
    assert_eq!(value["boatType"], "skiff");
    assert_eq!(value["status"], "pending");
}

#[test]
fn receipt_serialization_test() {
    let receipt = RideReceipt::new("ride-1".into());
    let value = serde_json::to_value(&receipt).unwrap();

    assert_eq!(value["rideId"], "ride-1");
    assert_eq!(value["message"], "Ride request submitted successfully!");
}
