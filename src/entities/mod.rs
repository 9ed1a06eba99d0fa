mod ride;

pub use ride::{Ride, RideDetails, RideDocument, RideReceipt, Status as RideStatus};
