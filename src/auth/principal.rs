use serde::{Deserialize, Serialize};

/// Verified identity of the calling user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub uid: String,
}

impl Principal {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}
