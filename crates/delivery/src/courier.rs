//! Courier read model.

use common::CourierId;
use serde::{Deserialize, Serialize};

/// A courier referenced by deliveries. Never mutated by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Courier {
    /// Unique courier identifier.
    pub id: CourierId,

    /// Courier name, unique within the fleet.
    pub name: String,

    /// Dispatch phone number.
    pub phone: String,
}

impl Courier {
    /// Creates a new courier.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: CourierId::new(),
            name: name.into(),
            phone: phone.into(),
        }
    }
}
