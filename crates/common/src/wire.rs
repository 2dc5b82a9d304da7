//! Value objects shared across service boundaries.
//!
//! The checkout request, the fulfillment payload and the delivery entity
//! all carry the same destination and contact shapes.

use serde::{Deserialize, Serialize};

/// Destination address for a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// City name.
    pub city: String,
    /// Street and house number.
    pub street: String,
    /// Apartment, unit or suite (optional).
    pub unit: Option<String>,
}

impl Address {
    /// Creates a new address.
    pub fn new(city: impl Into<String>, street: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            unit: None,
        }
    }

    /// Sets the apartment/unit field.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Contact details for the person receiving a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Full name of the recipient.
    pub name: String,
    /// Phone number the courier can reach.
    pub phone: String,
}

impl Recipient {
    /// Creates a new recipient.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_builder() {
        let addr = Address::new("Springfield", "742 Evergreen Terrace").with_unit("2B");
        assert_eq!(addr.city, "Springfield");
        assert_eq!(addr.unit.as_deref(), Some("2B"));
    }

    #[test]
    fn serialization_roundtrip() {
        let addr = Address::new("Springfield", "742 Evergreen Terrace");
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);

        let recipient = Recipient::new("Homer Simpson", "+1-555-0100");
        let json = serde_json::to_string(&recipient).unwrap();
        let back: Recipient = serde_json::from_str(&json).unwrap();
        assert_eq!(recipient, back);
    }
}
