//! Parking ticket types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque ticket identifier.
///
/// Backed by a random v4 UUID and rendered in its hyphenated lowercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// A string that is not an issued ticket identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ticket id: {0}")]
pub struct InvalidTicketId(pub String);

impl FromStr for TicketId {
    type Err = InvalidTicketId;

    /// Parse an identifier in exactly the form it was issued.
    ///
    /// Other spellings of the same UUID (uppercase, simple, braced, URN) are
    /// rejected: they name no ticket.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Uuid::try_parse(s)
            .map(Self)
            .map_err(|_| InvalidTicketId(s.to_string()))?;

        if id.to_string() == s {
            Ok(id)
        } else {
            Err(InvalidTicketId(s.to_string()))
        }
    }
}

/// One active parking session, from entry to exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingTicket {
    /// Unique ticket identifier.
    pub ticket_id: TicketId,
    /// Vehicle license plate.
    pub license_plate: String,
    /// Lot the vehicle entered.
    pub parking_lot_id: String,
    /// When the vehicle entered.
    pub entry_time: DateTime<Utc>,
}

impl ParkingTicket {
    /// Issue a ticket with a freshly generated identifier.
    pub fn issue(
        license_plate: impl Into<String>,
        parking_lot_id: impl Into<String>,
        entry_time: DateTime<Utc>,
    ) -> Self {
        Self {
            ticket_id: TicketId::generate(),
            license_plate: license_plate.into(),
            parking_lot_id: parking_lot_id.into(),
            entry_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_id_parse_display() {
        let id = TicketId::generate();
        let parsed: TicketId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(id.to_string().len(), 36);
    }

    #[test]
    fn test_ticket_id_rejects_garbage() {
        assert!("not-a-ticket".parse::<TicketId>().is_err());
        assert!("".parse::<TicketId>().is_err());
    }

    #[test]
    fn test_ticket_id_rejects_alternate_spellings() {
        let id = TicketId::generate();
        let issued = id.to_string();
        let uuid = Uuid::parse_str(&issued).unwrap();

        for spelling in [
            issued.to_uppercase(),
            uuid.simple().to_string(),
            uuid.braced().to_string(),
            uuid.urn().to_string(),
        ] {
            assert_eq!(
                spelling.parse::<TicketId>(),
                Err(InvalidTicketId(spelling.clone()))
            );
        }
        assert_eq!(issued.parse::<TicketId>(), Ok(id));
    }

    #[test]
    fn test_issue_generates_distinct_ids() {
        let now = Utc::now();
        let a = ParkingTicket::issue("ABC123", "lot-1", now);
        let b = ParkingTicket::issue("ABC123", "lot-1", now);
        assert_ne!(a.ticket_id, b.ticket_id);
        assert_eq!(a.license_plate, "ABC123");
        assert_eq!(a.parking_lot_id, "lot-1");
        assert_eq!(a.entry_time, now);
    }

    #[test]
    fn test_ticket_serializes_camel_case() {
        let ticket = ParkingTicket::issue("ABC123", "lot-1", Utc::now());
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["ticketId"], ticket.ticket_id.to_string());
        assert_eq!(value["licensePlate"], "ABC123");
        assert_eq!(value["parkingLotId"], "lot-1");
    }
}
