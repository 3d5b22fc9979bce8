//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};

/// Query parameters for a vehicle entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryQuery {
    /// Vehicle license plate.
    pub plate: Option<String>,
    /// Lot identifier.
    pub parking_lot: Option<String>,
}

impl EntryQuery {
    /// Validate the query, returning `(plate, parking_lot)` when both are present.
    ///
    /// # Errors
    ///
    /// Returns a message if either parameter is missing or empty.
    pub fn validate(&self) -> Result<(&str, &str), String> {
        match (
            non_empty(self.plate.as_deref()),
            non_empty(self.parking_lot.as_deref()),
        ) {
            (Some(plate), Some(lot)) => Ok((plate, lot)),
            _ => Err(
                "Missing or invalid parameters: plate and parkingLot are required".to_string(),
            ),
        }
    }
}

/// Query parameters for a vehicle exit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitQuery {
    /// Ticket issued on entry.
    pub ticket_id: Option<String>,
}

impl ExitQuery {
    /// Validate the query, returning the ticket identifier.
    ///
    /// # Errors
    ///
    /// Returns a message if the ticket identifier is missing or empty.
    pub fn validate(&self) -> Result<&str, String> {
        non_empty(self.ticket_id.as_deref())
            .ok_or_else(|| "Missing or invalid ticket ID".to_string())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Response to a successful entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    /// Identifier to present on exit.
    pub ticket_id: String,
}

/// Response to a successful exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitResponse {
    /// Vehicle license plate.
    pub license_plate: String,
    /// Elapsed time as `"{hours}h {minutes}m"`.
    pub total_parked_time: String,
    /// Lot the vehicle parked in.
    pub parking_lot_id: String,
    /// Amount due.
    pub charge: f64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
}

impl HealthResponse {
    /// The fixed healthy status.
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Readiness check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    /// Overall readiness status.
    pub ready: bool,

    /// Tickets currently in the store, if the store could count them.
    pub active_tickets: Option<usize>,

    /// Individual component statuses.
    pub components: ReadyComponents,
}

/// Component readiness statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyComponents {
    /// Ticket storage status.
    pub storage: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_query_validation() {
        let query = EntryQuery {
            plate: Some("ABC123".to_string()),
            parking_lot: Some("lot-1".to_string()),
        };
        assert_eq!(query.validate().unwrap(), ("ABC123", "lot-1"));

        let query = EntryQuery {
            plate: Some(String::new()),
            parking_lot: Some("lot-1".to_string()),
        };
        assert!(query.validate().is_err());

        let query = EntryQuery {
            plate: Some("ABC123".to_string()),
            parking_lot: None,
        };
        assert!(query.validate().is_err());

        assert!(EntryQuery::default().validate().is_err());
    }

    #[test]
    fn test_exit_query_validation() {
        let query = ExitQuery {
            ticket_id: Some("abc".to_string()),
        };
        assert_eq!(query.validate().unwrap(), "abc");

        let query = ExitQuery {
            ticket_id: Some(String::new()),
        };
        assert!(query.validate().is_err());
        assert!(ExitQuery::default().validate().is_err());
    }

    #[test]
    fn test_entry_query_uses_camel_case_keys() {
        let query: EntryQuery =
            serde_json::from_str(r#"{"plate":"ABC123","parkingLot":"lot-1"}"#).unwrap();
        assert_eq!(query.parking_lot.as_deref(), Some("lot-1"));
    }

    #[test]
    fn test_exit_response_serialization() {
        let response = ExitResponse {
            license_plate: "ABC123".to_string(),
            total_parked_time: "1h 1m".to_string(),
            parking_lot_id: "lot-1".to_string(),
            charge: 12.5,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["licensePlate"], "ABC123");
        assert_eq!(value["totalParkedTime"], "1h 1m");
        assert_eq!(value["parkingLotId"], "lot-1");
        assert_eq!(value["charge"], 12.5);
    }
}
