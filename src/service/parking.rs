//! Parking service.
//!
//! Owns the ticket lifecycle: a ticket is issued on entry, priced and removed
//! on exit. Exits go through an atomic take on the store, so concurrent exits
//! with the same ticket resolve to a single winner.

use std::sync::Arc;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use tracing::{info, warn};

use crate::config::BillingConfig;
use crate::domain::{ExitResponse, ParkingTicket, TicketId};
use crate::error::{AppError, Result, StorageError};
use crate::service::clock::{Clock, SystemClock};
use crate::service::fee::FeeCalculator;
use crate::storage::traits::Storage;

/// Counter of tickets issued.
pub const TICKETS_ISSUED: &str = "parking_tickets_issued_total";
/// Counter of completed exits.
pub const TICKETS_EXITED: &str = "parking_tickets_exited_total";
/// Counter of exits for unknown tickets.
pub const EXIT_NOT_FOUND: &str = "parking_exit_not_found_total";
/// Gauge of tickets currently in the store.
pub const ACTIVE_TICKETS: &str = "parking_active_tickets";

/// Attempts at drawing an unused ticket id before giving up.
const MAX_ISSUE_ATTEMPTS: usize = 3;

/// Register metric descriptions with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(TICKETS_ISSUED, "Parking tickets issued on entry");
    describe_counter!(TICKETS_EXITED, "Parking sessions closed on exit");
    describe_counter!(EXIT_NOT_FOUND, "Exit attempts for unknown tickets");
    describe_gauge!(ACTIVE_TICKETS, "Tickets currently active");
}

/// Service for vehicle entry and exit.
pub struct ParkingService {
    /// Ticket storage.
    storage: Arc<dyn Storage>,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Fee calculator.
    fees: FeeCalculator,
}

impl ParkingService {
    /// Create a new parking service using the wall clock.
    pub fn new(storage: Arc<dyn Storage>, config: &BillingConfig) -> Self {
        Self::with_clock(storage, config, Arc::new(SystemClock))
    }

    /// Create a new parking service with an explicit time source.
    pub fn with_clock(
        storage: Arc<dyn Storage>,
        config: &BillingConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            clock,
            fees: FeeCalculator::new(config),
        }
    }

    /// Record a vehicle entry and issue its ticket.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the ticket cannot be stored.
    pub async fn create_ticket(
        &self,
        license_plate: &str,
        parking_lot_id: &str,
    ) -> Result<ParkingTicket> {
        let entry_time = self.clock.now();

        for _ in 0..MAX_ISSUE_ATTEMPTS {
            let ticket = ParkingTicket::issue(license_plate, parking_lot_id, entry_time);

            match self.storage.insert(ticket.clone()).await {
                Ok(()) => {
                    counter!(TICKETS_ISSUED).increment(1);
                    self.record_active_tickets().await;
                    info!(
                        ticket_id = %ticket.ticket_id,
                        license_plate = %ticket.license_plate,
                        parking_lot_id = %ticket.parking_lot_id,
                        "Ticket issued"
                    );
                    return Ok(ticket);
                }
                Err(StorageError::DuplicateKey(id)) => {
                    warn!(ticket_id = %id, "Ticket id already in use, regenerating");
                }
            }
        }

        Err(AppError::InvalidRequest(
            "could not allocate a unique ticket id".to_string(),
        ))
    }

    /// Close a parking session: price it and remove the ticket.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if no active ticket has this id, or a storage
    /// error if the store fails.
    pub async fn process_exit(&self, ticket_id: &str) -> Result<ExitResponse> {
        let Ok(id) = ticket_id.parse::<TicketId>() else {
            counter!(EXIT_NOT_FOUND).increment(1);
            return Err(AppError::TicketNotFound(ticket_id.to_string()));
        };

        let Some(ticket) = self.storage.take(&id).await? else {
            counter!(EXIT_NOT_FOUND).increment(1);
            return Err(AppError::TicketNotFound(ticket_id.to_string()));
        };

        let fee = self.fees.quote(ticket.entry_time, self.clock.now());

        counter!(TICKETS_EXITED).increment(1);
        self.record_active_tickets().await;
        info!(
            ticket_id = %ticket.ticket_id,
            parking_lot_id = %ticket.parking_lot_id,
            elapsed_ms = fee.elapsed_ms,
            intervals = fee.intervals,
            charge = fee.charge,
            "Ticket closed"
        );

        Ok(ExitResponse {
            license_plate: ticket.license_plate,
            total_parked_time: fee.total_parked_time,
            parking_lot_id: ticket.parking_lot_id,
            charge: fee.charge,
        })
    }

    /// Number of active tickets.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store fails.
    pub async fn active_tickets(&self) -> Result<usize> {
        Ok(self.storage.count().await?)
    }

    #[allow(clippy::cast_precision_loss)]
    async fn record_active_tickets(&self) {
        match self.storage.count().await {
            Ok(count) => gauge!(ACTIVE_TICKETS).set(count as f64),
            Err(err) => warn!(error = %err, "Failed to count active tickets"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use tokio_test::assert_ok;

    use uuid::Uuid;

    use super::*;
    use crate::service::clock::ManualClock;
    use crate::storage::{MemoryStorage, TicketStorage};

    fn service_with_storage() -> (ParkingService, Arc<ManualClock>, Arc<MemoryStorage>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let storage = Arc::new(MemoryStorage::new());
        let service = ParkingService::with_clock(
            storage.clone(),
            &BillingConfig {
                hourly_rate: 10.0,
                minimum_interval: 15,
            },
            clock.clone(),
        );
        (service, clock, storage)
    }

    fn service() -> (ParkingService, Arc<ManualClock>) {
        let (service, clock, _) = service_with_storage();
        (service, clock)
    }

    #[tokio::test]
    async fn test_create_ticket() {
        let (service, clock, storage) = service_with_storage();

        let ticket = service.create_ticket("ABC123", "lot-1").await.unwrap();
        assert_eq!(ticket.license_plate, "ABC123");
        assert_eq!(ticket.parking_lot_id, "lot-1");
        assert_eq!(ticket.entry_time, clock.now());

        let found = storage.get(&ticket.ticket_id).await.unwrap();
        assert_eq!(found, Some(ticket));
        assert_eq!(service.active_tickets().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_tickets_are_unique() {
        let (service, _) = service();

        let a = service.create_ticket("ABC123", "lot-1").await.unwrap();
        let b = service.create_ticket("ABC123", "lot-1").await.unwrap();
        assert_ne!(a.ticket_id, b.ticket_id);
        assert_eq!(service.active_tickets().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_exit_after_twenty_minutes() {
        let (service, clock) = service();
        let ticket = service.create_ticket("ABC123", "lot-1").await.unwrap();

        clock.advance(TimeDelta::minutes(20));
        let response = service
            .process_exit(&ticket.ticket_id.to_string())
            .await
            .unwrap();

        assert_eq!(response.license_plate, "ABC123");
        assert_eq!(response.parking_lot_id, "lot-1");
        assert_eq!(response.total_parked_time, "0h 20m");
        assert!((response.charge - 5.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_exit_after_sixty_one_minutes() {
        let (service, clock) = service();
        let ticket = service.create_ticket("ABC123", "lot-1").await.unwrap();

        clock.advance(TimeDelta::minutes(61));
        let response = service
            .process_exit(&ticket.ticket_id.to_string())
            .await
            .unwrap();

        assert_eq!(response.total_parked_time, "1h 1m");
        assert!((response.charge - 12.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_immediate_exit_is_free() {
        let (service, _) = service();
        let ticket = service.create_ticket("ABC123", "lot-1").await.unwrap();

        let response = service
            .process_exit(&ticket.ticket_id.to_string())
            .await
            .unwrap();
        assert_eq!(response.total_parked_time, "0h 0m");
        assert!(response.charge.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_exit_twice_fails() {
        let (service, _, storage) = service_with_storage();
        let ticket = service.create_ticket("ABC123", "lot-1").await.unwrap();
        let id = ticket.ticket_id.to_string();

        assert_ok!(service.process_exit(&id).await);
        let result = service.process_exit(&id).await;
        assert!(matches!(result, Err(AppError::TicketNotFound(_))));
        assert_eq!(storage.get(&ticket.ticket_id).await.unwrap(), None);
        assert_eq!(service.active_tickets().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_exit_unknown_ticket() {
        let (service, _) = service();

        let result = service.process_exit(&TicketId::generate().to_string()).await;
        assert!(matches!(result, Err(AppError::TicketNotFound(_))));

        let result = service.process_exit("not-a-uuid").await;
        assert!(matches!(result, Err(AppError::TicketNotFound(id)) if id == "not-a-uuid"));
    }

    #[tokio::test]
    async fn test_exit_requires_issued_spelling() {
        let (service, _, storage) = service_with_storage();
        let ticket = service.create_ticket("ABC123", "lot-1").await.unwrap();
        let issued = ticket.ticket_id.to_string();
        let uuid = Uuid::parse_str(&issued).unwrap();

        for spelling in [
            issued.to_uppercase(),
            uuid.simple().to_string(),
            uuid.braced().to_string(),
            uuid.urn().to_string(),
        ] {
            let result = service.process_exit(&spelling).await;
            assert!(
                matches!(&result, Err(AppError::TicketNotFound(id)) if *id == spelling),
                "{spelling} closed the ticket"
            );
        }

        assert_eq!(storage.count().await.unwrap(), 1);
        assert_ok!(service.process_exit(&issued).await);
    }

    #[tokio::test]
    async fn test_exit_under_clock_skew() {
        let (service, clock) = service();
        let ticket = service.create_ticket("ABC123", "lot-1").await.unwrap();

        clock.advance(TimeDelta::minutes(-10));
        let response = service
            .process_exit(&ticket.ticket_id.to_string())
            .await
            .unwrap();
        assert_eq!(response.total_parked_time, "0h 0m");
        assert!(response.charge.abs() < f64::EPSILON);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_exit_single_winner() {
        let (service, _) = service();
        let service = Arc::new(service);
        let ticket = service.create_ticket("ABC123", "lot-1").await.unwrap();
        let id = ticket.ticket_id.to_string();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = Arc::clone(&service);
            let id = id.clone();
            handles.push(tokio::spawn(async move { service.process_exit(&id).await }));
        }

        let mut winners = 0;
        let mut not_found = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(AppError::TicketNotFound(_)) => not_found += 1,
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(not_found, 15);
    }
}
