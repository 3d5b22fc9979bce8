//! Storage trait definitions.
//!
//! The service layer talks to tickets only through [`TicketStorage`], so a
//! backend can be swapped without touching business logic.

use async_trait::async_trait;

use crate::domain::{ParkingTicket, TicketId};
use crate::error::StorageResult;

/// Active-ticket storage operations.
#[async_trait]
pub trait TicketStorage: Send + Sync {
    /// Insert a new ticket.
    ///
    /// Fails with `StorageError::DuplicateKey` if the identifier is already
    /// present; the existing record is left untouched.
    async fn insert(&self, ticket: ParkingTicket) -> StorageResult<()>;

    /// Get a ticket by identifier without removing it.
    async fn get(&self, id: &TicketId) -> StorageResult<Option<ParkingTicket>>;

    /// Atomically remove and return a ticket.
    ///
    /// When several callers race on the same identifier exactly one receives
    /// `Some`.
    async fn take(&self, id: &TicketId) -> StorageResult<Option<ParkingTicket>>;

    /// Number of active tickets.
    async fn count(&self) -> StorageResult<usize>;
}

/// Combined storage trait.
#[async_trait]
pub trait Storage: TicketStorage {
    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}
