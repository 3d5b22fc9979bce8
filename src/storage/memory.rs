//! In-memory storage backend.
//!
//! Tickets live in a sharded concurrent map keyed by identifier. Nothing
//! survives a restart.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::config::StorageConfig;
use crate::domain::{ParkingTicket, TicketId};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::{Storage, TicketStorage};

/// Concurrent in-memory ticket storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tickets: DashMap<TicketId, ParkingTicket>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from configuration.
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            tickets: DashMap::with_capacity(config.initial_capacity),
        }
    }
}

#[async_trait]
impl TicketStorage for MemoryStorage {
    async fn insert(&self, ticket: ParkingTicket) -> StorageResult<()> {
        match self.tickets.entry(ticket.ticket_id) {
            Entry::Occupied(_) => Err(StorageError::DuplicateKey(ticket.ticket_id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(ticket);
                Ok(())
            }
        }
    }

    async fn get(&self, id: &TicketId) -> StorageResult<Option<ParkingTicket>> {
        Ok(self.tickets.get(id).map(|entry| entry.value().clone()))
    }

    async fn take(&self, id: &TicketId) -> StorageResult<Option<ParkingTicket>> {
        Ok(self.tickets.remove(id).map(|(_, ticket)| ticket))
    }

    async fn count(&self) -> StorageResult<usize> {
        Ok(self.tickets.len())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
