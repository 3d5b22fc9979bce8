//! Domain models for the parking service.
//!
//! Tickets, their identifiers, and the API request/response contracts.

pub mod dto;
pub mod ticket;

pub use dto::{
    EntryQuery, EntryResponse, ExitQuery, ExitResponse, HealthResponse, ReadyComponents,
    ReadyResponse,
};
pub use ticket::{InvalidTicketId, ParkingTicket, TicketId};
