//! Storage layer module.
//!
//! Trait-based storage abstraction for active tickets.

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::create_storage;
pub use memory::MemoryStorage;
pub use traits::{Storage, TicketStorage};
