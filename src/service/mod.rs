//! Service layer module.
//!
//! Ticket lifecycle and fee calculation.

pub mod clock;
pub mod fee;
pub mod parking;

pub use clock::{Clock, ManualClock, SystemClock};
pub use fee::{FeeCalculator, ParkingFee};
pub use parking::ParkingService;
