//! Error code constants.
//!
//! Codes are the stable, machine-readable half of every error body:
//! - Validation errors (caller supplied bad input)
//! - Resource errors (unknown tickets)
//! - Internal errors (server-side failures)

/// Wire-level error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    // ===== Validation Errors =====

    /// Required query parameter missing, empty or malformed.
    pub const MISSING_PARAMS: Self = Self("MISSING_PARAMS");

    // ===== Resource Errors =====

    /// Exit referenced a ticket with no active session.
    pub const TICKET_NOT_FOUND: Self = Self("TICKET_NOT_FOUND");

    // ===== Internal Errors =====

    /// Unexpected failure while processing an entry.
    pub const INVALID_REQUEST: Self = Self("INVALID_REQUEST");

    /// Ticket store failure.
    pub const STORAGE_ERROR: Self = Self("STORAGE_ERROR");

    /// Get the code as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
