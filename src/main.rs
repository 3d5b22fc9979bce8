//! Parking Service Entry Point
//!
//! Loads configuration, builds the ticket store and starts the HTTP server.

use parking_ticket_service::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
