//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::service::{Clock, ParkingService};
use crate::storage::traits::Storage;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend.
    pub storage: Arc<dyn Storage>,
    /// Entry/exit service.
    pub parking_service: Arc<ParkingService>,
    /// Prometheus render handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state using the wall clock.
    pub fn new(config: &AppConfig, storage: Arc<dyn Storage>) -> Self {
        let parking_service = Arc::new(ParkingService::new(
            Arc::clone(&storage),
            &config.billing,
        ));

        Self::from_parts(storage, parking_service)
    }

    /// Create a new application state with an explicit time source.
    pub fn with_clock(
        config: &AppConfig,
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let parking_service = Arc::new(ParkingService::with_clock(
            Arc::clone(&storage),
            &config.billing,
            clock,
        ));

        Self::from_parts(storage, parking_service)
    }

    const fn from_parts(storage: Arc<dyn Storage>, parking_service: Arc<ParkingService>) -> Self {
        Self {
            storage,
            parking_service,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
