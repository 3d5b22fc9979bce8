//! Vehicle entry and exit handlers.

use axum::{Json, extract::State};

use crate::api::extractors::Params;
use crate::api::state::AppState;
use crate::domain::{EntryQuery, EntryResponse, ExitQuery, ExitResponse};
use crate::error::{AppError, Result};

/// Record a vehicle entry and return its ticket id.
pub async fn handle_entry(
    State(state): State<AppState>,
    Params(query): Params<EntryQuery>,
) -> Result<Json<EntryResponse>> {
    let (plate, parking_lot) = query.validate().map_err(AppError::MissingParams)?;

    let ticket = state
        .parking_service
        .create_ticket(plate, parking_lot)
        .await?;

    Ok(Json(EntryResponse {
        ticket_id: ticket.ticket_id.to_string(),
    }))
}

/// Close a parking session and return the charge.
pub async fn handle_exit(
    State(state): State<AppState>,
    Params(query): Params<ExitQuery>,
) -> Result<Json<ExitResponse>> {
    let ticket_id = query.validate().map_err(AppError::MissingParams)?;

    let response = state.parking_service.process_exit(ticket_id).await?;

    Ok(Json(response))
}
