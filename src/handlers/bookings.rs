use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::json_body;
use crate::errors::AppError;
use crate::models::{Booking, NewBooking};
use crate::state::AppState;

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let input = json_body(payload)?;
    let booking = state.bookings.create(input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings/:booking_id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.bookings.get_by_booking_id(&booking_id).await?;
    Ok(Json(booking))
}
