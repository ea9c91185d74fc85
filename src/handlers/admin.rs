use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::{check_auth, json_body};
use crate::errors::AppError;
use crate::models::Booking;
use crate::state::AppState;

// GET /api/admin/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let bookings = state.bookings.list_all().await?;
    Ok(Json(bookings))
}

// PUT /api/admin/bookings/:id
#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let body = json_body(payload)?;
    let status = body
        .status
        .ok_or_else(|| AppError::Validation("status is required".to_string()))?;

    let booking = state.bookings.update_status(&id, &status).await?;
    Ok(Json(booking))
}

// DELETE /api/admin/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    state.bookings.delete(&id).await?;
    Ok(Json(serde_json::json!({"ok": true})))
}

// POST /api/admin/whatsapp/send
#[derive(Deserialize)]
pub struct SendRequest {
    pub phone: Option<String>,
    pub message: Option<String>,
}

pub async fn send_whatsapp(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let body = json_body(payload)?;
    let phone = body.phone.unwrap_or_default().trim().to_string();
    let message = body.message.unwrap_or_default().trim().to_string();

    if phone.is_empty() || message.is_empty() {
        return Err(AppError::Validation(
            "phone and message are required".to_string(),
        ));
    }

    let timeout = state.config.notify_timeout();
    match tokio::time::timeout(timeout, state.messaging.send_message(&phone, &message)).await {
        Ok(Ok(())) => {
            tracing::info!("manual WhatsApp message sent");
            Ok(Json(serde_json::json!({"ok": true})))
        }
        Ok(Err(e)) => Err(AppError::Notifier(e.to_string())),
        Err(_) => Err(AppError::Notifier(format!(
            "timed out after {}s",
            timeout.as_secs()
        ))),
    }
}
