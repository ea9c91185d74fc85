pub mod admin;
pub mod bookings;
pub mod events;
pub mod health;
pub mod reviews;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::errors::AppError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/bookings", post(bookings::create_booking))
        .route("/api/bookings/:booking_id", get(bookings::get_booking))
        .route(
            "/api/reviews",
            post(reviews::create_review).get(reviews::list_reviews),
        )
        .route("/api/admin/bookings", get(admin::list_bookings))
        .route(
            "/api/admin/bookings/:id",
            put(admin::update_booking_status).delete(admin::delete_booking),
        )
        .route("/api/admin/whatsapp/send", post(admin::send_whatsapp))
        .route("/api/admin/events", get(events::booking_events))
        .with_state(state)
}

pub(crate) fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// Unwraps a JSON body, reporting malformed payloads as validation errors.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}
