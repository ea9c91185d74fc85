use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::json_body;
use crate::errors::AppError;
use crate::models::{NewReview, Review};
use crate::services::reviews::effective_limit;
use crate::state::AppState;

// POST /api/reviews
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewReview>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let input = json_body(payload)?;
    let review = state.reviews.create(input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

// GET /api/reviews
#[derive(Deserialize)]
pub struct ReviewsQuery {
    pub limit: Option<usize>,
}

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state
        .reviews
        .list_recent(effective_limit(query.limit))
        .await?;
    Ok(Json(reviews))
}
