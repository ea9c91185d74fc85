use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use crate::db::Store;
use crate::errors::AppError;
use crate::models::{NewReview, Review};

pub const DEFAULT_REVIEW_LIMIT: usize = 50;
pub const MAX_REVIEW_LIMIT: usize = 100;

/// Clamps a caller-supplied page size into `1..=MAX_REVIEW_LIMIT`.
pub fn effective_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_REVIEW_LIMIT)
        .clamp(1, MAX_REVIEW_LIMIT)
}

pub struct ReviewService {
    store: Arc<dyn Store>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: NewReview) -> Result<Review, AppError> {
        let draft = input.validate().map_err(AppError::Validation)?;

        let review = Review {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            rating: draft.rating,
            message: draft.message,
            created_at: Utc::now().trunc_subsecs(6),
        };
        self.store.insert_review(&review).await?;

        tracing::info!(id = %review.id, rating = review.rating, "review submitted");
        Ok(review)
    }

    /// Most recent first.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<Review>, AppError> {
        Ok(self.store.list_reviews(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, MemoryStore, SqliteStore};

    fn bela(rating: i64) -> NewReview {
        NewReview {
            name: Some("Bela".to_string()),
            rating: Some(rating),
            message: Some("Great service".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_latest() {
        let service = ReviewService::new(Arc::new(SqliteStore::new(
            db::init_db(":memory:").unwrap(),
        )));

        let review = service.create(bela(5)).await.unwrap();
        assert_eq!(review.rating, 5);

        let latest = service.list_recent(1).await.unwrap();
        assert_eq!(latest, vec![review]);
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected() {
        let service = ReviewService::new(Arc::new(MemoryStore::new()));

        let err = service.create(bela(7)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(service.list_recent(10).await.unwrap().is_empty());
    }

    #[test]
    fn test_effective_limit() {
        assert_eq!(effective_limit(None), DEFAULT_REVIEW_LIMIT);
        assert_eq!(effective_limit(Some(0)), 1);
        assert_eq!(effective_limit(Some(10)), 10);
        assert_eq!(effective_limit(Some(10_000)), MAX_REVIEW_LIMIT);
    }
}
