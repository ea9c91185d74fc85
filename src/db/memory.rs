//! In-memory implementation of [`Store`].
//!
//! Used when no database is configured. All data is lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Store, StoreError};
use crate::models::{Booking, BookingStatus, Review};

/// Records are kept in insertion order; listings reverse it.
pub struct MemoryStore {
    bookings: RwLock<Vec<Booking>>,
    reviews: RwLock<Vec<Review>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            bookings: RwLock::new(Vec::new()),
            reviews: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        // Check and insert under one write lock to mirror a unique index.
        let mut bookings = self.bookings.write().await;
        if bookings
            .iter()
            .any(|b| b.booking_id == booking.booking_id || b.id == booking.id)
        {
            return Err(StoreError::DuplicateKey(booking.booking_id.clone()));
        }
        bookings.push(booking.clone());
        Ok(())
    }

    async fn find_booking_by_booking_id(
        &self,
        booking_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.booking_id == booking_id).cloned())
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let bookings = self.bookings.read().await;
        let mut all: Vec<Booking> = bookings.iter().rev().cloned().collect();
        // Stable sort keeps reverse insertion order for equal timestamps.
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        let mut bookings = self.bookings.write().await;
        Ok(bookings.iter_mut().find(|b| b.id == id).map(|b| {
            b.status = status;
            b.clone()
        }))
    }

    async fn delete_booking(&self, id: &str) -> Result<Option<Booking>, StoreError> {
        let mut bookings = self.bookings.write().await;
        Ok(bookings
            .iter()
            .position(|b| b.id == id)
            .map(|idx| bookings.remove(idx)))
    }

    async fn insert_review(&self, review: &Review) -> Result<(), StoreError> {
        let mut reviews = self.reviews.write().await;
        reviews.push(review.clone());
        Ok(())
    }

    async fn list_reviews(&self, limit: usize) -> Result<Vec<Review>, StoreError> {
        let reviews = self.reviews.read().await;
        let mut recent: Vec<Review> = reviews.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn booking(id: &str, booking_id: &str) -> Booking {
        Booking {
            id: id.to_string(),
            booking_id: booking_id.to_string(),
            name: "Asha".to_string(),
            phone: "9999999999".to_string(),
            device: "Phone X".to_string(),
            service: "Screen".to_string(),
            address: "12 Main St".to_string(),
            datetime: None,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_rejects_duplicate_booking_id() {
        let store = MemoryStore::new();
        store.insert_booking(&booking("a", "PHN-AAAAAA")).await.unwrap();

        let err = store
            .insert_booking(&booking("b", "PHN-AAAAAA"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
        assert_eq!(store.list_bookings().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_bookings_newest_first() {
        let store = MemoryStore::new();
        let mut old = booking("old", "PHN-OLD000");
        old.created_at = Utc::now() - Duration::minutes(5);
        store.insert_booking(&booking("new", "PHN-NEW000")).await.unwrap();
        store.insert_booking(&old).await.unwrap();

        let ids: Vec<String> = store
            .list_bookings()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_list_reviews_caps_results() {
        let store = MemoryStore::new();
        for i in 0..4 {
            store
                .insert_review(&Review {
                    id: format!("r-{i}"),
                    name: "Bela".to_string(),
                    rating: 4,
                    message: "Quick fix".to_string(),
                    created_at: Utc::now() + Duration::seconds(i),
                })
                .await
                .unwrap();
        }

        let reviews = store.list_reviews(2).await.unwrap();
        let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r-3", "r-2"]);
    }
}
