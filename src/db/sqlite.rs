use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::Connection;

use super::{queries, Store, StoreError};
use crate::models::{Booking, BookingStatus, Review};

/// SQLite-backed store. Uniqueness of `booking_id` is enforced by a unique
/// index, so concurrent inserts cannot both succeed.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("database connection lock poisoned".to_string()))
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        let db = self.lock()?;
        queries::insert_booking(&db, booking)?;
        Ok(())
    }

    async fn find_booking_by_booking_id(
        &self,
        booking_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        let db = self.lock()?;
        Ok(queries::get_booking_by_booking_id(&db, booking_id)?)
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let db = self.lock()?;
        Ok(queries::get_all_bookings(&db)?)
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        let db = self.lock()?;
        if !queries::update_booking_status(&db, id, status)? {
            return Ok(None);
        }
        Ok(queries::get_booking_by_id(&db, id)?)
    }

    async fn delete_booking(&self, id: &str) -> Result<Option<Booking>, StoreError> {
        let db = self.lock()?;
        let Some(booking) = queries::get_booking_by_id(&db, id)? else {
            return Ok(None);
        };
        queries::delete_booking(&db, id)?;
        Ok(Some(booking))
    }

    async fn insert_review(&self, review: &Review) -> Result<(), StoreError> {
        let db = self.lock()?;
        queries::insert_review(&db, review)?;
        Ok(())
    }

    async fn list_reviews(&self, limit: usize) -> Result<Vec<Review>, StoreError> {
        let db = self.lock()?;
        Ok(queries::get_recent_reviews(&db, limit)?)
    }
}
