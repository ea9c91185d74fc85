//! Persistence for bookings and reviews.
//!
//! Services talk to storage only through the [`Store`] trait. Two backends
//! exist: SQLite ([`sqlite::SqliteStore`]) and a process-local fallback
//! ([`memory::MemoryStore`]) that loses everything on restart.

pub mod memory;
pub mod migrations;
pub mod queries;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Context;
use async_trait::async_trait;
use rusqlite::Connection;

use crate::models::{Booking, BookingStatus, Review};

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                StoreError::DuplicateKey(err.to_string())
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with [`StoreError::DuplicateKey`] when `booking_id` is taken.
    async fn insert_booking(&self, booking: &Booking) -> Result<(), StoreError>;

    /// Exact match; callers normalize case.
    async fn find_booking_by_booking_id(
        &self,
        booking_id: &str,
    ) -> Result<Option<Booking>, StoreError>;

    /// Newest first.
    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError>;

    /// Returns the updated booking, or `None` if `id` is unknown.
    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError>;

    /// Returns the removed booking, or `None` if `id` is unknown.
    async fn delete_booking(&self, id: &str) -> Result<Option<Booking>, StoreError>;

    async fn insert_review(&self, review: &Review) -> Result<(), StoreError>;

    /// Newest first, at most `limit` entries.
    async fn list_reviews(&self, limit: usize) -> Result<Vec<Review>, StoreError>;
}
