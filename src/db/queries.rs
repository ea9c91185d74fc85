use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Booking, BookingStatus, Review};

const BOOKING_COLUMNS: &str =
    "id, booking_id, name, phone, device, service, address, datetime, status, created_at";

// Fixed-width so lexical order on the column matches chronological order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &Booking) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, booking_id, name, phone, device, service, address, datetime, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            booking.id,
            booking.booking_id,
            booking.name,
            booking.phone,
            booking.device,
            booking.service,
            booking.address,
            booking.datetime,
            booking.status.as_str(),
            format_timestamp(&booking.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> rusqlite::Result<Option<Booking>> {
    conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        parse_booking_row,
    )
    .optional()
}

pub fn get_booking_by_booking_id(
    conn: &Connection,
    booking_id: &str,
) -> rusqlite::Result<Option<Booking>> {
    conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_id = ?1"),
        params![booking_id],
        parse_booking_row,
    )
    .optional()
}

pub fn get_all_bookings(conn: &Connection) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC, rowid DESC"
    ))?;

    let rows = stmt.query_map([], parse_booking_row)?;
    rows.collect()
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> rusqlite::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

pub fn delete_booking(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let status_str: String = row.get(8)?;
    let status = BookingStatus::parse(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            8,
            Type::Text,
            format!("unknown booking status: {status_str}").into(),
        )
    })?;
    let created_at_str: String = row.get(9)?;

    Ok(Booking {
        id: row.get(0)?,
        booking_id: row.get(1)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        device: row.get(4)?,
        service: row.get(5)?,
        address: row.get(6)?,
        datetime: row.get(7)?,
        status,
        created_at: parse_timestamp(9, &created_at_str)?,
    })
}

// ── Reviews ──

pub fn insert_review(conn: &Connection, review: &Review) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO reviews (id, name, rating, message, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            review.id,
            review.name,
            review.rating,
            review.message,
            format_timestamp(&review.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_recent_reviews(conn: &Connection, limit: usize) -> rusqlite::Result<Vec<Review>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, rating, message, created_at FROM reviews
         ORDER BY created_at DESC, rowid DESC LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit as i64], |row| {
        let created_at_str: String = row.get(4)?;
        Ok(Review {
            id: row.get(0)?,
            name: row.get(1)?,
            rating: row.get(2)?,
            message: row.get(3)?,
            created_at: parse_timestamp(4, &created_at_str)?,
        })
    })?;
    rows.collect()
}
