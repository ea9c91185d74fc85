//! Human-facing booking identifiers.
//!
//! Identifiers look like `PHN-7K2Q9X`: a brand prefix and six characters
//! from `[A-Z0-9]`. Generation is stateless; uniqueness is checked by
//! [`BookingService`](crate::services::bookings::BookingService) against the
//! store, which retries with a fresh identifier on collision.
//!
//! A sequential counter (`PHN-000042`, derived from the booking count) reads
//! nicer but two concurrent requests can observe the same count, so it is
//! not offered.

use uuid::Uuid;

pub const PREFIX: &str = "PHN";
pub const SUFFIX_LEN: usize = 6;

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub trait BookingIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Draws the suffix from the random bits of a v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomBookingId;

impl BookingIdGenerator for RandomBookingId {
    fn generate(&self) -> String {
        let bytes = Uuid::new_v4().into_bytes();
        let suffix: String = bytes
            .iter()
            .take(SUFFIX_LEN)
            .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
            .collect();
        format!("{PREFIX}-{suffix}")
    }
}

/// Canonical form used for storage and lookup.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

pub fn is_well_formed(id: &str) -> bool {
    match id.split_once('-') {
        Some((prefix, suffix)) => {
            prefix == PREFIX
                && suffix.len() == SUFFIX_LEN
                && suffix
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        }
        None => false,
    }
}
