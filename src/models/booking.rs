use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub booking_id: String,
    pub name: String,
    pub phone: String,
    pub device: String,
    pub service: String,
    pub address: String,
    pub datetime: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    OnTheWay,
    Completed,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Accepted,
        BookingStatus::OnTheWay,
        BookingStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::OnTheWay => "ontheway",
            BookingStatus::Completed => "completed",
        }
    }

    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
    }

    /// Customer-facing text sent when a booking moves into this status.
    pub fn notification_message(&self, name: &str) -> Option<String> {
        match self {
            BookingStatus::Pending => None,
            BookingStatus::Accepted => Some(format!(
                "Hi {name}, your repair request is accepted. Our technician will contact you soon."
            )),
            BookingStatus::OnTheWay => Some(format!(
                "Hi {name}, our technician is on the way. Please be available."
            )),
            BookingStatus::Completed => Some(format!(
                "Hi {name}, your phone repair is completed. Thank you for choosing us!"
            )),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking request as submitted by a customer. Every field is optional at
/// the wire level so missing fields surface as validation errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBooking {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub device: Option<String>,
    pub service: Option<String>,
    pub address: Option<String>,
    pub datetime: Option<String>,
}

/// Validated booking fields, ready to be stamped with an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub name: String,
    pub phone: String,
    pub device: String,
    pub service: String,
    pub address: String,
    pub datetime: Option<String>,
}

impl NewBooking {
    pub fn validate(self) -> Result<BookingDraft, String> {
        Ok(BookingDraft {
            name: required("name", self.name)?,
            phone: required("phone", self.phone)?,
            device: required("device", self.device)?,
            service: required("service", self.service)?,
            address: required("address", self.address)?,
            datetime: self
                .datetime
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }
}

pub(crate) fn required(field: &str, value: Option<String>) -> Result<String, String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(format!("{field} is required")),
    }
}
