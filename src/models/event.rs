use serde::Serialize;

use super::Booking;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingEventKind {
    Created,
    StatusUpdated,
    Deleted,
}

/// Pushed to admin dashboards after every successful booking write.
#[derive(Debug, Clone, Serialize)]
pub struct BookingEvent {
    pub kind: BookingEventKind,
    pub booking: Booking,
}
