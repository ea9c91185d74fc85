pub mod booking;
pub mod event;
pub mod review;

pub use booking::{Booking, BookingDraft, BookingStatus, NewBooking};
pub use event::{BookingEvent, BookingEventKind};
pub use review::{NewReview, Review, ReviewDraft};
