pub mod bookings;
pub mod identifier;
pub mod messaging;
pub mod reviews;
