use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::bookings::BookingService;
use crate::services::messaging::MessagingProvider;
use crate::services::reviews::ReviewService;

pub struct AppState {
    pub config: AppConfig,
    pub bookings: BookingService,
    pub reviews: ReviewService,
    pub messaging: Arc<dyn MessagingProvider>,
}
