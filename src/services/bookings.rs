//! Booking lifecycle: creation with identifier assignment, lookup, status
//! transitions and the customer notifications they trigger.

use std::sync::Arc;
use std::time::Duration;

use chrono::{SubsecRound, Utc};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::db::{Store, StoreError};
use crate::errors::AppError;
use crate::models::{Booking, BookingEvent, BookingEventKind, BookingStatus, NewBooking};
use crate::services::identifier::{self, BookingIdGenerator, RandomBookingId};
use crate::services::messaging::MessagingProvider;

pub const MAX_ID_ATTEMPTS: usize = 5;

const EVENT_CAPACITY: usize = 256;

pub struct BookingService {
    store: Arc<dyn Store>,
    messaging: Arc<dyn MessagingProvider>,
    ids: Box<dyn BookingIdGenerator>,
    notify_timeout: Duration,
    events: broadcast::Sender<BookingEvent>,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn Store>,
        messaging: Arc<dyn MessagingProvider>,
        notify_timeout: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            messaging,
            ids: Box::new(RandomBookingId),
            notify_timeout,
            events,
        }
    }

    pub fn with_id_generator(mut self, ids: impl BookingIdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BookingEvent> {
        self.events.subscribe()
    }

    pub async fn create(&self, input: NewBooking) -> Result<Booking, AppError> {
        let draft = input.validate().map_err(AppError::Validation)?;

        let mut booking = Booking {
            id: Uuid::new_v4().to_string(),
            booking_id: String::new(),
            name: draft.name,
            phone: draft.phone,
            device: draft.device,
            service: draft.service,
            address: draft.address,
            datetime: draft.datetime,
            status: BookingStatus::Pending,
            // Stored with microsecond precision; trim now so the returned
            // booking equals what a later read yields.
            created_at: Utc::now().trunc_subsecs(6),
        };

        for attempt in 1..=MAX_ID_ATTEMPTS {
            booking.booking_id = identifier::normalize(&self.ids.generate());

            if self
                .store
                .find_booking_by_booking_id(&booking.booking_id)
                .await?
                .is_some()
            {
                tracing::warn!(booking_id = %booking.booking_id, attempt, "booking id taken, regenerating");
                continue;
            }

            // The lookup above can race another insert; the unique index
            // decides.
            match self.store.insert_booking(&booking).await {
                Ok(()) => {
                    tracing::info!(id = %booking.id, booking_id = %booking.booking_id, "booking created");
                    self.publish(BookingEventKind::Created, &booking);
                    return Ok(booking);
                }
                Err(StoreError::DuplicateKey(detail)) => {
                    tracing::warn!(booking_id = %booking.booking_id, attempt, detail = %detail, "booking id collided on insert, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::IdentifierExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Case-insensitive lookup by the customer-facing identifier.
    pub async fn get_by_booking_id(&self, raw: &str) -> Result<Booking, AppError> {
        let booking_id = identifier::normalize(raw);
        if booking_id.is_empty() {
            return Err(AppError::NotFound("booking id is required".to_string()));
        }

        self.store
            .find_booking_by_booking_id(&booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("invalid booking id: {booking_id}")))
    }

    pub async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        Ok(self.store.list_bookings().await?)
    }

    pub async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError> {
        let (booking, _notification) = self.update_status_tracked(id, status).await?;
        Ok(booking)
    }

    /// Like [`update_status`](Self::update_status), also returning the handle
    /// of the detached notification task when one was started. Any status may
    /// follow any other, including moving back to `pending`.
    pub async fn update_status_tracked(
        &self,
        id: &str,
        status: &str,
    ) -> Result<(Booking, Option<JoinHandle<()>>), AppError> {
        let status = BookingStatus::parse(status).ok_or_else(|| {
            AppError::Validation(format!(
                "invalid status '{}', expected one of: pending, accepted, ontheway, completed",
                status.trim()
            ))
        })?;

        let booking = self
            .store
            .update_booking_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;

        tracing::info!(id = %booking.id, booking_id = %booking.booking_id, status = %status, "booking status updated");
        self.publish(BookingEventKind::StatusUpdated, &booking);

        let notification = status
            .notification_message(&booking.name)
            .map(|message| {
                self.spawn_notification(booking.booking_id.clone(), booking.phone.clone(), message)
            });

        Ok((booking, notification))
    }

    pub async fn delete(&self, id: &str) -> Result<Booking, AppError> {
        let booking = self
            .store
            .delete_booking(id)
            .await?
            .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;

        tracing::info!(id = %booking.id, booking_id = %booking.booking_id, "booking deleted");
        self.publish(BookingEventKind::Deleted, &booking);
        Ok(booking)
    }

    // Runs after the status write has committed; its outcome never reaches
    // the caller. Logs carry the booking id, never the customer's number.
    fn spawn_notification(&self, booking_id: String, to: String, body: String) -> JoinHandle<()> {
        let messaging = Arc::clone(&self.messaging);
        let timeout = self.notify_timeout;

        tokio::spawn(async move {
            match tokio::time::timeout(timeout, messaging.send_message(&to, &body)).await {
                Ok(Ok(())) => tracing::info!(booking_id = %booking_id, "status notification sent"),
                Ok(Err(e)) => tracing::error!(
                    booking_id = %booking_id,
                    error = %e,
                    "failed to send status notification"
                ),
                Err(_) => tracing::error!(
                    booking_id = %booking_id,
                    timeout_ms = timeout.as_millis() as u64,
                    "status notification timed out"
                ),
            }
        })
    }

    fn publish(&self, kind: BookingEventKind, booking: &Booking) {
        // No subscribers is fine.
        let _ = self.events.send(BookingEvent {
            kind,
            booking: booking.clone(),
        });
    }
}
