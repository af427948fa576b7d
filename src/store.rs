// Booking persistence port and an in-memory implementation of it

use crate::booking::{BookingId, BookingRecord, NewBooking};
use crate::error::StoreError;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::debug;

// Document store holding booking records
#[async_trait]
pub trait BookingStore: Send + Sync {
    // Store a new booking. Repeating a submission key returns the original id.
    async fn create(&self, booking: NewBooking) -> Result<BookingId, StoreError>;

    async fn get(&self, id: &BookingId) -> Result<Option<BookingRecord>, StoreError>;

    // All bookings of one user, oldest first
    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<(BookingId, BookingRecord)>, StoreError>;
}

struct StoredBooking {
    sequence: u64,
    record: BookingRecord,
}

#[derive(Default)]
pub struct InMemoryBookingStore {
    records: DashMap<BookingId, StoredBooking>,
    submissions: DashMap<String, BookingId>,
    sequence: AtomicU64,
    fail_next_writes: AtomicUsize,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // Make the next `count` writes fail with a backend error
    pub fn fail_next_writes(&self, count: usize) {
        self.fail_next_writes.store(count, Ordering::SeqCst);
    }

    fn take_injected_failure(&self) -> bool {
        self.fail_next_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create(&self, booking: NewBooking) -> Result<BookingId, StoreError> {
        if self.take_injected_failure() {
            return Err(StoreError::Backend("write rejected".to_string()));
        }

        match self.submissions.entry(booking.submission_key) {
            Entry::Occupied(existing) => {
                debug!(booking_id = %existing.get(), "duplicate submission");
                Ok(existing.get().clone())
            }
            Entry::Vacant(slot) => {
                let id = BookingId::generate();
                let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
                self.records.insert(
                    id.clone(),
                    StoredBooking {
                        sequence,
                        record: booking.record,
                    },
                );
                slot.insert(id.clone());
                Ok(id)
            }
        }
    }

    async fn get(&self, id: &BookingId) -> Result<Option<BookingRecord>, StoreError> {
        Ok(self.records.get(id).map(|stored| stored.record.clone()))
    }

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<(BookingId, BookingRecord)>, StoreError> {
        let mut found: Vec<(u64, BookingId, BookingRecord)> = self
            .records
            .iter()
            .filter(|entry| entry.value().record.user_id == user_id)
            .map(|entry| {
                let stored = entry.value();
                (stored.sequence, entry.key().clone(), stored.record.clone())
            })
            .collect();
        found.sort_by_key(|(sequence, _, _)| *sequence);

        Ok(found.into_iter().map(|(_, id, record)| (id, record)).collect())
    }
}
