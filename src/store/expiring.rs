use std::time::Duration;

use tokio::time::Instant;

/// A stored value with an optional deadline.
///
/// Once the deadline has passed the value is logically absent. Stores check
/// this on every access and remove the entry when they find it expired; there
/// is no background sweeper, so an expired value that is never touched again
/// keeps its memory until the next access.
#[derive(Debug, Clone, PartialEq)]
pub struct Expiring<T> {
    value: T,
    expires_at: Option<Instant>,
}

impl<T> Expiring<T> {
    pub fn new(value: T, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    pub fn persistent(value: T) -> Self {
        Self::new(value, None)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }

    /// The value, unless it has expired.
    pub fn live(&self) -> Option<&T> {
        if self.is_expired() {
            None
        } else {
            Some(&self.value)
        }
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }
}
