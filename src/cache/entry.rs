//! In-memory cache entries.

use chrono::{DateTime, Utc};
use std::any::Any;
use std::sync::Arc;

/// A memoized probe result.
///
/// The value is shared behind an `Arc` and never mutated after the entry
/// is created; every caller receives the same frozen instance.
#[derive(Clone)]
pub struct CacheEntry {
    /// Probe key.
    pub key: String,
    /// When the value was computed (or loaded from disk).
    pub computed_at: DateTime<Utc>,
    value: Arc<dyn Any + Send + Sync>,
}

impl CacheEntry {
    /// Create a new entry stamped with the current time.
    pub fn new<T>(key: impl Into<String>, value: Arc<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            computed_at: Utc::now(),
            value,
        }
    }

    /// Get the value if it has type `T`.
    pub fn value<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Get the age of this entry.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.computed_at)
    }
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("computed_at", &self.computed_at)
            .finish_non_exhaustive()
    }
}
