use std::time::{Duration, Instant};

use async_trait::async_trait;
use planora_scheduling::StaffMember;
use tokio::sync::RwLock;

use crate::{BookingClient, BookingError};

#[async_trait]
pub trait StaffSource: Send + Sync {
    async fn fetch_staff(&self) -> Result<Vec<StaffMember>, BookingError>;
}

#[async_trait]
impl StaffSource for BookingClient {
    async fn fetch_staff(&self) -> Result<Vec<StaffMember>, BookingError> {
        self.list_staff().await
    }
}

struct CacheEntry {
    fetched_at: Instant,
    staff: Vec<StaffMember>,
}

/// Read-through cache over the staff directory.
///
/// Staff data is slow-moving reference data, so every planning render does
/// not need a directory round-trip. The cache has two invalidation rules and
/// no others: entries expire after the TTL, and `invalidate` drops the entry
/// immediately after a write to the directory.
pub struct StaffDirectory<S = BookingClient> {
    source: S,
    ttl: Duration,
    cached: RwLock<Option<CacheEntry>>,
}

impl<S: StaffSource> StaffDirectory<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cached: RwLock::new(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<StaffMember>, BookingError> {
        if let Some(entry) = self.cached.read().await.as_ref()
            && entry.fetched_at.elapsed() < self.ttl
        {
            return Ok(entry.staff.clone());
        }

        let staff = self.source.fetch_staff().await?;

        *self.cached.write().await = Some(CacheEntry {
            fetched_at: Instant::now(),
            staff: staff.clone(),
        });

        Ok(staff)
    }

    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}
