use chrono::{DateTime, Utc};
use log::debug;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct Entry<T> {
    value: T,
    built_at: DateTime<Utc>,
    expires_at: Instant,
}

/// Single-slot TTL cache with single-flight population.
///
/// The slot is guarded by an async mutex that stays held across a rebuild,
/// so concurrent callers racing on a cold or expired slot collapse into one
/// in-flight build; the losers wait and then read the committed value. A
/// failed or cancelled build never touches the slot, so the prior entry
/// (possibly absent) survives it.
pub struct TtlCell<T> {
    slot: Mutex<Option<Entry<T>>>,
    ttl: Duration,
}

impl<T: Clone> TtlCell<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    /// Return the cached value if fresh, otherwise run `build` and commit
    /// its result. An expired entry is treated as a miss.
    pub async fn get_or_try_build<F, Fut, E>(&self, build: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if Instant::now() < entry.expires_at {
                debug!("cache hit (snapshot built at {})", entry.built_at);
                return Ok(entry.value.clone());
            }
            debug!("cache entry expired (built at {})", entry.built_at);
        }

        let value = build().await?;
        *slot = Some(Entry {
            value: value.clone(),
            built_at: Utc::now(),
            expires_at: Instant::now() + self.ttl,
        });
        Ok(value)
    }
}
