// Stats cache over the item store.
// Holds the last computed aggregate and recomputes it on coalesced invalidations.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::model::{Item, Stats};
use crate::store::ItemStore;

/// Aggregate over every item at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub total: usize,
    pub average_price: f64,
    pub computed_at: DateTime<Utc>,
}

impl StatsSnapshot {
    /// Build a snapshot from the full item collection.
    pub fn from_items(items: &[Item]) -> Self {
        let total = items.len();
        let average_price = if total == 0 {
            0.0
        } else {
            items.iter().map(|item| item.price).sum::<f64>() / total as f64
        };
        Self {
            total,
            average_price,
            computed_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::from_items(&[])
    }

    /// Wire form, without the timestamp.
    pub fn stats(&self) -> Stats {
        Stats {
            total: self.total,
            average_price: self.average_price,
        }
    }
}

/// Cached stats, owned by whoever serves them.
///
/// Reads return the last completed recomputation. Invalidations are coalesced: any
/// number of them arriving while one is pending collapse into a single recompute,
/// and the refresher task runs at most one recompute at a time.
#[derive(Debug)]
pub struct StatsCache {
    store: Arc<ItemStore>,
    current: RwLock<Option<StatsSnapshot>>,
    trigger: Notify,
    recomputations: AtomicU64,
}

impl StatsCache {
    pub fn new(store: Arc<ItemStore>) -> Arc<Self> {
        Arc::new(Self {
            store,
            current: RwLock::new(None),
            trigger: Notify::new(),
            recomputations: AtomicU64::new(0),
        })
    }

    /// Rebuild the snapshot from the store and publish it.
    ///
    /// A store failure publishes an empty snapshot.
    pub async fn recompute(&self) -> StatsSnapshot {
        let snapshot = match self.store.load().await {
            Ok(items) => StatsSnapshot::from_items(&items),
            Err(e) => {
                error!(error = %e, "failed to load stats, publishing empty snapshot");
                StatsSnapshot::empty()
            }
        };

        *self.current.write().await = Some(snapshot.clone());
        let n = self.recomputations.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            total = snapshot.total,
            average_price = snapshot.average_price,
            recomputations = n,
            "stats recomputed"
        );
        snapshot
    }

    /// The last published snapshot, computing one first if none exists yet.
    pub async fn snapshot(&self) -> StatsSnapshot {
        if let Some(snapshot) = self.current.read().await.clone() {
            return snapshot;
        }
        self.recompute().await
    }

    /// Request a recompute from the refresher task.
    pub fn invalidate(&self) {
        self.trigger.notify_one();
    }

    /// Number of recomputes completed so far.
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::SeqCst)
    }

    /// Start the background task that services `invalidate`.
    pub fn spawn_refresher(self: &Arc<Self>) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                cache.trigger.notified().await;
                info!("items file changed, updating stats cache");
                cache.recompute().await;
            }
        })
    }
}
