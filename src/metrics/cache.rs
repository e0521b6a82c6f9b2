//! Memoized metrics, keyed on snapshot version

use super::{get_all_metrics, NetworkMetrics};
use crate::classify::{EdgeClassifier, PatternClassifier};
use crate::graph::EntityStore;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

type Entries = LruCache<(u64, usize), Arc<NetworkMetrics>>;

/// LRU of computed metrics.
///
/// The cache owns the classifier its entries were computed with. Snapshots are
/// immutable, so a (version, list length) key never goes stale.
pub struct MetricsCache {
    classifier: Box<dyn EdgeClassifier>,
    entries: Mutex<Entries>,
}

impl MetricsCache {
    /// Cache over the keyword classifier. A capacity of 0 is treated as 1
    pub fn new(capacity: usize) -> Self {
        Self::with_classifier(capacity, PatternClassifier::new())
    }

    /// Cache over a custom classifier
    pub fn with_classifier(capacity: usize, classifier: impl EdgeClassifier + 'static) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        MetricsCache {
            classifier: Box::new(classifier),
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cached metrics for the snapshot, computing them on a miss.
    ///
    /// The lock is not held while computing, so two concurrent misses may both
    /// compute; the later insert wins and both results are identical.
    pub fn get_or_compute(&self, store: &EntityStore, top_n: usize) -> Arc<NetworkMetrics> {
        let key = (store.version(), top_n);

        if let Some(hit) = self.lock().get(&key) {
            debug!("Metrics cache hit for snapshot v{}", key.0);
            return Arc::clone(hit);
        }

        let metrics = Arc::new(get_all_metrics(store, self.classifier.as_ref(), top_n));
        self.lock().put(key, Arc::clone(&metrics));
        metrics
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
