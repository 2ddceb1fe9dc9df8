use crate::error::Result;
use crate::types::AnalysisResult;
use crate::view::GraphView;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Cache key: the entity an analysis was run for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub repository: String,
    pub entity_id: String,
}

impl CacheKey {
    pub fn new(repository: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            entity_id: entity_id.into(),
        }
    }
}

/// Bounded cache of prepared analyses
///
/// Entries only leave through LRU eviction or an explicit `invalidate*`
/// call; there is no time-based expiry.
pub struct AnalysisCache {
    entries: LruCache<CacheKey, Arc<GraphView>>,
}

impl AnalysisCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<GraphView>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: CacheKey, view: GraphView) -> Arc<GraphView> {
        let view = Arc::new(view);
        self.entries.put(key, Arc::clone(&view));
        view
    }

    /// Cached view for `key`, running `loader` on a miss.
    ///
    /// A failing loader leaves the cache untouched.
    pub fn get_or_try_insert_with<F>(&mut self, key: CacheKey, loader: F) -> Result<Arc<GraphView>>
    where
        F: FnOnce() -> Result<AnalysisResult>,
    {
        if let Some(view) = self.entries.get(&key) {
            log::debug!("Analysis cache hit for {}:{}", key.repository, key.entity_id);
            return Ok(Arc::clone(view));
        }

        log::debug!("Analysis cache miss for {}:{}", key.repository, key.entity_id);
        let view = GraphView::new(loader()?)?;
        Ok(self.insert(key, view))
    }

    /// Drop one entry; returns whether it was present
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.pop(key).is_some()
    }

    /// Drop every entry of `repository`; returns how many were removed
    pub fn invalidate_repository(&mut self, repository: &str) -> usize {
        let stale: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(key, _)| key.repository == repository)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            self.entries.pop(key);
        }

        if !stale.is_empty() {
            log::debug!("Invalidated {} cached analyses for {repository}", stale.len());
        }
        stale.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
