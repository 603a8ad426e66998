//! Equity cache: the one piece of shared mutable state in the recommender
//! pipeline.
//!
//! Modeled as an external collaborator — `get(key) -> value?`, `put(key,
//! value)` — rather than something this crate owns outright: callers that
//! skip wiring one up just recompute every call. A `std::sync::RwLock`
//! backs the default implementation rather than a concurrent-map crate,
//! since a plain last-writer-wins map already satisfies
//! single-writer-per-key semantics and nothing else in this workspace pulls
//! one in.

use crate::equity::EquityEstimate;
use crate::evaluator::HandCategory;
use std::collections::HashMap;
use std::sync::RwLock;

/// Content-addressed key: hero category, a board-texture descriptor string,
/// a range-descriptor string, and opponent count. `matrix_version` lets a
/// cache reject entries computed against a since-replaced probability
/// matrix (`CacheInconsistency`, treated as a miss).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub hero_category: HandCategory,
    pub board_texture_key: String,
    pub range_descriptor_key: String,
    pub num_opponents: usize,
    pub matrix_version: u64,
}

#[derive(Debug, Clone)]
pub struct CachedEquity {
    pub estimate: EquityEstimate,
    pub matrix_version: u64,
}

pub trait EquityCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<EquityEstimate>;
    fn put(&self, key: CacheKey, value: EquityEstimate);
}

#[derive(Default)]
pub struct InMemoryEquityCache {
    entries: RwLock<HashMap<CacheKey, CachedEquity>>,
}

impl InMemoryEquityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("equity cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EquityCache for InMemoryEquityCache {
    fn get(&self, key: &CacheKey) -> Option<EquityEstimate> {
        let entries = self.entries.read().expect("equity cache lock poisoned");
        let cached = entries.get(key)?;
        if cached.matrix_version != key.matrix_version {
            // CacheInconsistency: a stale matrix version. Treated as a
            // miss, never surfaced as an error.
            log::debug!(
                "equity cache miss: stale matrix version for {:?} (cached {}, current {})",
                key.hero_category, cached.matrix_version, key.matrix_version
            );
            return None;
        }
        Some(cached.estimate.clone())
    }

    fn put(&self, key: CacheKey, value: EquityEstimate) {
        let mut entries = self.entries.write().expect("equity cache lock poisoned");
        let matrix_version = key.matrix_version;
        entries.insert(
            key,
            CachedEquity {
                estimate: value,
                matrix_version,
            },
        );
    }
}
