//! Per-resource invalidation shared by mutations and list queries

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Cache generations per resource key
///
/// A list query remembers the generation it last fetched; once a mutation
/// invalidates the resource the generation moves and the query refetches.
/// Cloning shares the same counters.
#[derive(Debug, Clone, Default)]
pub struct QueryInvalidator {
    generations: Arc<RwLock<HashMap<String, u64>>>,
}

impl QueryInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self, resource: &str) -> u64 {
        self.generations.read().get(resource).copied().unwrap_or(0)
    }

    /// Mark every query on `resource` stale; returns the new generation
    pub fn invalidate(&self, resource: &str) -> u64 {
        let mut generations = self.generations.write();
        let generation = generations.entry(resource.to_string()).or_insert(0);
        *generation += 1;
        tracing::debug!(resource, generation = *generation, "Invalidated list queries");
        *generation
    }
}
