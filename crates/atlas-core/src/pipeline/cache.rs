use crate::models::Spacing;
use crate::pipeline::QueryResult;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub config: String,
    pub spacing: Spacing,
}

impl CacheKey {
    pub fn new(config: impl Into<String>, spacing: Spacing) -> Self {
        Self {
            config: config.into(),
            spacing,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Bounded memo of query results, least recently used evicted first
///
/// Results never go stale: the source tables are immutable for the lifetime
/// of the process.
#[derive(Debug)]
pub struct QueryCache {
    capacity: usize,
    entries: HashMap<CacheKey, Arc<QueryResult>>,
    recency: VecDeque<CacheKey>,
    hits: u64,
    misses: u64,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            recency: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<QueryResult>> {
        match self.entries.get(key) {
            Some(result) => {
                let result = Arc::clone(result);
                self.touch(key);
                self.hits += 1;
                Some(result)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: CacheKey, result: Arc<QueryResult>) {
        if self.capacity == 0 {
            return;
        }

        if self.entries.contains_key(&key) {
            self.touch(&key);
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.recency.pop_front() {
                Some(oldest) => {
                    tracing::debug!("Evicting cached query ({}, {})", oldest.config, oldest.spacing);
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.recency.push_back(key.clone());
        self.entries.insert(key, result);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, key: &CacheKey) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            if let Some(k) = self.recency.remove(pos) {
                self.recency.push_back(k);
            }
        }
    }
}
