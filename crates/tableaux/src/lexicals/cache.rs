//! Bounded interning cache for sentences
//!
//! Structurally equal sentences built in different places end up sharing one
//! allocation once they pass through the cache. The cache is least-recently
//! used: a hit moves the entry to the back, and inserting past capacity evicts
//! from the front.

use super::sentence::Sentence;
use indexmap::IndexSet;

/// LRU cache keyed by sentence identity.
#[derive(Debug, Clone)]
pub struct SentenceCache {
    entries: IndexSet<Sentence>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for SentenceCache {
    fn default() -> Self {
        SentenceCache::new(Self::DEFAULT_CAPACITY)
    }
}

impl SentenceCache {
    pub const DEFAULT_CAPACITY: usize = 10_000;

    /// Create a cache holding at most `capacity` sentences (at least one).
    pub fn new(capacity: usize) -> Self {
        SentenceCache {
            entries: IndexSet::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached handle equal to `sentence`, or cache and return it.
    pub fn intern(&mut self, sentence: Sentence) -> Sentence {
        if let Some(cached) = self.entries.shift_take(&sentence) {
            self.hits += 1;
            self.entries.insert(cached.clone());
            return cached;
        }
        self.misses += 1;
        self.entries.insert(sentence.clone());
        while self.entries.len() > self.capacity {
            self.entries.shift_remove_index(0);
        }
        sentence
    }

    pub fn contains(&self, sentence: &Sentence) -> bool {
        self.entries.contains(sentence)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
