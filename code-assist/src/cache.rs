//! Rendered-result cache.
//!
//! Key: SHA256 over (task, source language, code, target language), each
//! field length-prefixed so distinct input tuples can never serialize to the
//! same byte stream. Store: bounded LRU map behind a mutex; `get` promotes,
//! eviction drops the least recently used entry. Same-key races are
//! last-writer-wins, which is fine because both writers rendered the same
//! inputs.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::registry::Language;
use crate::task::Task;

/// Default entry capacity when none is configured.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Deterministic identity of one (task, source, code, target) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    /// Computes the key for a request.
    ///
    /// An absent target hashes differently from any present one because the
    /// length prefix of the absent field is distinct from every tag's.
    pub fn compute(task: Task, source: Language, code: &str, target: Option<Language>) -> Self {
        let mut hasher = Sha256::new();
        update_field(&mut hasher, task.as_str().as_bytes());
        update_field(&mut hasher, source.tag().as_bytes());
        update_field(&mut hasher, code.as_bytes());
        match target {
            Some(lang) => update_field(&mut hasher, lang.tag().as_bytes()),
            None => hasher.update(u64::MAX.to_le_bytes()),
        }
        Self(hasher.finalize().into())
    }
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Bounded in-memory store of rendered markup, keyed by [`CacheKey`].
pub struct ResultCache {
    inner: Mutex<LruCache<CacheKey, String>>,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ResultCache")
            .field("len", &inner.len())
            .field("cap", &inner.cap())
            .finish()
    }
}

impl ResultCache {
    /// Creates a store holding at most `capacity` entries (floored at 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Looks up a rendered result. A miss (never set, or evicted) is `None`.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        self.inner.lock().get(key).cloned()
    }

    /// Stores a rendered result, evicting the least recently used entry when
    /// the store is full.
    pub fn put(&self, key: CacheKey, markup: String) {
        self.inner.lock().put(key, markup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_agree() {
        let a = CacheKey::compute(Task::Fix, Language::Python, "print(1)", None);
        let b = CacheKey::compute(Task::Fix, Language::Python, "print(1)", None);
        assert_eq!(a, b);
    }

    #[test]
    fn every_component_discriminates() {
        let base = CacheKey::compute(Task::Fix, Language::Python, "print(1)", None);
        assert_ne!(
            base,
            CacheKey::compute(Task::Explain, Language::Python, "print(1)", None)
        );
        assert_ne!(
            base,
            CacheKey::compute(Task::Fix, Language::Lua, "print(1)", None)
        );
        assert_ne!(
            base,
            CacheKey::compute(Task::Fix, Language::Python, "print(2)", None)
        );
        assert_ne!(
            base,
            CacheKey::compute(Task::Fix, Language::Python, "print(1)", Some(Language::Go))
        );
    }

    #[test]
    fn field_boundaries_are_domain_separated() {
        // Shifting a byte between adjacent fields must change the key.
        let a = CacheKey::compute(Task::Fix, Language::Go, "x", None);
        let b = CacheKey::compute(Task::Fix, Language::Go, "", None);
        assert_ne!(a, b);
    }

    #[test]
    fn get_after_put_round_trips() {
        let cache = ResultCache::new(4);
        let key = CacheKey::compute(Task::Explain, Language::Rust, "fn main() {}", None);
        assert_eq!(cache.get(&key), None);
        cache.put(key, "<pre>ok</pre>".into());
        assert_eq!(cache.get(&key).as_deref(), Some("<pre>ok</pre>"));
    }

    #[test]
    fn eviction_is_least_recently_used() {
        let cache = ResultCache::new(2);
        let k1 = CacheKey::compute(Task::Explain, Language::Rust, "1", None);
        let k2 = CacheKey::compute(Task::Explain, Language::Rust, "2", None);
        let k3 = CacheKey::compute(Task::Explain, Language::Rust, "3", None);

        cache.put(k1, "one".into());
        cache.put(k2, "two".into());
        cache.get(&k1); // k1 is now the most recent
        cache.put(k3, "three".into());

        assert!(cache.get(&k1).is_some());
        assert!(cache.get(&k2).is_none());
        assert!(cache.get(&k3).is_some());
    }

    #[test]
    fn zero_capacity_is_floored_to_one() {
        let cache = ResultCache::new(0);
        let key = CacheKey::compute(Task::Fix, Language::Php, "<?php", None);
        cache.put(key, "entry".into());
        assert!(cache.get(&key).is_some());
    }
}
