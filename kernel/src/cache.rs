//! Per-problem memoization store.
//!
//! Heuristics receive only `&Problem`, so the store is interior-mutable.
//! It is created empty on first access and lives exactly as long as the
//! problem that owns it. There is no eviction.
//!
//! `ProblemCache` is `!Sync`: two concurrent searches cannot share one
//! problem's cache by accident.

use std::any::Any;
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

type Entries = RefCell<HashMap<String, Rc<dyn Any>>>;

/// A lazily allocated key/value store addressed by caller-chosen keys.
///
/// Values are type-erased and shared (`Rc`), so large precomputed tables are
/// handed out without copying.
#[derive(Default)]
pub struct ProblemCache {
    entries: OnceCell<Entries>,
}

/// Failure reading a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The key exists but holds a value of another type.
    #[error("cache entry {key:?} does not hold a value of type {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}

impl ProblemCache {
    /// An empty, not yet allocated cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> &Entries {
        self.entries.get_or_init(|| RefCell::new(HashMap::new()))
    }

    /// Whether any access has allocated the backing map yet.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.entries.get().is_some()
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::TypeMismatch`] if the entry holds another type.
    pub fn get<T: Any>(&self, key: &str) -> Result<Option<Rc<T>>, CacheError> {
        let entry = self.entries().borrow().get(key).cloned();
        match entry {
            None => Ok(None),
            Some(value) => value
                .downcast::<T>()
                .map(Some)
                .map_err(|_| CacheError::TypeMismatch {
                    key: key.to_string(),
                    expected: std::any::type_name::<T>(),
                }),
        }
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn insert<T: Any>(&self, key: impl Into<String>, value: T) -> Rc<T> {
        let shared = Rc::new(value);
        let erased: Rc<dyn Any> = shared.clone();
        self.entries().borrow_mut().insert(key.into(), erased);
        shared
    }

    /// Read `key`, computing and storing it with `init` on a miss.
    ///
    /// `init` runs without any borrow held, so it may read the cache itself.
    /// If `init` stored the same key, that value wins.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::TypeMismatch`] if the entry holds another type.
    pub fn get_or_insert_with<T: Any>(
        &self,
        key: &str,
        init: impl FnOnce() -> T,
    ) -> Result<Rc<T>, CacheError> {
        if let Some(hit) = self.get::<T>(key)? {
            return Ok(hit);
        }
        let value = init();
        if let Some(raced) = self.get::<T>(key)? {
            return Ok(raced);
        }
        Ok(self.insert(key, value))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries().borrow().contains_key(key)
    }

    /// Drop the entry under `key`. Returns whether one existed.
    pub fn remove(&self, key: &str) -> bool {
        self.entries().borrow_mut().remove(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries().borrow_mut().clear();
    }
}

impl std::fmt::Debug for ProblemCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self
            .entries
            .get()
            .map(|e| e.borrow().keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        f.debug_struct("ProblemCache")
            .field("allocated", &self.is_allocated())
            .field("keys", &keys)
            .finish()
    }
}
