#![deny(missing_docs)]

//! # Unique Value Generator
//!
//! Deterministic, memoized collision resolver used to name hoisted sources.
//!
//! A seed is hashed into a candidate. When the candidate already belongs to a
//! different seed, the *previous candidate* is hashed again until a free value is
//! found or [`MAX_COLLISION_DEPTH`] candidates have been rejected.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use std::collections::HashMap;
use xxhash_rust::xxh64::xxh64;

/// Number of candidates checked for one seed before giving up.
pub const MAX_COLLISION_DEPTH: usize = 100;

/// Length of the hex keys produced by [`Xxh64Hasher`].
pub const DEFAULT_KEY_LENGTH: usize = 7;

/// A hashing backend turning a string into a short key.
///
/// Implemented for any `Fn(&str) -> String`, so tests can pass closures.
pub trait ValueHasher: Send + Sync {
    /// Hashes `value` into a key.
    fn hash(&self, value: &str) -> String;
}

impl<F> ValueHasher for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn hash(&self, value: &str) -> String {
        self(value)
    }
}

/// XXH64 backed hasher producing truncated lowercase hex keys.
#[derive(Debug, Clone)]
pub struct Xxh64Hasher {
    seed: u64,
    length: usize,
}

impl Xxh64Hasher {
    /// Creates a hasher with the default seed and key length.
    pub fn new() -> Self {
        Self {
            seed: 0,
            length: DEFAULT_KEY_LENGTH,
        }
    }

    /// Overrides the xxHash seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the key length (clamped to the 16 hex digits of a 64 bit hash).
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.clamp(1, 16);
        self
    }
}

impl Default for Xxh64Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueHasher for Xxh64Hasher {
    fn hash(&self, value: &str) -> String {
        let mut hex = format!("{:016x}", xxh64(value.as_bytes(), self.seed));
        hex.truncate(self.length);
        hex
    }
}

/// Seed to unique value assignments for one bundle run.
///
/// Entries are only ever added.
#[derive(Debug, Clone, Default)]
pub struct UniqueValueMap {
    assigned: IndexMap<String, String>,
    owners: HashMap<String, String>,
}

impl UniqueValueMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value assigned to `seed`, if any.
    pub fn get(&self, seed: &str) -> Option<&str> {
        self.assigned.get(seed).map(String::as_str)
    }

    /// Returns the seed that owns `value`, if any.
    pub fn owner_of(&self, value: &str) -> Option<&str> {
        self.owners.get(value).map(String::as_str)
    }

    /// Number of assigned seeds.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// Whether nothing has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Iterates `(seed, value)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assigned.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn is_available(&self, value: &str) -> bool {
        !self.owners.contains_key(value)
    }

    fn assign(&mut self, seed: &str, value: &str) {
        self.assigned.insert(seed.to_string(), value.to_string());
        self.owners.insert(value.to_string(), seed.to_string());
    }
}

impl<S: Into<String>, V: Into<String>> FromIterator<(S, V)> for UniqueValueMap {
    /// Seeds the map with existing assignments. Later pairs never steal a value
    /// already owned by an earlier seed.
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (seed, value) in iter {
            let (seed, value) = (seed.into(), value.into());
            if map.get(&seed).is_none() && map.is_available(&value) {
                map.assign(&seed, &value);
            }
        }
        map
    }
}

/// Returns the unique value for `seed`, generating and recording one if needed.
///
/// # Arguments
///
/// * `hash` - Hash function. May be non-deterministic; repeat calls for a known
///   seed are answered from `map` without calling it.
/// * `seed` - The value to name.
/// * `map` - Accumulator of assignments for the current run.
///
/// # Errors
///
/// [`AppError::CollisionDepthExceeded`] when [`MAX_COLLISION_DEPTH`] candidates are all taken.
pub fn generate_unique_value<H>(
    mut hash: H,
    seed: &str,
    map: &mut UniqueValueMap,
) -> AppResult<String>
where
    H: FnMut(&str) -> String,
{
    if let Some(existing) = map.get(seed) {
        return Ok(existing.to_string());
    }

    let mut candidate = hash(seed);
    for _ in 0..MAX_COLLISION_DEPTH {
        if map.is_available(&candidate) {
            map.assign(seed, &candidate);
            return Ok(candidate);
        }
        candidate = hash(&candidate);
    }

    Err(AppError::CollisionDepthExceeded {
        seed: seed.to_string(),
        attempts: MAX_COLLISION_DEPTH,
    })
}
