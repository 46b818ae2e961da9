use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use parking_lot::Mutex;

use crate::key::ValidKey;
use crate::raw::{InsertResult, RawTable};

/// The initial capacity of a map created with [`HashMap::new`].
const DEFAULT_CAPACITY: usize = 16;

/// A concurrent hash table with linear probing, guarded by a single mutex.
///
/// Every operation acquires the access lock, runs to completion, and releases it, so
/// operations are totally ordered: any observer sees them in a single global sequence.
/// Readers do not run in parallel with each other or with writers.
///
/// The table doubles in capacity once it becomes more than half full. Growth happens
/// inside `insert` while the lock is held and is invisible to callers beyond its cost.
///
/// Lookups return clones of the stored value ([`get`](HashMap::get) requires `V: Clone`);
/// no references into the table's own storage are ever handed out.
///
/// # Examples
///
/// ```
/// use std::thread;
///
/// let map = quince::HashMap::new();
///
/// thread::scope(|s| {
///     for i in 0..4 {
///         let map = &map;
///         s.spawn(move || {
///             for key in (0..100).map(|k| i * 100 + k) {
///                 map.insert(key, key * 2);
///             }
///         });
///     }
/// });
///
/// assert_eq!(map.len(), 400);
/// assert_eq!(map.get(&123), Some(246));
/// ```
pub struct HashMap<K, V, S = RandomState> {
    pub(crate) raw: Mutex<RawTable<K, V>>,
    pub(crate) hasher: S,
}

impl<K, V> HashMap<K, V> {
    /// Creates an empty `HashMap` with the default initial capacity of 16 slots.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: quince::HashMap<&str, i32> = quince::HashMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> HashMap<K, V> {
        HashMap::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `HashMap` with `capacity` slots.
    ///
    /// Note that `capacity` counts slots, not entries: the table grows once more than
    /// half of its slots are live.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> HashMap<K, V> {
        HashMap::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty `HashMap` with the default initial capacity, using `hasher` to
    /// hash keys.
    pub fn with_hasher(hasher: S) -> HashMap<K, V, S> {
        HashMap::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    /// Creates an empty `HashMap` with `capacity` slots, using `hasher` to hash keys.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> HashMap<K, V, S> {
        HashMap {
            raw: Mutex::new(RawTable::with_capacity(capacity)),
            hasher,
        }
    }

    /// Returns the number of live entries in the map.
    ///
    /// With concurrent writers the count is only guaranteed accurate at the instant the
    /// access lock is held; it may be stale by the time the caller inspects it.
    pub fn len(&self) -> usize {
        self.raw.lock().len()
    }

    /// Returns `true` if the map contains no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current number of slots in the backing table.
    pub fn capacity(&self) -> usize {
        self.raw.lock().capacity()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq + ValidKey,
    S: BuildHasher,
{
    /// Inserts a key-value pair, overwriting the value in place if `key` is already
    /// present.
    ///
    /// Returns `false` only if `key` is its type's invalid sentinel (see [`ValidKey`]),
    /// in which case the map is left untouched. For any valid key the insert succeeds,
    /// growing the table as needed, and returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// let map = quince::HashMap::new();
    ///
    /// assert!(map.insert("apple", 3));
    /// assert!(map.insert("apple", 4));
    /// assert_eq!(map.get("apple"), Some(4));
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// A sentinel key is rejected rather than stored:
    ///
    /// ```
    /// let x = 7;
    /// let map = quince::HashMap::new();
    ///
    /// assert!(map.insert(&x as *const i32, "seven"));
    /// assert!(!map.insert(std::ptr::null::<i32>(), "nothing"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&self, key: K, value: V) -> bool {
        if !key.is_valid() {
            return false;
        }

        let hash = self.hasher.hash_one(&key);
        let mut table = self.raw.lock();

        table.reserve_one();

        match table.insert(hash, key, value) {
            InsertResult::Inserted | InsertResult::Replaced => true,
            InsertResult::Full(key, value) => {
                // The load-factor check above keeps live entries to at most half the
                // slots, but a backlog of tombstones can still occupy every slot and wrap
                // the probe. Rebuild and retry once: the fresh table carries no
                // tombstones and is at most half full, so the retry cannot wrap again.
                table.grow();

                match table.insert(hash, key, value) {
                    InsertResult::Full(..) => unreachable!("table full after forced growth"),
                    _ => true,
                }
            }
        }
    }

    /// Returns a clone of the value associated with `key`, or `None` if `key` is absent
    /// or is its type's invalid sentinel.
    ///
    /// The key may be any borrowed form of the map's key type, with the usual requirement
    /// that `Hash` and `Eq` agree between the two.
    ///
    /// # Examples
    ///
    /// ```
    /// let map = quince::HashMap::new();
    /// map.insert(String::from("apple"), 3);
    ///
    /// assert_eq!(map.get("apple"), Some(3));
    /// assert_eq!(map.get("pear"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ValidKey + ?Sized,
        V: Clone,
    {
        if !key.is_valid() {
            return None;
        }

        let hash = self.hasher.hash_one(key);
        self.raw.lock().get(hash, key).cloned()
    }

    /// Returns `true` if the map contains a live entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ValidKey + ?Sized,
    {
        if !key.is_valid() {
            return false;
        }

        let hash = self.hasher.hash_one(key);
        self.raw.lock().get(hash, key).is_some()
    }

    /// Removes the entry for `key`, leaving a tombstone in its slot.
    ///
    /// Returns `true` if a live entry was removed. Removing an absent key (or a sentinel
    /// key) is a no-op reported as `false`, not an error. Tombstones keep probe chains
    /// for other keys intact and are reclaimed the next time the table grows.
    ///
    /// # Examples
    ///
    /// ```
    /// let map = quince::HashMap::new();
    /// map.insert(1, "one");
    ///
    /// assert!(map.remove(&1));
    /// assert!(!map.remove(&1));
    /// assert_eq!(map.get(&1), None);
    /// ```
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ValidKey + ?Sized,
    {
        if !key.is_valid() {
            return false;
        }

        let hash = self.hasher.hash_one(key);
        self.raw.lock().remove(hash, key)
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    S: Default,
{
    fn default() -> HashMap<K, V, S> {
        HashMap::with_capacity_and_hasher(DEFAULT_CAPACITY, S::default())
    }
}

impl<K, V, S> Clone for HashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> HashMap<K, V, S> {
        HashMap {
            raw: Mutex::new(self.raw.lock().clone()),
            hasher: self.hasher.clone(),
        }
    }
}

impl<K, V, S> fmt::Debug for HashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.raw.lock();
        f.debug_map().entries(table.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq + ValidKey,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq + ValidKey,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> HashMap<K, V, S> {
        let iter = iter.into_iter();
        let capacity = iter.size_hint().0.max(DEFAULT_CAPACITY);

        let mut map = HashMap::with_capacity_and_hasher(capacity, S::default());
        map.extend(iter);
        map
    }
}
