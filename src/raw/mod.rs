mod probe;

use std::borrow::Borrow;
use std::mem;

use self::probe::Probe;

/// One storage cell in the table.
///
/// A slot is `Empty` until first written. Removal turns a `Live` slot into a `Tombstone`
/// rather than back into `Empty`: probe chains for other keys may run through the slot, and
/// an `Empty` hole would cut them short. Tombstones block probing like any occupied slot,
/// never match a lookup, and are only reclaimed when growth rebuilds the table.
#[derive(Clone)]
pub(crate) enum Slot<K, V> {
    /// Never used.
    Empty,
    /// Holds an entry, along with the full (unreduced) hash of its key.
    Live { hash: u64, key: K, value: V },
    /// Was live, logically absent.
    Tombstone,
}

/// The result of a raw insert.
pub(crate) enum InsertResult<K, V> {
    /// Wrote the entry into an empty slot.
    Inserted,
    /// Overwrote the value of an existing live entry for the same key.
    Replaced,
    /// Every slot is occupied by a live entry or tombstone for a different key; the
    /// entry is handed back so the caller can grow the table and retry.
    Full(K, V),
}

/// A flat open-addressing table with linear probing.
///
/// The table itself is not thread-safe and does no hashing: callers pass in the key's full
/// hash, which each live slot caches so that growth can rehash without access to the
/// hasher. All concurrency control lives in the [`HashMap`](crate::HashMap) wrapper, which
/// guards every call with its access lock.
#[derive(Clone)]
pub(crate) struct RawTable<K, V> {
    slots: Box<[Slot<K, V>]>,
    /// Number of live slots. Tombstones do not count.
    len: usize,
}

impl<K, V> RawTable<K, V> {
    /// Creates a table with `capacity` empty slots.
    pub fn with_capacity(capacity: usize) -> RawTable<K, V> {
        assert!(capacity > 0, "capacity must be non-zero");

        RawTable {
            slots: new_slots(capacity),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over the live entries, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Live { key, value, .. } => Some((key, value)),
            _ => None,
        })
    }
}

impl<K, V> RawTable<K, V>
where
    K: Eq,
{
    /// Grows the table if it is more than half full.
    ///
    /// Called at the start of every insert, so the table grows proactively rather than
    /// waiting for a probe to wrap.
    pub fn reserve_one(&mut self) {
        if self.len * 2 > self.capacity() {
            self.grow();
        }
    }

    /// Rebuilds the table at double the capacity.
    ///
    /// Live entries are rehashed into the new slot array by fresh linear probing from
    /// their cached hash; tombstones and empty slots are dropped. This is a stop-the-world
    /// operation for every other caller blocked on the access lock.
    pub fn grow(&mut self) {
        let new_capacity = self.capacity().checked_mul(2).expect("capacity overflow");
        let old = mem::replace(&mut self.slots, new_slots(new_capacity));

        for slot in old.into_vec() {
            if let Slot::Live { hash, key, value } = slot {
                let mut probe = Probe::start(hash, new_capacity);

                // The new table holds only live entries and is at most half full, so an
                // empty slot always turns up before the probe wraps.
                while !matches!(self.slots[probe.i], Slot::Empty) {
                    probe.next();
                }

                self.slots[probe.i] = Slot::Live { hash, key, value };
            }
        }
    }

    /// Inserts an entry, overwriting the value in place if the key is already live.
    ///
    /// Tombstones are skipped, not reused: a fresh key keeps probing past them until it
    /// finds a truly empty slot or a live match. Returns [`InsertResult::Full`] if the
    /// probe wraps without finding either.
    pub fn insert(&mut self, hash: u64, key: K, value: V) -> InsertResult<K, V> {
        let mut probe = Probe::start(hash, self.capacity());

        let i = loop {
            match &self.slots[probe.i] {
                Slot::Empty => break probe.i,
                Slot::Live { hash: h, key: k, .. } if *h == hash && *k == key => break probe.i,
                _ => {}
            }

            probe.next();
            if probe.exhausted() {
                return InsertResult::Full(key, value);
            }
        };

        match &mut self.slots[i] {
            Slot::Live { value: existing, .. } => {
                *existing = value;
                InsertResult::Replaced
            }
            slot => {
                *slot = Slot::Live { hash, key, value };
                self.len += 1;
                InsertResult::Inserted
            }
        }
    }

    /// Returns a reference to the value of the first live slot matching `key`.
    ///
    /// The probe stops at the first empty slot or after a full wrap; either means the key
    /// is absent.
    pub fn get<Q>(&self, hash: u64, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut probe = Probe::start(hash, self.capacity());

        loop {
            match &self.slots[probe.i] {
                Slot::Empty => return None,
                Slot::Live { hash: h, key: k, value } if *h == hash && k.borrow() == key => {
                    return Some(value)
                }
                _ => {}
            }

            probe.next();
            if probe.exhausted() {
                return None;
            }
        }
    }

    /// Tombstones the first live slot matching `key`. Returns `false` if there is none.
    pub fn remove<Q>(&mut self, hash: u64, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut probe = Probe::start(hash, self.capacity());

        let i = loop {
            match &self.slots[probe.i] {
                Slot::Empty => return false,
                Slot::Live { hash: h, key: k, .. } if *h == hash && k.borrow() == key => {
                    break probe.i
                }
                _ => {}
            }

            probe.next();
            if probe.exhausted() {
                return false;
            }
        };

        self.slots[i] = Slot::Tombstone;
        self.len -= 1;
        true
    }
}

fn new_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    (0..capacity).map(|_| Slot::Empty).collect()
}
