// A linear probe sequence over a table of arbitrary (not necessarily power-of-two)
// capacity, stepping +1 and wrapping.
//
// The sequence is exhausted after visiting every slot exactly once; callers use
// exhaustion to detect a full wrap back to the start index.
pub(crate) struct Probe {
    // The current index in the probe sequence.
    pub i: usize,
    // The number of slots visited so far.
    len: usize,
    // Capacity of the table being probed.
    capacity: usize,
}

impl Probe {
    // Initialize the probe sequence at the key's natural index.
    #[inline]
    pub fn start(hash: u64, capacity: usize) -> Probe {
        Probe {
            i: (hash % capacity as u64) as usize,
            len: 0,
            capacity,
        }
    }

    // Advance to the next slot, wrapping at the end of the table.
    #[inline]
    pub fn next(&mut self) {
        self.len += 1;
        self.i += 1;

        if self.i == self.capacity {
            self.i = 0;
        }
    }

    // Whether the sequence has wrapped all the way back to the start index.
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.len == self.capacity
    }
}
