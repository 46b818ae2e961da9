#![allow(dead_code)]

use quince::HashMap;

// Run the test against maps with several initial capacities, so growth is exercised from
// different starting points.
pub fn with_map<K, V>(mut test: impl FnMut(&dyn Fn() -> HashMap<K, V>)) {
    // Minimal table: everything after the first insert is collisions and growth.
    test(&(|| HashMap::with_capacity(1)));

    // Small table that grows a handful of times under typical test loads.
    test(&(|| HashMap::with_capacity(4)));

    // The default capacity.
    test(&HashMap::new);
}

// Returns the number of threads to use for stress testing.
pub fn threads() -> usize {
    if cfg!(miri) {
        2
    } else {
        num_cpus::get_physical().next_power_of_two()
    }
}
