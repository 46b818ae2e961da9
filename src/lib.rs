#![doc = include_str!("../README.md")]

mod key;
mod map;
mod raw;

#[cfg(feature = "serde")]
mod serde_impls;

pub use key::ValidKey;
pub use map::HashMap;
