//! Deterministic hashing.
//!
//! The standard library's `HashMap` is randomly seeded, which would make anything
//! derived from a hash differ between runs. Everything in this crate that hashes goes
//! through `FxHasher` instead.

use std::hash::Hasher;

use rustc_hash::FxHasher;

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Hashes a string to a `u64`. Stable across runs and platforms of the same
/// pointer width.
pub fn hash_str(data: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_bytes());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_str_is_stable() {
        assert_eq!(hash_str("RecoveryRng"), hash_str("RecoveryRng"));
        assert_ne!(hash_str("RecoveryRng"), hash_str("TransmissionRng"));
    }
}
