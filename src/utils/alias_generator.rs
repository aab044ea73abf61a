//! Random alias generation.
//!
//! Generators only propose candidates; uniqueness is enforced by
//! [`crate::application::services::LinkService`] against the store.

use rand::Rng;

/// Symbols an alias is drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Default length of generated aliases.
pub const DEFAULT_ALIAS_LENGTH: usize = 8;

/// Source of candidate aliases.
///
/// Injected into the link service so tests can supply deterministic
/// sequences instead of relying on global randomness.
#[cfg_attr(test, mockall::automock)]
pub trait AliasGenerator: Send + Sync {
    /// Returns a candidate alias of exactly `length` symbols.
    ///
    /// The result is not guaranteed to be unique.
    fn generate(&self, length: usize) -> String;
}

/// Generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAliasGenerator;

impl RandomAliasGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl AliasGenerator for RandomAliasGenerator {
    fn generate(&self, length: usize) -> String {
        debug_assert!(length > 0, "alias length must be positive");

        let mut rng = rand::rng();

        (0..length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
