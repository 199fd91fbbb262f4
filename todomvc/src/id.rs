//! Random identifiers for new todos.

use rand::Rng;
use todomvc_core::environment::IdGenerator;

/// URL-safe alphabet (`A-Za-z0-9_-`), 64 symbols.
pub const URL_ALPHABET: &[u8; 64] =
    b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Default identifier length.
pub const DEFAULT_ID_SIZE: usize = 21;

/// Nano ID style generator: fixed-length strings drawn uniformly from
/// [`URL_ALPHABET`].
///
/// Uses the thread-local PRNG, so identifiers are collision resistant but not
/// suitable as secrets.
#[derive(Debug, Clone, Copy)]
pub struct NanoIdGenerator {
    size: usize,
}

impl NanoIdGenerator {
    /// Generator producing [`DEFAULT_ID_SIZE`]-character identifiers
    #[must_use]
    pub const fn new() -> Self {
        Self {
            size: DEFAULT_ID_SIZE,
        }
    }

    /// Generator producing identifiers of `size` characters
    #[must_use]
    pub const fn with_size(size: usize) -> Self {
        Self { size }
    }
}

impl Default for NanoIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for NanoIdGenerator {
    fn next_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.size)
            .map(|_| char::from(URL_ALPHABET[rng.gen_range(0..URL_ALPHABET.len())]))
            .collect()
    }
}
