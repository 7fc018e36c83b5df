use rand::Rng;

/// URL-safe alphabet: every character is valid in a path segment without
/// percent-encoding.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Shortest and longest id length accepted from configuration.
pub const MIN_LENGTH: usize = 7;
pub const MAX_LENGTH: usize = 14;

pub const DEFAULT_LENGTH: usize = 9;

/// Produces candidate short ids.
///
/// Implementations are pure: they never look at the store, so a candidate may
/// already be taken. `LinkStore` is responsible for detecting that and asking
/// again.
pub trait IdGenerator: Send + Sync + 'static {
    fn generate(&self) -> String;
}

/// Random ids of a fixed length drawn from [`ALPHABET`].
///
/// With the default length of 9 there are 64^9 (about 1.8e16) possible ids.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    length: usize,
}

impl RandomIdGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_LENGTH, MAX_LENGTH),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
