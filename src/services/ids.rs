//! Book id generation.

use rand::Rng;

/// Length of generated book ids.
pub const ID_LENGTH: usize = 16;

/// Url-safe alphabet, 64 symbols.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Source of opaque book identifiers, injected into the catalog service so
/// tests can pin ids.
pub trait IdProvider: Send + Sync {
    fn generate(&self) -> String;
}

/// Default provider: fixed-length random strings over a url-safe alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NanoId;

impl IdProvider for NanoId {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..ID_LENGTH)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
