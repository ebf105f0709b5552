//! Secure random number generation.
//!
//! Uses the operating system's cryptographic random source via `rand`.

use rand::RngCore;

/// Fill a buffer with cryptographically secure random bytes.
pub fn fill_random(buf: &mut [u8]) {
    rand::thread_rng().fill_bytes(buf);
}

/// Generate a fixed-size array of cryptographically secure random bytes.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    fill_random(&mut buf);
    buf
}

/// Generate a random hex token with `N` bytes of entropy (2N hex chars).
pub fn random_token<const N: usize>() -> String {
    hex::encode(random_bytes::<N>())
}
