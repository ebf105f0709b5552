//! Cryptographic primitives: signing key pairs and secure randomness.
//!
//! The locker only needs an asymmetric key pair with distinct private and
//! public hex encodings (attached to each decentralized identity) and an
//! unpredictable token source for DID generation. No signature scheme is
//! applied to credentials themselves; tamper evidence comes from content
//! addressing and anchoring.

pub mod keys;
pub mod random;

pub use keys::Ed25519KeyPair;
