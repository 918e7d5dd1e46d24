//! Cryptographic helpers used by Cachet.
//!
//! Includes the supported-cipher table, AEAD transforms, and Ed25519
//! keypair operations.

pub mod aead;
pub mod cipher;
pub mod signing;

pub use cipher::Cipher;
pub use signing::SigningKeyPair;
