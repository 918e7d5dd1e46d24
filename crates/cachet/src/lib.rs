//! Authenticated envelope services for application data.
//!
//! Two independent services share one pattern (serialize, transform, frame,
//! encode) and one error-reporting discipline: [`Encrypter`] seals values
//! with a pluggable AEAD cipher into portable text payloads, and [`Signer`]
//! signs values with Ed25519 in combined or detached mode.

pub mod config;
pub mod encrypter;
pub mod shared;
pub mod signer;

pub use cachet_crypto::cipher::{Cipher, CipherError};
pub use cachet_crypto::signing::{SeedError, SigningKeyPair};
pub use config::{ConfigError, CryptoConfig};
pub use encrypter::{DecryptError, EncryptError, Encrypter, EncrypterError};
pub use signer::{SignError, Signer, VerifyError};
