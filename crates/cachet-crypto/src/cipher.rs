use std::fmt;

use aes_gcm::aead::KeyInit;
use aes_gcm::Aes256Gcm;
use chacha20poly1305::XChaCha20Poly1305;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Errors returned by cipher-table lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// Identifier does not name a supported cipher.
    #[error("unsupported cipher {0:?}; supported ciphers are: aes-256-gcm, xchacha20-poly1305")]
    Unsupported(String),
}

/// The closed set of supported AEAD ciphers.
///
/// Identifier parsing happens once, at construction or configuration time;
/// everything downstream dispatches on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cipher {
    /// AES-256-GCM: 32-byte key, 12-byte nonce.
    Aes256Gcm,
    /// XChaCha20-Poly1305: 32-byte key, 24-byte extended nonce.
    XChaCha20Poly1305,
}

impl Cipher {
    /// Every supported cipher, in identifier order.
    pub const ALL: [Self; 2] = [Self::Aes256Gcm, Self::XChaCha20Poly1305];

    /// Resolves a case-insensitive cipher identifier.
    pub fn from_name(name: &str) -> Result<Self, CipherError> {
        match name.to_ascii_lowercase().as_str() {
            "aes-256-gcm" => Ok(Self::Aes256Gcm),
            "xchacha20-poly1305" => Ok(Self::XChaCha20Poly1305),
            _ => Err(CipherError::Unsupported(name.to_string())),
        }
    }

    /// Canonical identifier for this cipher.
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes-256-gcm",
            Self::XChaCha20Poly1305 => "xchacha20-poly1305",
        }
    }

    /// Required key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes256Gcm | Self::XChaCha20Poly1305 => 32,
        }
    }

    /// Required nonce length in bytes.
    pub fn nonce_len(self) -> usize {
        match self {
            Self::Aes256Gcm => 12,
            Self::XChaCha20Poly1305 => 24,
        }
    }

    /// True iff `key` has exactly the length this cipher requires.
    pub fn is_supported(self, key: &[u8]) -> bool {
        key.len() == self.key_len()
    }

    /// Generates a fresh key using the primitive's own keygen.
    pub fn generate_key(self) -> Vec<u8> {
        match self {
            Self::Aes256Gcm => Aes256Gcm::generate_key(&mut OsRng).to_vec(),
            Self::XChaCha20Poly1305 => XChaCha20Poly1305::generate_key(&mut OsRng).to_vec(),
        }
    }

    /// Generates a fresh random nonce sized for this cipher.
    ///
    /// Nonces must never be reused under the same key; callers source every
    /// nonce from here rather than accepting one as input.
    pub fn generate_nonce(self) -> Vec<u8> {
        let mut nonce = vec![0_u8; self.nonce_len()];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
