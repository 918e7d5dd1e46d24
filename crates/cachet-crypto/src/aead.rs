use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce as GcmNonce};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use thiserror::Error;

use crate::cipher::Cipher;

/// Errors returned by AEAD transforms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AeadError {
    #[error("invalid key length")]
    InvalidKeyLength,
    #[error("invalid nonce length")]
    InvalidNonceLength,
    #[error("encryption failed")]
    EncryptFailed,
    #[error("decryption failed")]
    DecryptFailed,
}

fn check_lengths(cipher: Cipher, key: &[u8], nonce: &[u8]) -> Result<(), AeadError> {
    if key.len() != cipher.key_len() {
        return Err(AeadError::InvalidKeyLength);
    }
    if nonce.len() != cipher.nonce_len() {
        return Err(AeadError::InvalidNonceLength);
    }
    Ok(())
}

/// Encrypts `plaintext` under `key`/`nonce`, binding `aad`.
///
/// Returns ciphertext with the authentication tag appended.
pub fn seal(
    cipher: Cipher,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, AeadError> {
    check_lengths(cipher, key, nonce)?;
    let payload = Payload {
        msg: plaintext,
        aad,
    };
    match cipher {
        Cipher::Aes256Gcm => {
            let aead = Aes256Gcm::new_from_slice(key).map_err(|_| AeadError::InvalidKeyLength)?;
            aead.encrypt(GcmNonce::from_slice(nonce), payload)
                .map_err(|_| AeadError::EncryptFailed)
        }
        Cipher::XChaCha20Poly1305 => {
            let aead = XChaCha20Poly1305::new(Key::from_slice(key));
            aead.encrypt(XNonce::from_slice(nonce), payload)
                .map_err(|_| AeadError::EncryptFailed)
        }
    }
}

/// Decrypts and authenticates `ciphertext` under `key`/`nonce`/`aad`.
///
/// Tag mismatch, truncation, and wrong-key failures all surface as the
/// same [`AeadError::DecryptFailed`].
pub fn open(
    cipher: Cipher,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, AeadError> {
    check_lengths(cipher, key, nonce)?;
    let payload = Payload {
        msg: ciphertext,
        aad,
    };
    match cipher {
        Cipher::Aes256Gcm => {
            let aead = Aes256Gcm::new_from_slice(key).map_err(|_| AeadError::InvalidKeyLength)?;
            aead.decrypt(GcmNonce::from_slice(nonce), payload)
                .map_err(|_| AeadError::DecryptFailed)
        }
        Cipher::XChaCha20Poly1305 => {
            let aead = XChaCha20Poly1305::new(Key::from_slice(key));
            aead.decrypt(XNonce::from_slice(nonce), payload)
                .map_err(|_| AeadError::DecryptFailed)
        }
    }
}
