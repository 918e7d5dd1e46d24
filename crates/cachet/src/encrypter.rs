use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use cachet_codec::{frame, value};
use cachet_crypto::aead;
use cachet_crypto::cipher::Cipher;

/// Errors raised while constructing an [`Encrypter`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncrypterError {
    /// Key length does not match the chosen cipher.
    #[error("incorrect key length ({key_len} bytes) for cipher {cipher}; supported ciphers are: aes-256-gcm, xchacha20-poly1305")]
    InvalidKeyOrCipher { cipher: Cipher, key_len: usize },
}

/// Errors raised by encrypt operations.
///
/// Messages are deliberately generic: nothing about the key, nonce, or
/// plaintext leaks through an error path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncryptError {
    #[error("the value to encrypt could not be encoded")]
    Encode,
    #[error("could not encrypt the data")]
    Encrypt,
}

/// Errors raised by decrypt operations.
///
/// Structural payload problems are reported as [`DecryptError::InvalidPayload`]
/// before any cryptographic work happens; authentication and decryption
/// failures collapse into one generic [`DecryptError::Decrypt`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecryptError {
    #[error("the payload is invalid")]
    InvalidPayload,
    #[error("could not decrypt the data")]
    Decrypt,
    #[error("could not decode the decrypted data")]
    Decode,
}

/// Authenticated symmetric encryption envelope.
///
/// Holds one immutable `(key, cipher)` pair for its lifetime and produces
/// payloads of the form `base64( JSON{ "nonce": base64, "encrypted":
/// base64 } )`. Every encrypt call draws a fresh random nonce; nonces are
/// never accepted from callers.
///
/// All methods take `&self` and hold no interior mutability, so one
/// instance may be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Encrypter {
    key: Vec<u8>,
    cipher: Cipher,
}

impl Encrypter {
    /// Creates an envelope after validating the key against the cipher.
    pub fn new(key: impl Into<Vec<u8>>, cipher: Cipher) -> Result<Self, EncrypterError> {
        let key = key.into();
        if !cipher.is_supported(&key) {
            return Err(EncrypterError::InvalidKeyOrCipher {
                cipher,
                key_len: key.len(),
            });
        }
        Ok(Self { key, cipher })
    }

    /// Generates a fresh key for `cipher` using the primitive's own keygen.
    pub fn generate_key(cipher: Cipher) -> Vec<u8> {
        cipher.generate_key()
    }

    /// Generates a fresh random nonce sized for `cipher`.
    pub fn generate_nonce(cipher: Cipher) -> Vec<u8> {
        cipher.generate_nonce()
    }

    /// Encrypts a structured value.
    pub fn encrypt<T: Serialize>(&self, value: &T) -> Result<String, EncryptError> {
        let bytes = value::encode(value).map_err(|_| EncryptError::Encode)?;
        self.encrypt_bytes(&bytes)
    }

    /// Encrypts raw bytes.
    pub fn encrypt_bytes(&self, value: &[u8]) -> Result<String, EncryptError> {
        let nonce = self.cipher.generate_nonce();
        let ciphertext = aead::seal(self.cipher, &self.key, &nonce, b"", value)
            .map_err(|_| EncryptError::Encrypt)?;
        frame::encode(&nonce, &ciphertext).map_err(|_| EncryptError::Encrypt)
    }

    /// Encrypts a string without value serialization.
    pub fn encrypt_string(&self, value: &str) -> Result<String, EncryptError> {
        self.encrypt_bytes(value.as_bytes())
    }

    /// Decrypts a payload back into a structured value.
    pub fn decrypt<T: DeserializeOwned>(&self, payload: &str) -> Result<T, DecryptError> {
        let plaintext = self.decrypt_bytes(payload)?;
        value::decode(&plaintext).map_err(|_| DecryptError::Decode)
    }

    /// Decrypts a payload into raw bytes.
    pub fn decrypt_bytes(&self, payload: &str) -> Result<Vec<u8>, DecryptError> {
        let frame = frame::decode(payload).map_err(|_| DecryptError::InvalidPayload)?;
        aead::open(self.cipher, &self.key, &frame.nonce, b"", &frame.ciphertext)
            .map_err(|_| DecryptError::Decrypt)
    }

    /// Decrypts a payload into a string, rejecting non-text plaintext.
    pub fn decrypt_string(&self, payload: &str) -> Result<String, DecryptError> {
        let plaintext = self.decrypt_bytes(payload)?;
        String::from_utf8(plaintext).map_err(|_| DecryptError::InvalidPayload)
    }

    /// The held key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The cipher this envelope encrypts with.
    pub fn cipher(&self) -> Cipher {
        self.cipher
    }
}
