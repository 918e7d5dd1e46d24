use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use cachet_codec::value;
use cachet_crypto::signing::{
    SeedError, SigningKeyPair, PUBLIC_KEY_LEN, SECRET_KEY_LEN, SIGNATURE_LEN,
};

/// Errors raised by sign operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignError {
    #[error("the value to sign could not be encoded")]
    Encode,
}

/// Errors raised by combined-mode verify operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("the signature is invalid")]
    InvalidSignature,
    #[error("could not decode the verified data")]
    Decode,
}

/// Public-key signing envelope.
///
/// Holds one Ed25519 keypair for its lifetime, derived either from fresh
/// randomness or deterministically from a 32-byte seed. Combined mode
/// produces `base64(signature ‖ message)`; detached mode produces
/// `base64(signature)` alone.
#[derive(Debug, Clone)]
pub struct Signer {
    keypair: SigningKeyPair,
}

impl Signer {
    /// Creates an envelope with a freshly generated keypair.
    pub fn generate() -> Self {
        Self {
            keypair: SigningKeyPair::generate(),
        }
    }

    /// Creates an envelope with a keypair derived from `seed`.
    ///
    /// The same seed always yields the same keypair, enabling reproducible
    /// identities.
    pub fn from_seed(seed: &[u8]) -> Result<Self, SeedError> {
        Ok(Self {
            keypair: SigningKeyPair::from_seed(seed)?,
        })
    }

    /// Creates an envelope around an already-derived keypair.
    pub fn from_keypair(keypair: SigningKeyPair) -> Self {
        Self { keypair }
    }

    /// Signs a structured value in combined mode.
    pub fn sign<T: Serialize>(&self, value: &T) -> Result<String, SignError> {
        let bytes = value::encode(value).map_err(|_| SignError::Encode)?;
        Ok(self.sign_bytes(&bytes))
    }

    /// Signs raw bytes in combined mode.
    pub fn sign_bytes(&self, value: &[u8]) -> String {
        STANDARD.encode(self.keypair.sign_combined(value))
    }

    /// Signs a string in combined mode without value serialization.
    pub fn sign_string(&self, value: &str) -> String {
        self.sign_bytes(value.as_bytes())
    }

    /// Verifies a combined signed message and reconstructs the value.
    pub fn verify<T: DeserializeOwned>(&self, signed: &str) -> Result<T, VerifyError> {
        let message = self.verify_bytes(signed)?;
        value::decode(&message).map_err(|_| VerifyError::Decode)
    }

    /// Verifies a combined signed message and returns the raw message bytes.
    ///
    /// No part of the message is returned unless the signature checks out.
    pub fn verify_bytes(&self, signed: &str) -> Result<Vec<u8>, VerifyError> {
        let combined = STANDARD
            .decode(signed)
            .map_err(|_| VerifyError::InvalidSignature)?;
        self.keypair
            .open_combined(&combined)
            .map_err(|_| VerifyError::InvalidSignature)
    }

    /// Verifies a combined signed message and returns the embedded string.
    pub fn verify_string(&self, signed: &str) -> Result<String, VerifyError> {
        let message = self.verify_bytes(signed)?;
        String::from_utf8(message).map_err(|_| VerifyError::InvalidSignature)
    }

    /// Signs a structured value, returning a detached signature.
    pub fn sign_detached<T: Serialize>(&self, value: &T) -> Result<String, SignError> {
        let bytes = value::encode(value).map_err(|_| SignError::Encode)?;
        Ok(self.sign_detached_bytes(&bytes))
    }

    /// Signs raw bytes, returning a detached signature.
    pub fn sign_detached_bytes(&self, value: &[u8]) -> String {
        STANDARD.encode(self.keypair.sign_detached(value))
    }

    /// Signs a string, returning a detached signature.
    pub fn sign_detached_string(&self, value: &str) -> String {
        self.sign_detached_bytes(value.as_bytes())
    }

    /// Verifies a detached signature over a structured value.
    ///
    /// Unlike [`Signer::sign_detached`], a value that fails to encode
    /// degrades to `false` here rather than raising; callers using this as
    /// an authorization check get a plain boolean on every path.
    pub fn verify_detached<T: Serialize>(&self, signature: &str, value: &T) -> bool {
        match value::encode(value) {
            Ok(bytes) => self.verify_detached_bytes(signature, &bytes),
            Err(_) => false,
        }
    }

    /// Verifies a detached signature over raw bytes.
    ///
    /// A decoded signature that is empty or not exactly 64 bytes long is
    /// structurally invalid and short-circuits to `false` before the
    /// verifier runs.
    pub fn verify_detached_bytes(&self, signature: &str, value: &[u8]) -> bool {
        let decoded = match STANDARD.decode(signature) {
            Ok(decoded) => decoded,
            Err(_) => return false,
        };
        let signature: [u8; SIGNATURE_LEN] = match decoded.try_into() {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        self.keypair.verify_detached(value, &signature)
    }

    /// Verifies a detached signature over a string.
    pub fn verify_detached_string(&self, signature: &str, value: &str) -> bool {
        self.verify_detached_bytes(signature, value.as_bytes())
    }

    /// Raw public key of the held keypair.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.keypair.public_key()
    }

    /// Raw secret key of the held keypair.
    pub fn secret_key(&self) -> [u8; SECRET_KEY_LEN] {
        self.keypair.secret_key()
    }
}
