use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use cachet_crypto::cipher::{Cipher, CipherError};
use cachet_crypto::signing::SeedError;

use crate::encrypter::{Encrypter, EncrypterError};
use crate::signer::Signer;

/// Prefix marking a secret stored in base64-encoded form.
const BASE64_PREFIX: &str = "base64:";

/// Errors raised while turning configuration into envelope instances.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no secret key is configured")]
    MissingKey,
    #[error("the configured secret key is not valid base64")]
    InvalidKey,
    #[error(transparent)]
    Cipher(#[from] CipherError),
    #[error(transparent)]
    Encrypter(#[from] EncrypterError),
    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// Application-supplied envelope configuration.
///
/// The `key` field carries either raw secret text or a `base64:`-prefixed
/// encoded secret; `cipher` names one of the supported AEAD ciphers.
#[derive(Debug, Clone, Deserialize)]
pub struct CryptoConfig {
    pub key: String,
    #[serde(default = "default_cipher")]
    pub cipher: String,
}

fn default_cipher() -> String {
    Cipher::XChaCha20Poly1305.name().to_string()
}

/// Resolves configured secret text into raw bytes.
///
/// A `base64:` prefix means the remainder is base64-decoded; anything else
/// is taken as raw UTF-8 bytes. Empty input is rejected before either path.
pub fn parse_secret(raw: &str) -> Result<Vec<u8>, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::MissingKey);
    }
    if let Some(encoded) = raw.strip_prefix(BASE64_PREFIX) {
        return STANDARD.decode(encoded).map_err(|_| ConfigError::InvalidKey);
    }
    Ok(raw.as_bytes().to_vec())
}

impl CryptoConfig {
    /// Builds an encryption envelope from this configuration.
    pub fn encrypter(&self) -> Result<Encrypter, ConfigError> {
        let key = parse_secret(&self.key)?;
        let cipher = Cipher::from_name(&self.cipher)?;
        debug!(cipher = %cipher, "constructing encrypter from config");
        Ok(Encrypter::new(key, cipher)?)
    }

    /// Builds a signing envelope, treating the configured secret as a seed.
    pub fn signer(&self) -> Result<Signer, ConfigError> {
        let seed = parse_secret(&self.key)?;
        debug!("constructing signer from config");
        Ok(Signer::from_seed(&seed)?)
    }
}
