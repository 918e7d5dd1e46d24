//! Process-wide envelope instances behind explicit installation.
//!
//! Call sites that cannot thread an [`Encrypter`]/[`Signer`] through their
//! arguments may use one shared pair, installed once at startup and removed
//! explicitly at teardown. Nothing here constructs envelopes implicitly.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::encrypter::{DecryptError, EncryptError, Encrypter};
use crate::signer::{Signer, VerifyError};

#[derive(Default)]
struct Registry {
    encrypter: Option<Arc<Encrypter>>,
    signer: Option<Arc<Signer>>,
}

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::default()));

/// Errors raised by the forwarding functions.
#[derive(Debug, Error)]
pub enum SharedError {
    /// [`install`] has not been called (or [`uninstall`] already ran).
    #[error("no shared envelope services are installed")]
    NotInstalled,
    #[error(transparent)]
    Encrypt(#[from] EncryptError),
    #[error(transparent)]
    Decrypt(#[from] DecryptError),
    #[error(transparent)]
    Verify(#[from] VerifyError),
}

/// Installs the shared envelope pair, replacing any previous pair.
pub fn install(encrypter: Encrypter, signer: Signer) {
    let mut registry = REGISTRY.write();
    registry.encrypter = Some(Arc::new(encrypter));
    registry.signer = Some(Arc::new(signer));
    debug!("shared envelope services installed");
}

/// Removes the shared envelope pair.
pub fn uninstall() {
    let mut registry = REGISTRY.write();
    registry.encrypter = None;
    registry.signer = None;
    debug!("shared envelope services removed");
}

/// The installed shared encrypter, if any.
pub fn encrypter() -> Option<Arc<Encrypter>> {
    REGISTRY.read().encrypter.clone()
}

/// The installed shared signer, if any.
pub fn signer() -> Option<Arc<Signer>> {
    REGISTRY.read().signer.clone()
}

/// Encrypts a string with the installed encrypter.
pub fn encrypt_string(value: &str) -> Result<String, SharedError> {
    let encrypter = encrypter().ok_or(SharedError::NotInstalled)?;
    Ok(encrypter.encrypt_string(value)?)
}

/// Decrypts a payload with the installed encrypter.
pub fn decrypt_string(payload: &str) -> Result<String, SharedError> {
    let encrypter = encrypter().ok_or(SharedError::NotInstalled)?;
    Ok(encrypter.decrypt_string(payload)?)
}

/// Signs a string with the installed signer.
pub fn sign_string(value: &str) -> Result<String, SharedError> {
    let signer = signer().ok_or(SharedError::NotInstalled)?;
    Ok(signer.sign_string(value))
}

/// Verifies a combined signed message with the installed signer.
pub fn verify_string(signed: &str) -> Result<String, SharedError> {
    let signer = signer().ok_or(SharedError::NotInstalled)?;
    Ok(signer.verify_string(signed)?)
}

/// Signs a string in detached mode with the installed signer.
pub fn sign_string_detached(value: &str) -> Result<String, SharedError> {
    let signer = signer().ok_or(SharedError::NotInstalled)?;
    Ok(signer.sign_detached_string(value))
}

/// Verifies a detached string signature with the installed signer.
pub fn verify_string_detached(signature: &str, value: &str) -> Result<bool, SharedError> {
    let signer = signer().ok_or(SharedError::NotInstalled)?;
    Ok(signer.verify_detached_string(signature, value))
}
