use ed25519_dalek::{
    Signature as DalekSignature, Signer as DalekSignerTrait, SigningKey,
    Verifier as DalekVerifierTrait,
};
use rand::rngs::OsRng;
use thiserror::Error;

/// Length in bytes of a keypair derivation seed.
pub const SEED_LEN: usize = 32;
/// Length in bytes of a detached signature.
pub const SIGNATURE_LEN: usize = 64;
/// Length in bytes of a public key.
pub const PUBLIC_KEY_LEN: usize = 32;
/// Length in bytes of a secret key.
pub const SECRET_KEY_LEN: usize = 32;

/// Errors returned by seeded keypair derivation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    /// Seeds must carry real entropy; an empty buffer is rejected outright.
    #[error("seed cannot be empty")]
    Empty,
    /// Seed length did not match the derivation requirement.
    #[error("unsupported seed length: expected 32 bytes, got {0}")]
    Length(usize),
}

/// Errors returned when opening a combined signed message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("the signature is invalid")]
    Invalid,
}

/// An Ed25519 keypair held for the lifetime of one signing envelope.
///
/// Derivation from a seed is deterministic: the same seed always yields a
/// byte-identical keypair.
#[derive(Debug, Clone)]
pub struct SigningKeyPair {
    signing_key: SigningKey,
}

impl SigningKeyPair {
    /// Generates a keypair from fresh randomness.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Derives a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self, SeedError> {
        if seed.is_empty() {
            return Err(SeedError::Empty);
        }
        let seed: [u8; SEED_LEN] = seed.try_into().map_err(|_| SeedError::Length(seed.len()))?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// Derives from `seed` when present, otherwise generates randomly.
    pub fn derive(seed: Option<&[u8]>) -> Result<Self, SeedError> {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Ok(Self::generate()),
        }
    }

    /// Raw 32-byte public key.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Raw 32-byte secret key.
    pub fn secret_key(&self) -> [u8; SECRET_KEY_LEN] {
        self.signing_key.to_bytes()
    }

    /// Signs `msg` and returns the combined form `signature ‖ message`.
    pub fn sign_combined(&self, msg: &[u8]) -> Vec<u8> {
        let signature = self.signing_key.sign(msg);
        let mut combined = Vec::with_capacity(SIGNATURE_LEN + msg.len());
        combined.extend_from_slice(&signature.to_bytes());
        combined.extend_from_slice(msg);
        combined
    }

    /// Verifies a combined signed message and returns the embedded message.
    ///
    /// Never returns any part of the message unless the signature checks out.
    pub fn open_combined(&self, signed: &[u8]) -> Result<Vec<u8>, SignatureError> {
        if signed.len() < SIGNATURE_LEN {
            return Err(SignatureError::Invalid);
        }
        let (sig_bytes, msg) = signed.split_at(SIGNATURE_LEN);
        let signature =
            DalekSignature::from_slice(sig_bytes).map_err(|_| SignatureError::Invalid)?;
        self.signing_key
            .verifying_key()
            .verify(msg, &signature)
            .map_err(|_| SignatureError::Invalid)?;
        Ok(msg.to_vec())
    }

    /// Signs `msg` and returns the detached 64-byte signature.
    pub fn sign_detached(&self, msg: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.signing_key.sign(msg).to_bytes()
    }

    /// Verifies a detached signature against `msg`.
    pub fn verify_detached(&self, msg: &[u8], signature: &[u8; SIGNATURE_LEN]) -> bool {
        let signature = DalekSignature::from_bytes(signature);
        self.signing_key
            .verifying_key()
            .verify(msg, &signature)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{SeedError, SignatureError, SigningKeyPair, SEED_LEN, SIGNATURE_LEN};

    #[test]
    fn same_seed_yields_identical_keypairs() {
        let seed = [0x42_u8; SEED_LEN];
        let a = SigningKeyPair::from_seed(&seed).expect("seed should derive");
        let b = SigningKeyPair::from_seed(&seed).expect("seed should derive");

        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.secret_key(), b.secret_key());
    }

    #[test]
    fn fresh_keypairs_differ() {
        let a = SigningKeyPair::generate();
        let b = SigningKeyPair::generate();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn rejects_empty_and_wrong_length_seeds() {
        assert_eq!(
            SigningKeyPair::from_seed(&[]).expect_err("empty seed should fail"),
            SeedError::Empty
        );
        assert_eq!(
            SigningKeyPair::from_seed(&[0_u8; SEED_LEN - 1]).expect_err("short seed should fail"),
            SeedError::Length(SEED_LEN - 1)
        );
        assert_eq!(
            SigningKeyPair::from_seed(&[0_u8; SEED_LEN + 1]).expect_err("long seed should fail"),
            SeedError::Length(SEED_LEN + 1)
        );
    }

    #[test]
    fn derive_without_seed_generates_randomly() {
        let a = SigningKeyPair::derive(None).expect("derive should succeed");
        let b = SigningKeyPair::derive(None).expect("derive should succeed");
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn combined_round_trip_returns_the_message() {
        let keypair = SigningKeyPair::generate();
        let signed = keypair.sign_combined(b"signed payload");
        assert_eq!(signed.len(), SIGNATURE_LEN + b"signed payload".len());

        let opened = keypair.open_combined(&signed).expect("open should succeed");
        assert_eq!(opened, b"signed payload");
    }

    #[test]
    fn open_combined_rejects_tampering_and_truncation() {
        let keypair = SigningKeyPair::generate();
        let signed = keypair.sign_combined(b"payload");

        let mut tampered = signed.clone();
        tampered[SIGNATURE_LEN] ^= 0x01;
        assert_eq!(
            keypair
                .open_combined(&tampered)
                .expect_err("tampered message should fail"),
            SignatureError::Invalid
        );

        assert_eq!(
            keypair
                .open_combined(&signed[..SIGNATURE_LEN - 1])
                .expect_err("truncated input should fail"),
            SignatureError::Invalid
        );
    }

    #[test]
    fn detached_round_trip_and_tamper() {
        let keypair = SigningKeyPair::generate();
        let mut signature = keypair.sign_detached(b"detached payload");
        assert!(keypair.verify_detached(b"detached payload", &signature));
        assert!(!keypair.verify_detached(b"other payload", &signature));

        signature[0] ^= 0x01;
        assert!(!keypair.verify_detached(b"detached payload", &signature));
    }
}
