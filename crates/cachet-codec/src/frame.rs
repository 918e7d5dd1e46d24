use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// Inner JSON document of an encrypted payload.
///
/// Both fields are mandatory and string-typed; unknown extra fields are
/// tolerated and field order carries no meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EncryptedPayload {
    nonce: String,
    encrypted: String,
}

/// Nonce and ciphertext recovered from an encoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

/// Frames nonce and ciphertext as transportable text.
///
/// Layout: `base64( JSON{ "nonce": base64, "encrypted": base64 } )`. The
/// JSON pass does not escape forward slashes, so inner base64 survives
/// byte-for-byte.
pub fn encode(nonce: &[u8], ciphertext: &[u8]) -> Result<String, FrameError> {
    let payload = EncryptedPayload {
        nonce: STANDARD.encode(nonce),
        encrypted: STANDARD.encode(ciphertext),
    };
    let json = serde_json::to_string(&payload).map_err(|_| FrameError::Encode)?;
    Ok(STANDARD.encode(json))
}

/// Unframes an encoded payload back into nonce and ciphertext bytes.
///
/// All structural validation happens here, before the caller touches any
/// cryptographic primitive: a missing or non-string field, malformed JSON,
/// or undecodable base64 is one uniform `InvalidPayload`.
pub fn decode(text: &str) -> Result<DecodedFrame, FrameError> {
    let json = STANDARD
        .decode(text)
        .map_err(|_| FrameError::InvalidPayload)?;
    let payload: EncryptedPayload =
        serde_json::from_slice(&json).map_err(|_| FrameError::InvalidPayload)?;
    let nonce = STANDARD
        .decode(payload.nonce)
        .map_err(|_| FrameError::InvalidPayload)?;
    let ciphertext = STANDARD
        .decode(payload.encrypted)
        .map_err(|_| FrameError::InvalidPayload)?;
    Ok(DecodedFrame { nonce, ciphertext })
}
