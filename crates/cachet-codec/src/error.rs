use thiserror::Error;

/// Errors returned by payload frame operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The frame could not be serialized for transport.
    #[error("could not encode the payload")]
    Encode,
    /// Outer base64, JSON structure, or field validation failed.
    #[error("the payload is invalid")]
    InvalidPayload,
}

/// Errors returned by structured value encode/decode.
#[derive(Debug, Error)]
pub enum ValueError {
    /// Value serialization failure.
    #[error("value encode error: {0}")]
    Encode(String),
    /// Value deserialization failure.
    #[error("value decode error: {0}")]
    Decode(String),
}
