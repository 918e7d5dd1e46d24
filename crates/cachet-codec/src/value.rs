use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ValueError;

/// Encodes a structured value to canonical CBOR bytes.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ValueError> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(value, &mut bytes)
        .map_err(|e| ValueError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Decodes a structured value from CBOR bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ValueError> {
    ciborium::de::from_reader(bytes).map_err(|e| ValueError::Decode(e.to_string()))
}
