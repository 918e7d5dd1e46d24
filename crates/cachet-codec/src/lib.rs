//! Cachet wire codec primitives.
//!
//! Defines the base64/JSON payload frame used to transport binary
//! cryptographic output as text, and canonical value encode/decode helpers.

pub mod error;
pub mod frame;
pub mod value;

pub use error::{FrameError, ValueError};
pub use frame::DecodedFrame;
