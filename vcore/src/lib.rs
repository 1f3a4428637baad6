//! Byte level primitives shared by the VTA codec.
//!
//! Everything in the format is little endian and 4-byte aligned, strings are
//! length prefixed, null terminated and then zero padded. The helpers in here
//! enforce those rules strictly so that anything that decodes will encode back
//! to the exact same bytes.
pub mod buf;
pub mod error;
pub mod hash;
pub mod opaque;
pub mod string;

pub use error::FormatError;
