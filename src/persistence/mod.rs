//! Envelope persistence
//!
//! Features:
//! - Versioned JSON envelope (`{"v":1,"e":<expiry>,"d":<data>}`)
//! - XOR obfuscation with a fixed secret, rendered as base64
//! - Total decoding: anything malformed or tampered reads as `None`
//!
//! The obfuscation keeps casual readers and naive JSON parsers away from the
//! stored payload. It is not encryption.

pub mod envelope;
pub mod obfuscation;

pub use envelope::{Envelope, decode, encode, is_expired, nesting_depth};
pub use obfuscation::{obscure, reveal};
