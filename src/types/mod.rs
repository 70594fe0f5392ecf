//! Type definitions for the Hasab API.
//!
//! Request options per capability, file inputs for multipart uploads, and the
//! pass-through response value.

pub mod chat;
pub mod file;
pub mod response;
pub mod transcription;
pub mod translation;
pub mod tts;
