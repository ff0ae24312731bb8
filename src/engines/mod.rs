//! Voice cloning engines.
//!
//! This module contains implementations of [`crate::SynthesisEngine`].
//!
//! # Available Engines
//!
//! Enable engines via Cargo features:
//! - `indextts` - IndexTTS2 (Python worker process, on by default)

#[cfg(feature = "indextts")]
pub mod indextts;
