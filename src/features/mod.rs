//! Feature extraction modules
//!
//! The per-tick detection pipeline stages:
//! - Spectral peak extraction (sub-bin refinement)
//! - Harmonic overtone rejection
//! - Temporal smoothing
//! - Note mapping
//! - Chord identification

pub mod chords;
pub mod harmonics;
pub mod notes;
pub mod peaks;
pub mod smoothing;
