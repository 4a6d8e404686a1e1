//! # Noteflow DSP
//!
//! A real-time note and chord detection engine for live performer feedback,
//! turning frequency-domain magnitude snapshots into a temporally stable set
//! of musically meaningful notes.
//!
//! ## Features
//!
//! - **Peak Extraction**: Local-maximum search with sub-bin parabolic refinement
//! - **Harmonic Filtering**: Overtone rejection isolating true fundamentals
//! - **Temporal Smoothing**: Cross-frame grouping with confidence scoring
//! - **Confirmation/Debounce**: Sustained-presence gating with silence timeout
//! - **Chord Identification**: Interval-signature matching with rate limiting
//!
//! ## Quick Start
//!
//! ```
//! use noteflow_dsp::{DetectionConfig, DetectionEngine, MagnitudeFrame};
//!
//! let mut engine = DetectionEngine::new(DetectionConfig::default())?;
//!
//! // One byte-magnitude snapshot per tick, from your capture layer
//! let magnitudes = vec![0u8; 2048];
//! let result = engine.process_frame(&MagnitudeFrame::new(&magnitudes, 0.0));
//!
//! for note in &result.notes {
//!     println!("{} at {:.1} Hz ({:+} cents)", note.name, note.frequency, note.cents);
//! }
//! # Ok::<(), noteflow_dsp::DetectionError>(())
//! ```
//!
//! ## Architecture
//!
//! One synchronous pass per incoming frame:
//!
//! ```text
//! MagnitudeFrame → Peak Extractor → Harmonic Filter → Temporal Smoother
//!     → Note Mapper → Debounce Engine → {Chord Identifier, History} → TickResult
//! ```
//!
//! The engine owns every piece of mutable state and never blocks, spawns
//! threads, or reschedules itself; the caller's tick cadence (nominally a
//! display-refresh signal) is the backpressure mechanism.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod frame;
pub mod tracking;

// Re-export main types
pub use analysis::engine::DetectionEngine;
pub use analysis::result::{ChordEvent, HistoryEntry, NoteRecord, ReportedNote, TickResult};
pub use config::{DetectionConfig, Preset};
pub use error::DetectionError;
pub use frame::MagnitudeFrame;
