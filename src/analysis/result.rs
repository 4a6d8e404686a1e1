//! Detection result types

use serde::{Deserialize, Serialize};

/// A frequency mapped onto the equal-temperament grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Note name with octave (e.g., "A4", "C#3")
    pub name: String,

    /// Deviation from the nearest semitone in cents, always in [-50, 50]
    pub cents: i32,

    /// MIDI note number (69 = A4)
    pub midi_note: i32,

    /// The mapped frequency in Hz
    pub frequency: f32,
}

/// A confirmed note reported for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedNote {
    /// Display name; the nearest note, or the unpitched sentinel when that
    /// policy is enabled and the note is badly out of tune
    pub name: String,

    /// Smoothed frequency in Hz
    pub frequency: f32,

    /// Deviation from the nearest semitone in cents, in [-50, 50]
    pub cents: i32,

    /// MIDI note number
    pub midi_note: i32,

    /// Smoothed byte-scale amplitude (0-255)
    pub amplitude: f32,

    /// Fraction of recent frames the note was observed in (0.0-1.0)
    pub confidence: f32,
}

/// A named chord emission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordEvent {
    /// Chord name (e.g., "C Major") or a generic pitch-class listing
    pub name: String,

    /// Member note names in ascending MIDI order
    pub notes: Vec<String>,

    /// Emission timestamp in seconds
    pub timestamp: f64,
}

/// One retained entry of the confirmed-note timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Nearest note name with octave
    pub note_name: String,

    /// Smoothed frequency in Hz
    pub frequency: f32,

    /// Deviation from the nearest semitone in cents
    pub cents: i32,

    /// Smoothed byte-scale amplitude
    pub amplitude: f32,

    /// Tick timestamp in seconds
    pub timestamp_seconds: f64,
}

/// Everything one pipeline pass produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    /// Confirmed notes observed this tick, sorted by amplitude (highest first)
    pub notes: Vec<ReportedNote>,

    /// Chord emission, when one cleared the rate limit this tick
    pub chord: Option<ChordEvent>,

    /// Timestamp of the processed frame in seconds
    pub timestamp: f64,
}
