//! Chord identification
//!
//! Matches the interval signature of three or more simultaneously confirmed
//! notes against a fixed table of chord shapes. Emissions are rate-limited
//! and repeat-suppressed so a held chord reads as one event, not sixty per
//! second.

pub mod templates;

use crate::analysis::result::ChordEvent;
use crate::features::notes::{octave_of, pitch_class_name};

/// Minimum seconds between chord emissions
pub const CHORD_RATE_LIMIT_SECS: f64 = 0.5;

/// Stateful chord matcher with rate limiting and repeat suppression
#[derive(Debug, Default)]
pub struct ChordIdentifier {
    last_name: Option<String>,
    last_emitted_at: Option<f64>,
}

impl ChordIdentifier {
    /// Create an identifier with no emission history
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to identify and emit a chord from this tick's confirmed notes
    ///
    /// Notes are sorted ascending by MIDI number; the signature is
    /// `(midi - midi_lowest) mod 12` for every note above the lowest, in that
    /// order. A signature found in the shape table names the chord after the
    /// lowest note's pitch class; anything else falls back to a generic label
    /// listing the pitch classes.
    ///
    /// Returns `None` when fewer than three distinct notes sound, when the
    /// previous emission was under [`CHORD_RATE_LIMIT_SECS`] ago, or when the
    /// name matches the immediately preceding emission.
    pub fn identify(&mut self, midi_notes: &[i32], now: f64) -> Option<ChordEvent> {
        let mut sorted = midi_notes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() < 3 {
            return None;
        }

        if let Some(last) = self.last_emitted_at {
            if now - last < CHORD_RATE_LIMIT_SECS {
                return None;
            }
        }

        let root = sorted[0];
        let intervals: Vec<u8> = sorted[1..]
            .iter()
            .map(|&midi| (midi - root).rem_euclid(12) as u8)
            .collect();

        let name = match templates::quality_for(&intervals) {
            Some(quality) => format!("{} {}", pitch_class_name(root), quality),
            None => generic_label(&sorted),
        };

        if self.last_name.as_deref() == Some(name.as_str()) {
            return None;
        }

        log::debug!("Chord identified: {} at t={:.3}s", name, now);

        let notes = sorted
            .iter()
            .map(|&midi| format!("{}{}", pitch_class_name(midi), octave_of(midi)))
            .collect();

        self.last_name = Some(name.clone());
        self.last_emitted_at = Some(now);

        Some(ChordEvent {
            name,
            notes,
            timestamp: now,
        })
    }

    /// Forget the previous emission and its timestamp
    pub fn clear(&mut self) {
        self.last_name = None;
        self.last_emitted_at = None;
    }
}

/// Generic label for an unrecognized signature: distinct pitch classes in
/// ascending order from the lowest note
fn generic_label(sorted_midi: &[i32]) -> String {
    let mut names: Vec<&str> = Vec::new();
    for &midi in sorted_midi {
        let name = pitch_class_name(midi);
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names.join("·")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_major() {
        let mut identifier = ChordIdentifier::new();
        let event = identifier.identify(&[60, 64, 67], 1.0).unwrap();
        assert_eq!(event.name, "C Major");
        assert_eq!(event.notes, vec!["C4", "E4", "G4"]);
        assert_eq!(event.timestamp, 1.0);
    }

    #[test]
    fn test_a_minor() {
        let mut identifier = ChordIdentifier::new();
        let event = identifier.identify(&[57, 60, 64], 1.0).unwrap();
        assert_eq!(event.name, "A Minor");
        assert_eq!(event.notes, vec!["A3", "C4", "E4"]);
    }

    #[test]
    fn test_g_dominant_7() {
        let mut identifier = ChordIdentifier::new();
        let event = identifier.identify(&[55, 59, 62, 65], 1.0).unwrap();
        assert_eq!(event.name, "G Dominant 7");
    }

    #[test]
    fn test_too_few_notes() {
        let mut identifier = ChordIdentifier::new();
        assert!(identifier.identify(&[60, 64], 1.0).is_none());
        // Octave doubling collapses to two distinct notes
        assert!(identifier.identify(&[60, 64, 72], 1.0).is_none());
    }

    #[test]
    fn test_rate_limit() {
        let mut identifier = ChordIdentifier::new();
        assert!(identifier.identify(&[60, 64, 67], 1.0).is_some());
        // A different chord inside the window is still dropped
        assert!(identifier.identify(&[57, 60, 64], 1.3).is_none());
        assert!(identifier.identify(&[57, 60, 64], 1.6).is_some());
    }

    #[test]
    fn test_repeat_suppression() {
        let mut identifier = ChordIdentifier::new();
        assert!(identifier.identify(&[60, 64, 67], 1.0).is_some());
        // Same chord well past the rate limit: suppressed as a repeat
        assert!(identifier.identify(&[60, 64, 67], 2.0).is_none());
        // A different chord breaks the suppression
        assert!(identifier.identify(&[57, 60, 64], 3.0).is_some());
        // And the first chord may sound again
        assert!(identifier.identify(&[60, 64, 67], 4.0).is_some());
    }

    #[test]
    fn test_suppressed_repeat_does_not_reset_rate_limit() {
        let mut identifier = ChordIdentifier::new();
        assert!(identifier.identify(&[60, 64, 67], 1.0).is_some());
        assert!(identifier.identify(&[60, 64, 67], 1.8).is_none());
        // Rate-limit clock still anchored at 1.0, so 1.9 is eligible
        assert!(identifier.identify(&[57, 60, 64], 1.9).is_some());
    }

    #[test]
    fn test_generic_label_for_unknown_cluster() {
        let mut identifier = ChordIdentifier::new();
        // C, C#, D: a tone cluster with no table entry
        let event = identifier.identify(&[60, 61, 62], 1.0).unwrap();
        assert_eq!(event.name, "C·C#·D");
    }

    #[test]
    fn test_clear_forgets_history() {
        let mut identifier = ChordIdentifier::new();
        assert!(identifier.identify(&[60, 64, 67], 1.0).is_some());
        identifier.clear();
        // Both the rate limit and repeat suppression are gone
        assert!(identifier.identify(&[60, 64, 67], 1.1).is_some());
    }
}
