//! Chord shape table
//!
//! Interval signatures are measured upward from the lowest sounding note,
//! modulo 12, in ascending MIDI order.

/// A known chord shape
#[derive(Debug, Clone, Copy)]
pub struct ChordShape {
    /// Intervals above the lowest note, mod 12, ascending MIDI order
    pub intervals: &'static [u8],

    /// Quality suffix appended to the root pitch class name
    pub quality: &'static str,
}

/// All recognized chord shapes
pub const CHORD_SHAPES: &[ChordShape] = &[
    // Triads
    ChordShape { intervals: &[4, 7], quality: "Major" },
    ChordShape { intervals: &[3, 7], quality: "Minor" },
    ChordShape { intervals: &[3, 6], quality: "Diminished" },
    ChordShape { intervals: &[4, 8], quality: "Augmented" },
    // Suspended
    ChordShape { intervals: &[2, 7], quality: "Sus2" },
    ChordShape { intervals: &[5, 7], quality: "Sus4" },
    // Sevenths
    ChordShape { intervals: &[4, 7, 11], quality: "Major 7" },
    ChordShape { intervals: &[4, 7, 10], quality: "Dominant 7" },
    ChordShape { intervals: &[3, 7, 10], quality: "Minor 7" },
    ChordShape { intervals: &[3, 7, 11], quality: "Minor-Major 7" },
    // Ninths (close voicing)
    ChordShape { intervals: &[2, 4, 7, 10], quality: "9th" },
    ChordShape { intervals: &[2, 3, 7, 10], quality: "Minor 9th" },
    // Power chord
    ChordShape { intervals: &[7], quality: "Power Chord" },
];

/// Look up the quality for an exact ordered interval signature
pub fn quality_for(intervals: &[u8]) -> Option<&'static str> {
    CHORD_SHAPES
        .iter()
        .find(|shape| shape.intervals == intervals)
        .map(|shape| shape.quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triads() {
        assert_eq!(quality_for(&[4, 7]), Some("Major"));
        assert_eq!(quality_for(&[3, 7]), Some("Minor"));
        assert_eq!(quality_for(&[3, 6]), Some("Diminished"));
        assert_eq!(quality_for(&[4, 8]), Some("Augmented"));
    }

    #[test]
    fn test_sevenths() {
        assert_eq!(quality_for(&[4, 7, 10]), Some("Dominant 7"));
        assert_eq!(quality_for(&[3, 7, 11]), Some("Minor-Major 7"));
    }

    #[test]
    fn test_unknown_signature() {
        assert_eq!(quality_for(&[1, 2]), None);
        assert_eq!(quality_for(&[]), None);
    }

    #[test]
    fn test_signatures_unique() {
        for (i, a) in CHORD_SHAPES.iter().enumerate() {
            for b in &CHORD_SHAPES[i + 1..] {
                assert_ne!(a.intervals, b.intervals, "duplicate shape {:?}", a.intervals);
            }
        }
    }
}
