//! Note mapping
//!
//! Converts frequencies to note names, MIDI numbers, octaves, and cents
//! deviation under A4 = 440 Hz equal temperament.

use crate::analysis::result::NoteRecord;
use crate::error::DetectionError;

/// Pitch class names starting at C
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Sentinel display name for a badly out-of-tune note
///
/// Only used when the unpitched-substitution policy is enabled; see
/// [`DetectionConfig::unpitched_substitution`](crate::DetectionConfig::unpitched_substitution).
pub const UNPITCHED_NAME: &str = "?";

/// Map a frequency to its full note record
///
/// Computes `n = 12 * log2(f / 440)`, rounds to the nearest semitone, and
/// derives the MIDI number (nearest + 69), cents deviation, octave, and name.
/// Cents are guaranteed in [-50, 50] by the nearest-semitone rounding.
///
/// # Errors
///
/// Returns `DetectionError::InvalidFrequency` for non-positive or non-finite
/// input. Upstream frequency bounds should prevent this, but the mapper does
/// not trust that silently.
///
/// # Example
///
/// ```
/// use noteflow_dsp::features::notes::map_frequency;
///
/// let record = map_frequency(440.0)?;
/// assert_eq!(record.name, "A4");
/// assert_eq!(record.midi_note, 69);
/// assert_eq!(record.cents, 0);
/// # Ok::<(), noteflow_dsp::DetectionError>(())
/// ```
pub fn map_frequency(frequency: f32) -> Result<NoteRecord, DetectionError> {
    let midi_note = midi_from_frequency(frequency)?;

    let n = 12.0 * (frequency / 440.0).log2();
    let nearest = n.round();
    let cents = ((n - nearest) * 100.0).round() as i32;

    Ok(NoteRecord {
        name: format!("{}{}", pitch_class_name(midi_note), octave_of(midi_note)),
        cents,
        midi_note,
        frequency,
    })
}

/// Nearest MIDI note number for a frequency
///
/// # Errors
///
/// Returns `DetectionError::InvalidFrequency` for non-positive or non-finite
/// input.
pub fn midi_from_frequency(frequency: f32) -> Result<i32, DetectionError> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(DetectionError::InvalidFrequency(frequency));
    }
    let n = 12.0 * (frequency / 440.0).log2();
    Ok(n.round() as i32 + 69)
}

/// Pitch class name of a MIDI note (e.g., 69 -> "A")
pub fn pitch_class_name(midi_note: i32) -> &'static str {
    NOTE_NAMES[midi_note.rem_euclid(12) as usize]
}

/// Scientific-pitch octave of a MIDI note (e.g., 69 -> 4)
pub fn octave_of(midi_note: i32) -> i32 {
    midi_note.div_euclid(12) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_exact() {
        let record = map_frequency(440.0).unwrap();
        assert_eq!(record.name, "A4");
        assert_eq!(record.midi_note, 69);
        assert_eq!(record.cents, 0);
        assert_eq!(record.frequency, 440.0);
    }

    #[test]
    fn test_middle_c() {
        let record = map_frequency(261.63).unwrap();
        assert_eq!(record.name, "C4");
        assert_eq!(record.midi_note, 60);
        assert_eq!(record.cents, 0);
    }

    #[test]
    fn test_sharp_names() {
        assert_eq!(map_frequency(466.16).unwrap().name, "A#4");
        assert_eq!(map_frequency(277.18).unwrap().name, "C#4");
    }

    #[test]
    fn test_octave_boundaries() {
        // B3 (midi 59) and C4 (midi 60) straddle an octave change
        assert_eq!(map_frequency(246.94).unwrap().name, "B3");
        assert_eq!(map_frequency(261.63).unwrap().name, "C4");
    }

    #[test]
    fn test_cents_sign() {
        // 445 Hz is ~20 cents sharp of A4
        let sharp = map_frequency(445.0).unwrap();
        assert_eq!(sharp.midi_note, 69);
        assert!(sharp.cents > 0);

        let flat = map_frequency(435.0).unwrap();
        assert_eq!(flat.midi_note, 69);
        assert!(flat.cents < 0);
    }

    #[test]
    fn test_cents_always_in_range() {
        // Sweep a wide, irregular set of frequencies
        let mut f = 20.0f32;
        while f < 8000.0 {
            let record = map_frequency(f).unwrap();
            assert!(
                (-50..=50).contains(&record.cents),
                "cents {} out of range at {} Hz",
                record.cents,
                f
            );
            f *= 1.0173;
        }
    }

    #[test]
    fn test_invalid_frequencies_rejected() {
        for bad in [0.0, -440.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(
                map_frequency(bad).is_err(),
                "{} Hz should be rejected",
                bad
            );
            assert!(midi_from_frequency(bad).is_err());
        }
    }

    #[test]
    fn test_octave_of() {
        assert_eq!(octave_of(69), 4); // A4
        assert_eq!(octave_of(60), 4); // C4
        assert_eq!(octave_of(59), 3); // B3
        assert_eq!(octave_of(21), 0); // A0
        assert_eq!(octave_of(108), 8); // C8
    }

    #[test]
    fn test_pitch_class_wraps() {
        assert_eq!(pitch_class_name(60), "C");
        assert_eq!(pitch_class_name(69), "A");
        assert_eq!(pitch_class_name(0), "C");
        // Negative MIDI numbers (sub-audio frequencies) still index correctly
        assert_eq!(pitch_class_name(-1), "B");
    }
}
