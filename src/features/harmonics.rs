//! Harmonic overtone rejection
//!
//! Separates true fundamentals from the overtones they cast across the
//! spectrum. A peak whose frequency sits near an integer (or common
//! fractional) multiple of a louder peak is an overtone of that peak, not an
//! independent note; conversely, a quieter peak at an integer *sub*-multiple
//! reveals that the louder peak was itself an overtone.
//!
//! A monophonic tone's harmonic series is spectrally indistinguishable from a
//! genuine chord, so rejection is gated behind a user-controlled enable flag
//! rather than guessed at.

use super::peaks::Peak;

/// Harmonics that mark a candidate as an overtone of an accepted fundamental
const HARMONIC_RANGE: std::ops::RangeInclusive<i32> = 2..=8;

/// Fifth-type overtone ratios (3rd, 5th, 7th harmonics an octave down)
const FIFTH_RATIOS: [f32; 3] = [1.5, 2.5, 3.5];

/// Harmonic filter parameters
#[derive(Debug, Clone)]
pub struct HarmonicParams {
    /// Enable overtone rejection
    pub enabled: bool,

    /// Relative tolerance around each harmonic ratio
    pub tolerance: f32,

    /// Fundamental cap with rejection enabled
    pub max_fundamentals: usize,

    /// Fundamental cap with rejection disabled
    pub max_unfiltered: usize,
}

/// Filter amplitude-sorted peaks down to fundamentals
///
/// Peaks are scanned loudest-first. Each candidate is compared against every
/// already-accepted fundamental:
///
/// - ratio near an integer in [2, 8] → candidate is an overtone, rejected;
/// - inverse ratio near an integer in [2, 8] → the accepted entry was the
///   overtone: the candidate replaces the first such entry in place;
/// - ratio near 1.5, 2.5, or 3.5 → fifth-type overtone, rejected.
///
/// Unmatched candidates become new fundamentals. The scan stops once the cap
/// is reached. With the filter disabled, peaks pass through untouched up to
/// the disabled cap.
///
/// # Arguments
///
/// * `peaks` - Peaks sorted by amplitude (highest first)
/// * `params` - Tolerance, caps, and the enable flag
///
/// # Returns
///
/// Surviving fundamentals, loudest-first acceptance order
pub fn filter_harmonics(peaks: &[Peak], params: &HarmonicParams) -> Vec<Peak> {
    if !params.enabled {
        return peaks.iter().take(params.max_unfiltered).cloned().collect();
    }

    log::debug!(
        "Filtering {} peaks, tolerance={:.2}, cap={}",
        peaks.len(),
        params.tolerance,
        params.max_fundamentals
    );

    let mut fundamentals: Vec<Peak> = Vec::with_capacity(params.max_fundamentals);

    'candidates: for peak in peaks {
        if fundamentals.len() >= params.max_fundamentals {
            break;
        }

        for idx in 0..fundamentals.len() {
            let ratio = peak.frequency / fundamentals[idx].frequency;

            if near_integer_harmonic(ratio, params.tolerance) {
                continue 'candidates;
            }

            // A quieter peak at an integer sub-multiple is the true
            // fundamental; the accepted entry was its overtone. Replace the
            // first qualifying entry and stop scanning this candidate.
            let inverse = fundamentals[idx].frequency / peak.frequency;
            if near_integer_harmonic(inverse, params.tolerance) {
                log::debug!(
                    "Sub-harmonic {:.1} Hz replaces fundamental {:.1} Hz",
                    peak.frequency,
                    fundamentals[idx].frequency
                );
                fundamentals[idx] = peak.clone();
                continue 'candidates;
            }

            if FIFTH_RATIOS
                .iter()
                .any(|&h| (ratio - h).abs() <= params.tolerance)
            {
                continue 'candidates;
            }
        }

        fundamentals.push(peak.clone());
    }

    fundamentals
}

/// True when `ratio` is within `tolerance` of an integer in [2, 8]
fn near_integer_harmonic(ratio: f32, tolerance: f32) -> bool {
    let rounded = ratio.round();
    HARMONIC_RANGE.contains(&(rounded as i32)) && (ratio - rounded).abs() <= tolerance
}
