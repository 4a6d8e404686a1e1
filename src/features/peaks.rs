//! Spectral peak extraction
//!
//! Finds local-maximum bins above an amplitude floor in a byte magnitude
//! spectrum and refines each to a fractional-bin frequency via parabolic
//! interpolation.

const EPSILON: f32 = 1e-10;

/// A spectral peak with sub-bin refined frequency
#[derive(Debug, Clone, PartialEq)]
pub struct Peak {
    /// Refined frequency in Hz
    pub frequency: f32,

    /// Byte magnitude of the peak bin (0-255 scale)
    pub amplitude: f32,

    /// Index of the peak bin in the magnitude array
    pub bin: usize,
}

/// Peak extraction parameters
#[derive(Debug, Clone)]
pub struct PeakParams {
    /// Lower frequency bound in Hz
    pub min_frequency: f32,

    /// Upper frequency bound in Hz
    pub max_frequency: f32,

    /// Minimum byte magnitude for a bin to qualify
    pub amplitude_threshold: u8,

    /// Half-window for the local-maximum test
    pub half_window: usize,
}

/// Find spectral peaks in a byte magnitude spectrum
///
/// A bin qualifies as a peak when its magnitude reaches the threshold and is
/// strictly greater than every one of its `2 * half_window` in-range
/// neighbors; an equal neighbor disqualifies the bin. Each accepted peak is
/// refined to a fractional-bin frequency with [`parabolic_offset`].
///
/// # Arguments
///
/// * `magnitudes` - Byte magnitudes indexed by frequency bin
/// * `bin_hz` - Hz width of one bin (sample rate / window size)
/// * `params` - Frequency bounds, threshold, and neighbor half-window
///
/// # Returns
///
/// Peaks sorted by amplitude (highest first)
pub fn find_spectral_peaks(magnitudes: &[u8], bin_hz: f32, params: &PeakParams) -> Vec<Peak> {
    log::debug!(
        "Finding peaks in {} bins, bin_hz={:.3}, threshold={}, half_window={}",
        magnitudes.len(),
        bin_hz,
        params.amplitude_threshold,
        params.half_window
    );

    if magnitudes.len() < 3 || bin_hz <= EPSILON {
        return vec![];
    }

    // Restrict the scan to the configured frequency range, keeping one bin of
    // margin on both sides for interpolation.
    let lo = ((params.min_frequency / bin_hz).ceil() as usize).max(1);
    let hi = ((params.max_frequency / bin_hz).floor() as usize).min(magnitudes.len() - 2);
    if lo > hi {
        return vec![];
    }

    let mut peaks = Vec::new();

    for i in lo..=hi {
        let value = magnitudes[i];
        if value < params.amplitude_threshold {
            continue;
        }

        // Strict local maximum over the whole neighbor window
        let window_lo = i.saturating_sub(params.half_window);
        let window_hi = (i + params.half_window).min(magnitudes.len() - 1);
        let is_peak = (window_lo..=window_hi)
            .filter(|&j| j != i)
            .all(|j| value > magnitudes[j]);
        if !is_peak {
            continue;
        }

        let y1 = magnitudes[i - 1] as f32;
        let y2 = value as f32;
        let y3 = magnitudes[i + 1] as f32;
        let offset = parabolic_offset(y1, y2, y3);

        peaks.push(Peak {
            frequency: (i as f32 + offset) * bin_hz,
            amplitude: y2,
            bin: i,
        });
    }

    // Sort by amplitude (highest first); stable, so ties keep ascending bin order
    peaks.sort_by(|a, b| {
        b.amplitude
            .partial_cmp(&a.amplitude)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    log::debug!("Found {} peaks", peaks.len());

    peaks
}

/// Fractional-bin offset of a parabola fitted through three points
///
/// Fits a parabola to the magnitudes at (i-1, i, i+1) and returns the offset
/// of its vertex from the center bin, in bins. A degenerate (zero-denominator)
/// fit returns 0.0, falling back to the bin center rather than propagating
/// NaN or infinity.
pub fn parabolic_offset(y1: f32, y2: f32, y3: f32) -> f32 {
    let denominator = 2.0 * y2 - y1 - y3;
    if denominator.abs() < EPSILON {
        return 0.0;
    }
    0.5 * (y3 - y1) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PeakParams {
        PeakParams {
            min_frequency: 65.0,
            max_frequency: 4000.0,
            amplitude_threshold: 100,
            half_window: 7,
        }
    }

    /// Spectrum with a symmetric peak at the given bin
    fn spectrum_with_peak(len: usize, bin: usize, height: u8) -> Vec<u8> {
        let mut mags = vec![0u8; len];
        mags[bin - 1] = height / 2;
        mags[bin] = height;
        mags[bin + 1] = height / 2;
        mags
    }

    #[test]
    fn test_single_symmetric_peak() {
        let mags = spectrum_with_peak(512, 55, 200);
        let peaks = find_spectral_peaks(&mags, 8.0, &params());

        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].bin, 55);
        // Symmetric shoulders leave the vertex on the bin center
        assert!((peaks[0].frequency - 440.0).abs() < 1e-3);
        assert_eq!(peaks[0].amplitude, 200.0);
    }

    #[test]
    fn test_empty_and_short_spectra() {
        assert!(find_spectral_peaks(&[], 8.0, &params()).is_empty());
        assert!(find_spectral_peaks(&[255, 255], 8.0, &params()).is_empty());
    }

    #[test]
    fn test_below_threshold_ignored() {
        let mags = spectrum_with_peak(512, 55, 90);
        assert!(find_spectral_peaks(&mags, 8.0, &params()).is_empty());
    }

    #[test]
    fn test_equal_neighbor_disqualifies() {
        let mut mags = vec![0u8; 512];
        // Plateau of two equal bins: neither is strictly greater
        mags[54] = 200;
        mags[55] = 200;
        assert!(find_spectral_peaks(&mags, 8.0, &params()).is_empty());
    }

    #[test]
    fn test_close_peaks_within_half_window_suppressed() {
        let mut mags = vec![0u8; 512];
        mags[55] = 200;
        mags[58] = 180; // 3 bins away, inside the 7-bin half-window of 55
        let peaks = find_spectral_peaks(&mags, 8.0, &params());

        // 58 sees the stronger 55 in its window and is rejected
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].bin, 55);
    }

    #[test]
    fn test_frequency_bounds_respected() {
        let mut mags = vec![0u8; 512];
        mags[4] = 200; // 32 Hz at 8 Hz/bin, below min_frequency
        mags[501] = 200; // 4008 Hz, above max_frequency
        assert!(find_spectral_peaks(&mags, 8.0, &params()).is_empty());
    }

    #[test]
    fn test_sorted_by_amplitude() {
        let mut mags = vec![0u8; 512];
        mags[55] = 180;
        mags[110] = 220;
        mags[165] = 140;
        let peaks = find_spectral_peaks(&mags, 8.0, &params());

        assert_eq!(peaks.len(), 3);
        assert_eq!(peaks[0].bin, 110);
        assert_eq!(peaks[1].bin, 55);
        assert_eq!(peaks[2].bin, 165);
    }

    #[test]
    fn test_asymmetric_peak_refined_toward_heavier_shoulder() {
        let mut mags = vec![0u8; 512];
        mags[54] = 100;
        mags[55] = 200;
        mags[56] = 160;
        let peaks = find_spectral_peaks(&mags, 8.0, &params());

        assert_eq!(peaks.len(), 1);
        // Heavier right shoulder pulls the vertex above the bin center
        assert!(peaks[0].frequency > 55.0 * 8.0);
        assert!(peaks[0].frequency < 55.5 * 8.0);
    }

    #[test]
    fn test_parabolic_offset_zero_denominator() {
        // Degenerate fit must fall back to the bin center, not NaN
        assert_eq!(parabolic_offset(100.0, 100.0, 100.0), 0.0);
    }

    #[test]
    fn test_parabolic_offset_symmetric() {
        assert_eq!(parabolic_offset(100.0, 200.0, 100.0), 0.0);
    }

    #[test]
    fn test_idempotent() {
        let mags = spectrum_with_peak(512, 55, 200);
        let first = find_spectral_peaks(&mags, 8.0, &params());
        let second = find_spectral_peaks(&mags, 8.0, &params());
        assert_eq!(first, second);
    }
}
