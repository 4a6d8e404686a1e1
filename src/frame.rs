//! Magnitude frame input type

/// One frequency-domain magnitude snapshot, supplied externally once per tick.
///
/// Magnitudes are unsigned bytes indexed by frequency bin, as produced by the
/// capture layer's analysis-window transform. The timestamp is monotonic
/// seconds from the driving clock; it is the engine's only time source, which
/// keeps every pass deterministic and replayable.
#[derive(Debug, Clone, Copy)]
pub struct MagnitudeFrame<'a> {
    /// Byte magnitudes per frequency bin (0-255)
    pub magnitudes: &'a [u8],

    /// Monotonic frame timestamp in seconds
    pub timestamp: f64,
}

impl<'a> MagnitudeFrame<'a> {
    /// Create a frame over an externally owned magnitude array
    pub fn new(magnitudes: &'a [u8], timestamp: f64) -> Self {
        Self {
            magnitudes,
            timestamp,
        }
    }

    /// True if the frame carries no bins
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }
}
