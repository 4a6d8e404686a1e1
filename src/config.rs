//! Configuration parameters for the detection engine

use crate::error::DetectionError;
use std::str::FromStr;

/// Detection configuration parameters
///
/// All fields except `sample_rate` and `window_size` may be changed between
/// ticks via [`DetectionEngine::set_config`](crate::DetectionEngine::set_config).
/// Invalid values are rejected with [`DetectionError::Configuration`] rather
/// than silently clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    // Session-fixed analysis geometry
    /// Sample rate of the capture session in Hz (default: 44100)
    ///
    /// Fixed for the lifetime of an engine; together with `window_size` it
    /// determines the Hz width of one magnitude bin.
    pub sample_rate: u32,

    /// Size of the analysis window that produced the magnitude frames
    /// (default: 4096)
    ///
    /// Incoming frames are expected to carry `window_size / 2` bins.
    pub window_size: usize,

    // Peak extraction
    /// Lower bound of the frequency search range in Hz (default: 65.0, ~C2)
    pub min_frequency: f32,

    /// Upper bound of the frequency search range in Hz (default: 4000.0)
    pub max_frequency: f32,

    /// Minimum byte magnitude for a bin to qualify as a peak (default: 100)
    pub amplitude_threshold: u8,

    /// Half-window for the local-maximum test; a peak must exceed all
    /// `2 * peak_half_window` neighbors (default: 7)
    pub peak_half_window: usize,

    // Harmonic filtering
    /// Enable harmonic-overtone rejection (default: true)
    ///
    /// A single tone's harmonic series is spectrally indistinguishable from a
    /// genuine chord, so this stays a user-facing toggle: enable it for
    /// monophonic playing, disable it to let chords through untouched.
    pub harmonic_filter: bool,

    /// Relative tolerance when matching a peak ratio against a harmonic
    /// multiple (default: 0.20)
    pub harmonic_tolerance: f32,

    /// Maximum simultaneous fundamentals when the harmonic filter is enabled
    /// (default: 3)
    pub max_fundamentals: usize,

    /// Maximum simultaneous fundamentals when the harmonic filter is disabled
    /// (default: 5)
    pub max_unfiltered: usize,

    // Temporal smoothing
    /// Number of recent frames in the smoothing window (default: 5)
    pub smoothing_window: usize,

    /// Minimum fraction of window frames a note must appear in before it is
    /// emitted, 0.0-1.0 (default: 0.5)
    pub confidence_threshold: f32,

    // Confirmation / debounce
    /// Seconds a note must be continuously observed before it is reported
    /// (default: 0.1)
    pub min_note_duration: f32,

    /// Seconds of silence after which a tracked note is forgotten
    /// (default: 0.3)
    pub silence_timeout: f32,

    // History
    /// Seconds of confirmed-note history retained for timeline rendering
    /// (default: 10.0)
    pub history_retention: f32,

    // Note naming policy
    /// Substitute an unpitched sentinel name when a note is badly out of tune
    /// (default: false)
    ///
    /// Display-only: MIDI number, cents, and chord identification always use
    /// the nearest note.
    pub unpitched_substitution: bool,

    /// Cents deviation beyond which the sentinel substitution applies,
    /// 0-50 (default: 35)
    pub unpitched_tolerance_cents: i32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            window_size: 4096,
            min_frequency: 65.0,
            max_frequency: 4000.0,
            amplitude_threshold: 100,
            peak_half_window: 7,
            harmonic_filter: true,
            harmonic_tolerance: 0.20,
            max_fundamentals: 3,
            max_unfiltered: 5,
            smoothing_window: 5,
            confidence_threshold: 0.5,
            min_note_duration: 0.1,
            silence_timeout: 0.3,
            history_retention: 10.0,
            unpitched_substitution: false,
            unpitched_tolerance_cents: 35,
        }
    }
}

impl DetectionConfig {
    /// Build the configuration for a named preset
    ///
    /// Presets bundle consistent combinations of threshold, confidence, and
    /// timing values; session-fixed fields keep their defaults.
    pub fn preset(preset: Preset) -> Self {
        let base = Self::default();
        match preset {
            Preset::Sensitive => Self {
                amplitude_threshold: 70,
                confidence_threshold: 0.4,
                min_note_duration: 0.06,
                smoothing_window: 4,
                silence_timeout: 0.35,
                ..base
            },
            Preset::Balanced => base,
            Preset::Aggressive => Self {
                amplitude_threshold: 140,
                confidence_threshold: 0.7,
                min_note_duration: 0.15,
                smoothing_window: 6,
                silence_timeout: 0.25,
                ..base
            },
        }
    }

    /// Validate all parameters
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::Configuration` describing the first offending
    /// field. Values are never clamped.
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.sample_rate == 0 {
            return Err(DetectionError::Configuration(
                "sample_rate must be positive".to_string(),
            ));
        }
        if self.window_size < 2 {
            return Err(DetectionError::Configuration(format!(
                "window_size must be at least 2, got {}",
                self.window_size
            )));
        }
        if !self.min_frequency.is_finite() || self.min_frequency <= 0.0 {
            return Err(DetectionError::Configuration(format!(
                "min_frequency must be positive and finite, got {}",
                self.min_frequency
            )));
        }
        if !self.max_frequency.is_finite() || self.max_frequency <= self.min_frequency {
            return Err(DetectionError::Configuration(format!(
                "max_frequency must exceed min_frequency ({} <= {})",
                self.max_frequency, self.min_frequency
            )));
        }
        if self.peak_half_window == 0 {
            return Err(DetectionError::Configuration(
                "peak_half_window must be at least 1".to_string(),
            ));
        }
        if !self.harmonic_tolerance.is_finite()
            || self.harmonic_tolerance <= 0.0
            || self.harmonic_tolerance >= 0.5
        {
            return Err(DetectionError::Configuration(format!(
                "harmonic_tolerance must be in (0.0, 0.5), got {}",
                self.harmonic_tolerance
            )));
        }
        if self.max_fundamentals == 0 || self.max_unfiltered == 0 {
            return Err(DetectionError::Configuration(
                "fundamental caps must be at least 1".to_string(),
            ));
        }
        if self.smoothing_window == 0 {
            return Err(DetectionError::Configuration(
                "smoothing_window must be at least 1".to_string(),
            ));
        }
        if !self.confidence_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.confidence_threshold)
        {
            return Err(DetectionError::Configuration(format!(
                "confidence_threshold must be in [0.0, 1.0], got {}",
                self.confidence_threshold
            )));
        }
        if !self.min_note_duration.is_finite() || self.min_note_duration < 0.0 {
            return Err(DetectionError::Configuration(format!(
                "min_note_duration must be non-negative, got {}",
                self.min_note_duration
            )));
        }
        if !self.silence_timeout.is_finite() || self.silence_timeout < 0.0 {
            return Err(DetectionError::Configuration(format!(
                "silence_timeout must be non-negative, got {}",
                self.silence_timeout
            )));
        }
        if !self.history_retention.is_finite() || self.history_retention <= 0.0 {
            return Err(DetectionError::Configuration(format!(
                "history_retention must be positive, got {}",
                self.history_retention
            )));
        }
        if !(0..=50).contains(&self.unpitched_tolerance_cents) {
            return Err(DetectionError::Configuration(format!(
                "unpitched_tolerance_cents must be in [0, 50], got {}",
                self.unpitched_tolerance_cents
            )));
        }
        Ok(())
    }

    /// Hz width of one magnitude bin for this session geometry
    pub fn bin_resolution(&self) -> f32 {
        self.sample_rate as f32 / self.window_size as f32
    }
}

/// Named configuration presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Low thresholds, quick confirmation: picks up quiet and short notes
    Sensitive,
    /// Default trade-off between responsiveness and stability
    Balanced,
    /// High thresholds, slow confirmation: suppresses noise and transients
    Aggressive,
}

impl FromStr for Preset {
    type Err = DetectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sensitive" => Ok(Preset::Sensitive),
            "balanced" => Ok(Preset::Balanced),
            "aggressive" => Ok(Preset::Aggressive),
            other => Err(DetectionError::Configuration(format!(
                "unknown preset: {}",
                other
            ))),
        }
    }
}
