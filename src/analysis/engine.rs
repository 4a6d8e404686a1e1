//! Detection engine
//!
//! Owns every piece of cross-tick state (smoothing buffer, debounce table,
//! chord history, timeline log) and runs the full pipeline once per incoming
//! magnitude frame. Strictly single-threaded and tick-driven: the external
//! capture layer controls cadence, and no pass starts before the previous
//! one returns.

use crate::analysis::result::{HistoryEntry, ReportedNote, TickResult};
use crate::config::DetectionConfig;
use crate::error::DetectionError;
use crate::features::chords::ChordIdentifier;
use crate::features::harmonics::{filter_harmonics, HarmonicParams};
use crate::features::notes::{map_frequency, UNPITCHED_NAME};
use crate::features::peaks::{find_spectral_peaks, PeakParams};
use crate::features::smoothing::{SmoothParams, TemporalSmoother};
use crate::frame::MagnitudeFrame;
use crate::tracking::debounce::{DebounceParams, NoteTracker};
use crate::tracking::history::HistoryRecorder;

/// Stateful real-time note/chord detection engine
///
/// # Example
///
/// ```
/// use noteflow_dsp::{DetectionConfig, DetectionEngine, MagnitudeFrame};
///
/// let mut engine = DetectionEngine::new(DetectionConfig::default())?;
/// let magnitudes = vec![0u8; 2048];
/// let result = engine.process_frame(&MagnitudeFrame::new(&magnitudes, 0.0));
/// assert!(result.notes.is_empty());
/// # Ok::<(), noteflow_dsp::DetectionError>(())
/// ```
#[derive(Debug)]
pub struct DetectionEngine {
    config: DetectionConfig,
    bin_hz: f32,
    smoother: TemporalSmoother,
    tracker: NoteTracker,
    chords: ChordIdentifier,
    history: HistoryRecorder,
}

impl DetectionEngine {
    /// Create an engine with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::Configuration` for invalid parameters.
    pub fn new(config: DetectionConfig) -> Result<Self, DetectionError> {
        config.validate()?;
        let bin_hz = config.bin_resolution();
        Ok(Self {
            config,
            bin_hz,
            smoother: TemporalSmoother::new(),
            tracker: NoteTracker::new(),
            chords: ChordIdentifier::new(),
            history: HistoryRecorder::new(),
        })
    }

    /// Current configuration
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Replace the configuration between ticks
    ///
    /// Session-fixed fields (`sample_rate`, `window_size`) may not change;
    /// create a fresh engine for a new session geometry.
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::Configuration` and leaves the engine
    /// (configuration and all tracking state) untouched.
    pub fn set_config(&mut self, config: DetectionConfig) -> Result<(), DetectionError> {
        config.validate()?;
        if config.sample_rate != self.config.sample_rate
            || config.window_size != self.config.window_size
        {
            return Err(DetectionError::Configuration(
                "sample_rate and window_size are fixed for the session".to_string(),
            ));
        }
        self.bin_hz = config.bin_resolution();
        self.config = config;
        Ok(())
    }

    /// Run one full pipeline pass over a magnitude frame
    ///
    /// Never fails: a degenerate frame yields an empty note set while
    /// cross-tick state still ages (the smoothing window shifts and debounce
    /// timeouts run), so silence behaves exactly like a frame with no peaks.
    pub fn process_frame(&mut self, frame: &MagnitudeFrame<'_>) -> TickResult {
        let now = frame.timestamp;
        log::debug!(
            "Processing frame: {} bins at t={:.3}s",
            frame.magnitudes.len(),
            now
        );

        let peaks = find_spectral_peaks(frame.magnitudes, self.bin_hz, &self.peak_params());
        let fundamentals = filter_harmonics(&peaks, &self.harmonic_params());
        let smoothed = self.smoother.push(fundamentals, &self.smooth_params());

        let mut mapped = Vec::with_capacity(smoothed.len());
        for note in smoothed {
            match map_frequency(note.frequency) {
                Ok(record) => mapped.push((note, record)),
                // Upstream bounds keep frequencies positive; never trust that silently
                Err(err) => log::warn!("Skipping unmappable smoothed note: {}", err),
            }
        }

        let observed: Vec<i32> = mapped.iter().map(|(_, record)| record.midi_note).collect();
        let confirmed = self.tracker.observe(&observed, now, &self.debounce_params());

        let mut notes: Vec<ReportedNote> = Vec::with_capacity(confirmed.len());
        for (smoothed, record) in &mapped {
            if !confirmed.contains(&record.midi_note) {
                continue;
            }
            let out_of_tune = record.cents.abs() > self.config.unpitched_tolerance_cents;
            let name = if self.config.unpitched_substitution && out_of_tune {
                UNPITCHED_NAME.to_string()
            } else {
                record.name.clone()
            };
            notes.push(ReportedNote {
                name,
                frequency: record.frequency,
                cents: record.cents,
                midi_note: record.midi_note,
                amplitude: smoothed.amplitude,
                confidence: smoothed.confidence,
            });

            self.history.push(HistoryEntry {
                note_name: record.name.clone(),
                frequency: record.frequency,
                cents: record.cents,
                amplitude: smoothed.amplitude,
                timestamp_seconds: now,
            });
        }
        self.history.prune(now, self.config.history_retention);

        let chord = if notes.len() >= 3 {
            self.chords.identify(&confirmed, now)
        } else {
            None
        };

        TickResult {
            notes,
            chord,
            timestamp: now,
        }
    }

    /// Confirmed-note timeline, oldest first, bounded by the retention window
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// Synchronously clear all cross-tick state
    ///
    /// The "stop" action: a later session starts clean, with the
    /// configuration kept.
    pub fn reset(&mut self) {
        self.smoother.clear();
        self.tracker.clear();
        self.chords.clear();
        self.history.clear();
        log::debug!("Engine state cleared");
    }

    fn peak_params(&self) -> PeakParams {
        PeakParams {
            min_frequency: self.config.min_frequency,
            max_frequency: self.config.max_frequency,
            amplitude_threshold: self.config.amplitude_threshold,
            half_window: self.config.peak_half_window,
        }
    }

    fn harmonic_params(&self) -> HarmonicParams {
        HarmonicParams {
            enabled: self.config.harmonic_filter,
            tolerance: self.config.harmonic_tolerance,
            max_fundamentals: self.config.max_fundamentals,
            max_unfiltered: self.config.max_unfiltered,
        }
    }

    fn smooth_params(&self) -> SmoothParams {
        SmoothParams {
            window_size: self.config.smoothing_window,
            confidence_threshold: self.config.confidence_threshold,
        }
    }

    fn debounce_params(&self) -> DebounceParams {
        DebounceParams {
            min_note_duration: self.config.min_note_duration,
            silence_timeout: self.config.silence_timeout,
        }
    }
}
