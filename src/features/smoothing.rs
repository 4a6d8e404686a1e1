//! Temporal smoothing
//!
//! Groups fundamentals across a short rolling window of frames by nearest
//! semitone and averages them, suppressing single-frame transients while
//! still reacting within a handful of frames. The fraction of window frames
//! a note appears in becomes its confidence score.

use super::notes::midi_from_frequency;
use super::peaks::Peak;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// A note candidate averaged across the smoothing window
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedNote {
    /// Nearest MIDI note number of the group
    pub midi_note: i32,

    /// Frequency in Hz, averaged over all contributing peaks
    pub frequency: f32,

    /// Byte-scale amplitude, averaged over all contributing peaks
    pub amplitude: f32,

    /// Fraction of window frames the note appeared in (0.0-1.0)
    pub confidence: f32,
}

/// Smoothing parameters
#[derive(Debug, Clone)]
pub struct SmoothParams {
    /// Number of recent frames in the rolling window
    pub window_size: usize,

    /// Minimum confidence for a group to be emitted
    pub confidence_threshold: f32,
}

#[derive(Default)]
struct GroupAccumulator {
    frequency_sum: f32,
    amplitude_sum: f32,
    peak_count: u32,
    frame_count: u32,
}

/// Rolling buffer of recent fundamental sets
///
/// Owned by the engine; one `push` per tick.
#[derive(Debug, Default)]
pub struct TemporalSmoother {
    frames: VecDeque<Vec<Peak>>,
}

impl TemporalSmoother {
    /// Create an empty smoother
    pub fn new() -> Self {
        Self::default()
    }

    /// Push this tick's fundamentals and produce the smoothed note set
    ///
    /// Evicts frames beyond the window, groups all buffered fundamentals by
    /// nearest MIDI note, and averages frequency and amplitude per group.
    /// Confidence is contributing-frame-count / window_size, counting each
    /// frame at most once per note. Only groups at or above the confidence
    /// threshold are emitted, sorted by amplitude (highest first).
    pub fn push(&mut self, fundamentals: Vec<Peak>, params: &SmoothParams) -> Vec<SmoothedNote> {
        self.frames.push_back(fundamentals);
        while self.frames.len() > params.window_size {
            self.frames.pop_front();
        }

        let mut groups: BTreeMap<i32, GroupAccumulator> = BTreeMap::new();

        for frame in &self.frames {
            let mut seen_this_frame: HashSet<i32> = HashSet::new();
            for peak in frame {
                let midi_note = match midi_from_frequency(peak.frequency) {
                    Ok(midi) => midi,
                    Err(err) => {
                        log::warn!("Skipping unmappable fundamental: {}", err);
                        continue;
                    }
                };
                let group = groups.entry(midi_note).or_default();
                group.frequency_sum += peak.frequency;
                group.amplitude_sum += peak.amplitude;
                group.peak_count += 1;
                if seen_this_frame.insert(midi_note) {
                    group.frame_count += 1;
                }
            }
        }

        let mut notes: Vec<SmoothedNote> = groups
            .into_iter()
            .filter_map(|(midi_note, group)| {
                let confidence = group.frame_count as f32 / params.window_size as f32;
                if confidence < params.confidence_threshold {
                    return None;
                }
                Some(SmoothedNote {
                    midi_note,
                    frequency: group.frequency_sum / group.peak_count as f32,
                    amplitude: group.amplitude_sum / group.peak_count as f32,
                    confidence,
                })
            })
            .collect();

        notes.sort_by(|a, b| {
            b.amplitude
                .partial_cmp(&a.amplitude)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        notes
    }

    /// Drop all buffered frames
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Number of frames currently buffered
    pub fn buffered_frames(&self) -> usize {
        self.frames.len()
    }
}
