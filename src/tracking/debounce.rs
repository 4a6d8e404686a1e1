//! Note confirmation and debounce
//!
//! Per-MIDI-note state machine requiring sustained presence before a note is
//! reported and a silence timeout before it is forgotten. Debounce rejects
//! transients (breath, finger noise) while letting sustained tones register
//! promptly; the timeout is independent of confirmation, so a long-held note
//! stops reporting as soon as the performer does.

use std::collections::HashMap;

/// Debounce timing parameters, in seconds
#[derive(Debug, Clone)]
pub struct DebounceParams {
    /// Continuous observation required before confirmation
    pub min_note_duration: f32,

    /// Silence gap after which a tracked note is deleted
    pub silence_timeout: f32,
}

#[derive(Debug, Clone)]
struct NoteState {
    start_time: f64,
    last_seen: f64,
    confirmed: bool,
}

/// Per-note confirmation tracker
///
/// Owned by the engine; one `observe` per tick.
#[derive(Debug, Default)]
pub struct NoteTracker {
    states: HashMap<i32, NoteState>,
}

impl NoteTracker {
    /// Create a tracker with no pending notes
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state machine one tick
    ///
    /// `observed` is the set of MIDI notes present this tick (already
    /// deduplicated by the smoother's per-semitone grouping). Transitions:
    ///
    /// - unknown note → pending, with `start = last_seen = now`;
    /// - re-observed note → `last_seen = now`;
    /// - pending note observed with `now - start >= min_note_duration` →
    ///   confirmed, reported from this tick onward;
    /// - any note with `now - last_seen > silence_timeout` → deleted.
    ///
    /// # Returns
    ///
    /// The intersection of confirmed notes and this tick's observations, in
    /// ascending MIDI order. A confirmed note that is silent this tick yields
    /// no output but survives until its timeout elapses.
    pub fn observe(&mut self, observed: &[i32], now: f64, params: &DebounceParams) -> Vec<i32> {
        for &midi_note in observed {
            let state = self.states.entry(midi_note).or_insert(NoteState {
                start_time: now,
                last_seen: now,
                confirmed: false,
            });
            state.last_seen = now;
            if !state.confirmed && now - state.start_time >= params.min_note_duration as f64 {
                state.confirmed = true;
            }
        }

        let timeout = params.silence_timeout as f64;
        self.states.retain(|midi_note, state| {
            let keep = now - state.last_seen <= timeout;
            if !keep {
                log::debug!("Note {} silent for >{:.3}s, forgotten", midi_note, timeout);
            }
            keep
        });

        let mut confirmed: Vec<i32> = observed
            .iter()
            .copied()
            .filter(|midi_note| {
                self.states
                    .get(midi_note)
                    .map(|state| state.confirmed)
                    .unwrap_or(false)
            })
            .collect();
        confirmed.sort_unstable();
        confirmed
    }

    /// Forget every tracked note
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Number of notes currently tracked (pending or confirmed)
    pub fn tracked_notes(&self) -> usize {
        self.states.len()
    }
}
