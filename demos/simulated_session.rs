//! Example: Simulate a short detection session
//!
//! Feeds the engine a held C major chord at a 60 Hz tick rate and prints
//! every reported note and chord emission, then the retained history.

use noteflow_dsp::{DetectionConfig, DetectionEngine, MagnitudeFrame};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    // 32768 Hz / 4096-point session: 8 Hz bins
    let config = DetectionConfig {
        sample_rate: 32768,
        window_size: 4096,
        // Chord mode: leave genuine simultaneous notes untouched
        harmonic_filter: false,
        ..DetectionConfig::default()
    };
    let mut engine = DetectionEngine::new(config)?;

    // C4, E4, G4 as symmetric spectral bumps at bins 33/41/49
    let mut magnitudes = vec![0u8; 2048];
    for &(bin, height) in &[(33usize, 220u8), (41, 200), (49, 180)] {
        magnitudes[bin - 1] = height / 2;
        magnitudes[bin] = height;
        magnitudes[bin + 1] = height / 2;
    }

    let mut last_result = None;
    for i in 0..90 {
        let now = i as f64 / 60.0;
        let result = engine.process_frame(&MagnitudeFrame::new(&magnitudes, now));

        if let Some(chord) = &result.chord {
            println!(
                "t={:.3}s  chord: {} ({})",
                now,
                chord.name,
                chord.notes.join(", ")
            );
        }
        for note in &result.notes {
            println!(
                "t={:.3}s  {}  {:.1} Hz  {:+} cents  confidence {:.2}",
                now, note.name, note.frequency, note.cents, note.confidence
            );
        }
        last_result = Some(result);
    }

    println!("\n{} history entries retained", engine.history().len());
    if let Some(result) = last_result {
        println!("last tick as JSON: {}", serde_json::to_string(&result)?);
    }

    Ok(())
}
