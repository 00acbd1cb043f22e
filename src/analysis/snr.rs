use log::debug;

use crate::analysis::error::AnalysisError;

/// Operator-selected pulse band in BPM. `start <= end` is the caller's
/// contract and is not auto-corrected; overlapping bands are not merged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseBand {
    pub start_bpm: f64,
    pub end_bpm: f64,
}

/// Linear and decibel signal-to-noise ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnrReport {
    pub linear: f64,
    pub db: f64,
}

/// Energy ratio of the selected bands against the rest of the spectrum.
///
/// Power is the squared magnitude. Each band's slice covers only one half of
/// the two-sided spectrum, so its energy counts twice for the mirrored
/// negative-frequency image. Bands are summed as given; supplying disjoint
/// bands is the caller's responsibility.
pub fn estimate_snr(
    pulse_axis: &[f64],
    magnitudes: &[f64],
    bands: &[PulseBand],
) -> Result<SnrReport, AnalysisError> {
    if pulse_axis.is_empty() || magnitudes.is_empty() {
        return Err(AnalysisError::EmptySequence);
    }
    let power: Vec<f64> = magnitudes.iter().map(|m| m * m).collect();
    let total_energy: f64 = power.iter().sum();
    let mut band_energy = 0.0;
    for band in bands {
        let (start_idx, end_idx) = band_indices(pulse_axis, band);
        if start_idx > end_idx {
            // band straddles the Nyquist wraparound; empty selection
            continue;
        }
        band_energy += 2.0 * power[start_idx..=end_idx].iter().sum::<f64>();
    }
    let noise_energy = total_energy - band_energy;
    debug!("snr energies: total {total_energy}, band {band_energy}, noise {noise_energy}");
    if noise_energy <= 0.0 || band_energy <= 0.0 {
        return Err(AnalysisError::DegenerateSnr);
    }
    let linear = band_energy / noise_energy;
    Ok(SnrReport {
        linear,
        db: 10.0 * linear.log10(),
    })
}

/// Nearest axis indices for a band's start and end values.
pub fn band_indices(pulse_axis: &[f64], band: &PulseBand) -> (usize, usize) {
    (
        nearest_index(pulse_axis, band.start_bpm),
        nearest_index(pulse_axis, band.end_bpm),
    )
}

/// Index of the axis value closest to `target`.
///
/// The pulse axis is not monotonic (it wraps to negative past the Nyquist
/// point), so this is an explicit scan rather than a binary search.
fn nearest_index(axis: &[f64], target: f64) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, &value) in axis.iter().enumerate() {
        let dist = (value - target).abs();
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}
