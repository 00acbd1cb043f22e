use log::debug;

use crate::analysis::bandpass::bandpass;
use crate::analysis::error::AnalysisError;
use crate::analysis::loader::ChannelTraces;
use crate::analysis::preprocess::{detrend, trim};
use crate::analysis::pulse::{extract_pulse_bpm, pulse_axis_bpm};
use crate::analysis::spectrum::{Spectrum, SpectrumBuilder};
use crate::config::{AnalysisConfig, Channel};

/// Everything the report and the plots need, as plain data.
#[derive(Clone, Debug)]
pub struct PulseAnalysis {
    /// Time axis for the processed traces, seconds.
    pub times_s: Vec<f64>,
    /// Traces after trim, detrend and (optionally) bandpass.
    pub traces: ChannelTraces,
    /// Unpadded spectrum of the selected channel, for diagnostics.
    pub raw_spectrum: Spectrum,
    /// Zero-padded spectrum of the selected channel.
    pub padded_spectrum: Spectrum,
    /// Padded frequency axis in BPM.
    pub pulse_axis_bpm: Vec<f64>,
    /// Estimated pulse rate.
    pub pulse_bpm: f64,
}

/// One forward pass over a recording: trim, detrend, band-limit, window,
/// transform, pick the spectral peak. Pure function of (traces, config);
/// SNR runs separately once the operator has supplied bands.
pub fn analyze(
    traces: &ChannelTraces,
    config: &AnalysisConfig,
) -> Result<PulseAnalysis, AnalysisError> {
    let prepare = |samples: &[f64]| -> Result<Vec<f64>, AnalysisError> {
        let detrended = detrend(&trim(samples, config.trim_count))?;
        if config.enable_bandpass {
            bandpass(&detrended, &config.filter_spec(), config.sample_rate_hz)
        } else {
            Ok(detrended)
        }
    };
    let traces = ChannelTraces {
        red: prepare(&traces.red)?,
        green: prepare(&traces.green)?,
        blue: prepare(&traces.blue)?,
    };
    debug!(
        "preprocessed {} frames (trim {}, bandpass {})",
        traces.len(),
        config.trim_count,
        config.enable_bandpass
    );

    let dt = config.sampling_period_s();
    let times_s: Vec<f64> = (0..traces.len()).map(|i| i as f64 * dt).collect();
    let selected = match config.channel {
        Channel::Red => &traces.red,
        Channel::Green => &traces.green,
        Channel::Blue => &traces.blue,
    };

    let builder = SpectrumBuilder::new(dt);
    let raw_spectrum = builder.compute(selected, selected.len())?;
    let padded_spectrum = builder.compute(selected, config.zero_pad_len)?;
    let pulse_axis = pulse_axis_bpm(&padded_spectrum.frequencies_hz);
    let pulse_bpm = extract_pulse_bpm(&pulse_axis, &padded_spectrum.magnitudes)?;
    debug!(
        "spectral peak on the {} channel at {pulse_bpm} BPM",
        config.channel.label()
    );

    Ok(PulseAnalysis {
        times_s,
        traces,
        raw_spectrum,
        padded_spectrum,
        pulse_axis_bpm: pulse_axis,
        pulse_bpm,
    })
}
