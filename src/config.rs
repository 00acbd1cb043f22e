use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::analysis::bandpass::{FilterSpec, DEFAULT_POLES};

/// Which color trace the pulse is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

/// One run's worth of analysis parameters. Every stage takes what it needs
/// from here explicitly; there is no ambient state.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub sample_rate_hz: f64,
    pub trim_count: usize,
    pub band_edges: (f64, f64),
    pub filter_poles: usize,
    pub channel: Channel,
    pub zero_pad_len: usize,
    pub enable_bandpass: bool,
    pub compute_snr: bool,
    pub show_time_plots: bool,
    pub show_fft_plot: bool,
    pub show_pulse_plot: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        // Recording convention: 30 fps camera, first ~3 s discarded as
        // warm-up, pulse assumed between 40 and 180 BPM (2/3 .. 3 Hz).
        Self {
            sample_rate_hz: 30.0,
            trim_count: 100,
            band_edges: (2.0 / 3.0, 3.0),
            filter_poles: DEFAULT_POLES,
            channel: Channel::Blue,
            zero_pad_len: 1 << 16,
            enable_bandpass: true,
            compute_snr: true,
            show_time_plots: true,
            show_fft_plot: false,
            show_pulse_plot: true,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open config file {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("cannot parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn sampling_period_s(&self) -> f64 {
        1.0 / self.sample_rate_hz
    }

    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            low_hz: self.band_edges.0,
            high_hz: self.band_edges.1,
            poles: self.filter_poles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_recording_convention() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sample_rate_hz, 30.0);
        assert_eq!(config.trim_count, 100);
        assert_eq!(config.channel, Channel::Blue);
        assert_eq!(config.zero_pad_len, 65536);
        assert!(config.enable_bandpass);
        assert!((config.band_edges.0 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn json_overrides_defaults() {
        let config: AnalysisConfig = serde_json::from_str(
            r#"{"channel": "green", "enable_bandpass": false, "zero_pad_len": 4096}"#,
        )
        .unwrap();
        assert_eq!(config.channel, Channel::Green);
        assert!(!config.enable_bandpass);
        assert_eq!(config.zero_pad_len, 4096);
        // untouched fields keep their defaults
        assert_eq!(config.trim_count, 100);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<AnalysisConfig>(r#"{"frames": 3}"#).is_err());
    }
}
