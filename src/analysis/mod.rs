// src/analysis/mod.rs
pub mod bandpass;
pub mod bands;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod plot;
pub mod preprocess;
pub mod pulse;
pub mod snr;
pub mod spectrum;

pub use bandpass::{bandpass, FilterSpec};
pub use bands::parse_band_line;
pub use error::AnalysisError;
pub use loader::{load_traces, ChannelTraces};
pub use pipeline::{analyze, PulseAnalysis};
pub use plot::{render_pulse_png, render_spectrum_png, render_traces_png, PlotStyle};
pub use preprocess::{detrend, trim};
pub use pulse::{extract_pulse_bpm, pulse_axis_bpm};
pub use snr::{estimate_snr, PulseBand, SnrReport};
pub use spectrum::{hann_window, Spectrum, SpectrumBuilder};
