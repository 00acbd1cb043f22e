use std::f64::consts::TAU;

use rustfft::{num_complex::Complex64, FftPlanner};

use crate::analysis::error::AnalysisError;

/// Two-sided magnitude spectrum of one channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    pub frequencies_hz: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.frequencies_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies_hz.is_empty()
    }
}

/// Computes zero-padded magnitude spectra for a fixed sampling period.
pub struct SpectrumBuilder {
    sampling_period_s: f64,
}

impl SpectrumBuilder {
    pub fn new(sampling_period_s: f64) -> Self {
        Self { sampling_period_s }
    }

    /// Hann-window `samples`, zero-pad to `pad_len`, transform, and take the
    /// element-wise magnitude.
    ///
    /// `pad_len == samples.len()` gives the unpadded diagnostic spectrum;
    /// larger values interpolate the frequency axis for peak picking. A
    /// power of two is the cheap choice but not required.
    pub fn compute(&self, samples: &[f64], pad_len: usize) -> Result<Spectrum, AnalysisError> {
        let n = samples.len();
        if n == 0 {
            return Err(AnalysisError::EmptySequence);
        }
        if pad_len < n {
            return Err(AnalysisError::ZeroPadTooShort { pad: pad_len, len: n });
        }
        let window = hann_window(n);
        let mut buffer: Vec<Complex64> = samples
            .iter()
            .zip(&window)
            .map(|(&v, &w)| Complex64::new(v * w, 0.0))
            .collect();
        buffer.resize(pad_len, Complex64::ZERO);
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(pad_len);
        fft.process(&mut buffer);
        Ok(Spectrum {
            frequencies_hz: fft_frequencies(pad_len, self.sampling_period_s),
            magnitudes: buffer.iter().map(|c| c.norm()).collect(),
        })
    }
}

/// Hann window: `0.5 - 0.5*cos(2*pi*i/(n-1))`, tapering both ends to zero.
pub fn hann_window(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| 0.5 - 0.5 * (TAU * i as f64 / (n as f64 - 1.0)).cos())
        .collect()
}

/// Two-sided FFT frequency axis: bin `k` maps to `k/(len*dt)` up to the
/// midpoint and to `(k-len)/(len*dt)` above it, so negative frequencies
/// occupy the upper half.
pub fn fft_frequencies(len: usize, sampling_period_s: f64) -> Vec<f64> {
    let step = 1.0 / (len as f64 * sampling_period_s);
    (0..len)
        .map(|k| {
            if k <= len / 2 {
                k as f64 * step
            } else {
                (k as f64 - len as f64) * step
            }
        })
        .collect()
}
