use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;

use crate::analysis::error::AnalysisError;
use crate::analysis::loader::ChannelTraces;
use crate::analysis::snr::{band_indices, PulseBand};
use crate::analysis::spectrum::Spectrum;

/// Reference plots cap the pulse axis at 360 BPM.
const PULSE_AXIS_MAX_BPM: f64 = 360.0;

#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            background: WHITE,
        }
    }
}

/// Three stacked time-domain panes, one per color channel.
pub fn render_traces_png(
    times_s: &[f64],
    traces: &ChannelTraces,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    if traces.is_empty() || times_s.len() != traces.len() {
        return Err(AnalysisError::Plot(
            "time axis and traces are empty or mismatched".into(),
        ));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let panes = root.split_evenly((3, 1));
        let channels: [(&str, &[f64], RGBColor); 3] = [
            ("red", &traces.red, RED),
            ("green", &traces.green, GREEN),
            ("blue", &traces.blue, BLUE),
        ];
        for (pane, (label, samples, color)) in panes.iter().zip(channels) {
            let y_min = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let y_max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let y_bounds = if (y_max - y_min).abs() < f64::EPSILON {
                (y_min - 1.0, y_max + 1.0)
            } else {
                (y_min, y_max)
            };
            let x_max = times_s.last().copied().unwrap_or(0.0).max(f64::EPSILON);
            let mut chart = ChartBuilder::on(pane)
                .margin(10)
                .caption(label, ("sans-serif", 16))
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 25)
                .build_cartesian_2d(0f64..x_max, y_bounds.0..y_bounds.1)?;
            chart
                .configure_mesh()
                .x_desc("Time [s]")
                .y_desc("Relative value")
                .draw()?;
            chart.draw_series(LineSeries::new(
                times_s.iter().copied().zip(samples.iter().copied()),
                &color,
            ))?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

/// Magnitude over the two-sided frequency axis.
pub fn render_spectrum_png(
    spectrum: &Spectrum,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    if spectrum.is_empty() {
        return Err(AnalysisError::Plot("spectrum has no magnitudes".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_min = spectrum
            .frequencies_hz
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let x_max = spectrum
            .frequencies_hz
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let y_max = spectrum
            .magnitudes
            .iter()
            .copied()
            .fold(0.0_f64, f64::max)
            .max(1e-3);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("Frequency components", ("sans-serif", 20))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Frequency [Hz]")
            .y_desc("Relative magnitude")
            .draw()?;
        chart.draw_series(LineSeries::new(
            spectrum
                .frequencies_hz
                .iter()
                .copied()
                .zip(spectrum.magnitudes.iter().copied()),
            &BLUE,
        ))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

/// Magnitude over the pulse axis, capped at 360 BPM, with any selected SNR
/// bands overdrawn as the signal portion.
pub fn render_pulse_png(
    pulse_axis: &[f64],
    magnitudes: &[f64],
    bands: &[PulseBand],
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    if pulse_axis.is_empty() || pulse_axis.len() != magnitudes.len() {
        return Err(AnalysisError::Plot(
            "pulse axis and magnitudes are empty or mismatched".into(),
        ));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let y_max = magnitudes.iter().copied().fold(0.0_f64, f64::max).max(1e-3);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("Pulse contents", ("sans-serif", 20))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0f64..PULSE_AXIS_MAX_BPM, 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Pulse [BPM]")
            .y_desc("Relative magnitude")
            .draw()?;
        let visible = |(bpm, _): &(f64, f64)| (0.0..=PULSE_AXIS_MAX_BPM).contains(bpm);
        let full = pulse_axis
            .iter()
            .copied()
            .zip(magnitudes.iter().copied())
            .filter(visible);
        chart
            .draw_series(LineSeries::new(full, &RED))?
            .label(if bands.is_empty() { "Spectrum" } else { "Noise" })
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
        for (i, band) in bands.iter().enumerate() {
            let (start_idx, end_idx) = band_indices(pulse_axis, band);
            if start_idx > end_idx {
                continue;
            }
            let series = pulse_axis[start_idx..=end_idx]
                .iter()
                .copied()
                .zip(magnitudes[start_idx..=end_idx].iter().copied())
                .filter(visible);
            let drawn = chart.draw_series(LineSeries::new(series, &BLUE))?;
            if i == 0 {
                drawn
                    .label("Signal")
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
            }
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK.mix(0.4))
            .background_style(&style.background.mix(0.8))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, AnalysisError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| AnalysisError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_traces() -> (Vec<f64>, ChannelTraces) {
        let times: Vec<f64> = (0..64).map(|i| i as f64 / 30.0).collect();
        let wave = |phase: f64| -> Vec<f64> {
            (0..64).map(|i| (i as f64 * 0.3 + phase).sin()).collect()
        };
        (
            times,
            ChannelTraces {
                red: wave(0.0),
                green: wave(0.5),
                blue: wave(1.0),
            },
        )
    }

    #[test]
    fn traces_plot_returns_png() {
        let (times, traces) = toy_traces();
        let png = render_traces_png(&times, &traces, &PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }

    #[test]
    fn spectrum_plot_returns_png() {
        let spectrum = Spectrum {
            frequencies_hz: vec![0.0, 1.0, 2.0, -2.0, -1.0],
            magnitudes: vec![0.1, 3.0, 0.4, 0.4, 3.0],
        };
        let png = render_spectrum_png(&spectrum, &PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }

    #[test]
    fn pulse_plot_highlights_bands() {
        let axis = vec![0.0, 60.0, 120.0, 180.0, -120.0, -60.0];
        let mags = vec![0.1, 2.0, 9.0, 2.0, 9.0, 2.0];
        let bands = [PulseBand {
            start_bpm: 110.0,
            end_bpm: 130.0,
        }];
        let png = render_pulse_png(&axis, &mags, &bands, &PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }

    #[test]
    fn mismatched_series_are_rejected() {
        let (times, traces) = toy_traces();
        assert!(matches!(
            render_traces_png(&times[..10], &traces, &PlotStyle::default()),
            Err(AnalysisError::Plot(_))
        ));
    }
}
