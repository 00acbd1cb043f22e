// src/main.rs
mod analysis;
mod config;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use crate::analysis::{
    analyze, estimate_snr, load_traces, parse_band_line, render_pulse_png, render_spectrum_png,
    render_traces_png, PlotStyle, PulseBand,
};
use crate::config::AnalysisConfig;

fn main() -> Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        bail!("usage: pulsecam <samples.txt> [config.json]");
    };
    let config = match args.next() {
        Some(path) => AnalysisConfig::from_json_file(Path::new(&path))?,
        None => AnalysisConfig::default(),
    };

    let traces = load_traces(&input).with_context(|| format!("cannot load {input}"))?;
    info!("{input}: {} frames", traces.len());
    let analysis = analyze(&traces, &config)?;
    let style = PlotStyle::default();

    if config.show_time_plots {
        let png = render_traces_png(&analysis.times_s, &analysis.traces, &style)?;
        write_plot("traces.png", &png)?;
    }
    if config.show_fft_plot {
        let png = render_spectrum_png(&analysis.padded_spectrum, &style)?;
        write_plot("spectrum.png", &png)?;
    }
    if config.show_pulse_plot {
        let png = render_pulse_png(
            &analysis.pulse_axis_bpm,
            &analysis.padded_spectrum.magnitudes,
            &[],
            &style,
        )?;
        write_plot("pulse.png", &png)?;
    }

    println!("Recorded pulse was {} BPM", analysis.pulse_bpm);

    if config.compute_snr {
        let bands = prompt_for_bands()?;
        let snr = estimate_snr(
            &analysis.pulse_axis_bpm,
            &analysis.padded_spectrum.magnitudes,
            &bands,
        )?;
        if config.show_pulse_plot {
            let png = render_pulse_png(
                &analysis.pulse_axis_bpm,
                &analysis.padded_spectrum.magnitudes,
                &bands,
                &style,
            )?;
            write_plot("pulse_bands.png", &png)?;
        }
        println!(
            "SNR for the {} channel was {} ({} dB)",
            config.channel.label(),
            snr.linear,
            snr.db
        );
    }
    Ok(())
}

/// One line of `start end start end ...` BPM pairs from the operator.
fn prompt_for_bands() -> Result<Vec<PulseBand>> {
    print!("Give [start end start end ...] pulse bands in BPM for the SNR calculation\n :");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(parse_band_line(&line)?)
}

fn write_plot(name: &str, png: &[u8]) -> Result<()> {
    std::fs::write(name, png).with_context(|| format!("cannot write {name}"))?;
    info!("wrote {name}");
    Ok(())
}
