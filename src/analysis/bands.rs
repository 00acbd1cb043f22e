use crate::analysis::error::AnalysisError;
use crate::analysis::snr::PulseBand;

/// Parse one operator line of `start end start end ...` BPM boundaries into
/// structured bands. The SNR estimator itself never touches operator text.
pub fn parse_band_line(line: &str) -> Result<Vec<PulseBand>, AnalysisError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(AnalysisError::InvalidBandInput(
            "no band boundaries given".into(),
        ));
    }
    if tokens.len() % 2 != 0 {
        return Err(AnalysisError::InvalidBandInput(format!(
            "odd number of boundaries ({}); bands are start/end pairs",
            tokens.len()
        )));
    }
    tokens
        .chunks(2)
        .map(|pair| {
            Ok(PulseBand {
                start_bpm: parse_boundary(pair[0])?,
                end_bpm: parse_boundary(pair[1])?,
            })
        })
        .collect()
}

fn parse_boundary(token: &str) -> Result<f64, AnalysisError> {
    token
        .parse()
        .map_err(|_| AnalysisError::InvalidBandInput(format!("`{token}` is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs() {
        let bands = parse_band_line("60 84 130.5 150\n").unwrap();
        assert_eq!(
            bands,
            vec![
                PulseBand {
                    start_bpm: 60.0,
                    end_bpm: 84.0
                },
                PulseBand {
                    start_bpm: 130.5,
                    end_bpm: 150.0
                },
            ]
        );
    }

    #[test]
    fn odd_token_count_is_invalid() {
        assert!(matches!(
            parse_band_line("60 84 130"),
            Err(AnalysisError::InvalidBandInput(_))
        ));
    }

    #[test]
    fn empty_line_is_invalid() {
        assert!(matches!(
            parse_band_line("   \n"),
            Err(AnalysisError::InvalidBandInput(_))
        ));
    }

    #[test]
    fn non_numeric_token_is_invalid() {
        assert!(matches!(
            parse_band_line("sixty 84"),
            Err(AnalysisError::InvalidBandInput(_))
        ));
    }
}
