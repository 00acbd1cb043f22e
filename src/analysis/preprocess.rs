use crate::analysis::error::AnalysisError;

/// Drop the first `n` warm-up samples. Trimming past the end yields an empty
/// sequence; downstream stages report that as [`AnalysisError::EmptySequence`].
pub fn trim(samples: &[f64], n: usize) -> Vec<f64> {
    samples.get(n..).unwrap_or(&[]).to_vec()
}

/// Subtract the least-squares line fit of value against sample index.
///
/// Removes the DC offset and any linear drift in one pass, leaving only the
/// residual variation.
pub fn detrend(samples: &[f64]) -> Result<Vec<f64>, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::EmptySequence);
    }
    let (slope, intercept) = linear_fit(samples);
    Ok(samples
        .iter()
        .enumerate()
        .map(|(i, &value)| value - (slope * i as f64 + intercept))
        .collect())
}

/// Simple regression of value on sample index: (slope, intercept).
pub fn linear_fit(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = samples.iter().sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, &value) in samples.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (value - mean_y);
    }
    // a single sample has no slope to remove
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    (slope, mean_y - slope * mean_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_drops_prefix() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(trim(&samples, 2), vec![3.0, 4.0, 5.0]);
        assert_eq!(trim(&samples, 2).len(), samples.len() - 2);
    }

    #[test]
    fn trim_past_end_is_empty() {
        let samples = vec![1.0, 2.0];
        assert!(trim(&samples, 5).is_empty());
        assert!(trim(&samples, 2).is_empty());
    }

    #[test]
    fn detrend_removes_slope_and_offset() {
        // Ramp plus oscillation: the fit should strip the ramp entirely.
        let samples: Vec<f64> = (0..200)
            .map(|i| 3.0 + 0.25 * i as f64 + (0.3 * i as f64).sin())
            .collect();
        let detrended = detrend(&samples).unwrap();
        assert_eq!(detrended.len(), samples.len());
        let (slope, intercept) = linear_fit(&detrended);
        assert!(slope.abs() < 1e-9, "residual slope {slope}");
        assert!(intercept.abs() < 1e-9, "residual intercept {intercept}");
    }

    #[test]
    fn detrend_of_pure_line_is_zero() {
        let samples: Vec<f64> = (0..50).map(|i| -2.0 + 0.5 * i as f64).collect();
        let detrended = detrend(&samples).unwrap();
        assert!(detrended.iter().all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn detrend_rejects_empty_input() {
        assert!(matches!(detrend(&[]), Err(AnalysisError::EmptySequence)));
    }
}
