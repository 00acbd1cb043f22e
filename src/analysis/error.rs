use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error(
        "invalid bandpass edges ({low_hz} Hz, {high_hz} Hz): need 0 < low < high < Nyquist ({nyquist_hz} Hz)"
    )]
    InvalidFilterSpec {
        low_hz: f64,
        high_hz: f64,
        nyquist_hz: f64,
    },
    #[error("sample sequence is empty")]
    EmptySequence,
    #[error("zero-pad length {pad} is shorter than the sequence length {len}")]
    ZeroPadTooShort { pad: usize, len: usize },
    #[error("selected bands leave no noise energy; SNR is undefined")]
    DegenerateSnr,
    #[error("invalid band input: {0}")]
    InvalidBandInput(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for AnalysisError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        AnalysisError::Plot(format!("{value:?}"))
    }
}

impl From<image::ImageError> for AnalysisError {
    fn from(value: image::ImageError) -> Self {
        AnalysisError::Plot(value.to_string())
    }
}
