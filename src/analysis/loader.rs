use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::analysis::error::AnalysisError;

/// Equal-length red/green/blue intensity traces from one recording.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelTraces {
    pub red: Vec<f64>,
    pub green: Vec<f64>,
    pub blue: Vec<f64>,
}

impl ChannelTraces {
    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }
}

/// Load a recording: one line per frame, three space-separated intensities.
pub fn load_traces(path: impl AsRef<Path>) -> Result<ChannelTraces, AnalysisError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let traces = read_traces(BufReader::new(file))?;
    debug!("loaded {} frames from {}", traces.len(), path.display());
    Ok(traces)
}

/// Parse frames from any line-oriented reader. A line that does not split
/// into exactly three numeric fields (blank and trailing lines included)
/// fails the whole load; no partial traces escape.
pub fn read_traces(reader: impl BufRead) -> Result<ChannelTraces, AnalysisError> {
    let mut traces = ChannelTraces::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let number = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(AnalysisError::MalformedRecord {
                line: number,
                reason: format!("expected three numeric fields, found {}", fields.len()),
            });
        }
        let mut values = [0.0_f64; 3];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field.parse().map_err(|_| AnalysisError::MalformedRecord {
                line: number,
                reason: format!("`{field}` is not a number"),
            })?;
        }
        traces.red.push(values[0]);
        traces.green.push(values[1]);
        traces.blue.push(values[2]);
    }
    Ok(traces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_three_channels_per_line() {
        let input = "1.0 2.0 3.0\n4.5 5.5 6.5\n";
        let traces = read_traces(Cursor::new(input)).unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces.red, vec![1.0, 4.5]);
        assert_eq!(traces.green, vec![2.0, 5.5]);
        assert_eq!(traces.blue, vec![3.0, 6.5]);
    }

    #[test]
    fn two_field_line_is_malformed() {
        let input = "1.0 2.0 3.0\n4.0 5.0\n";
        let err = read_traces(Cursor::new(input)).unwrap_err();
        match err {
            AnalysisError::MalformedRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trailing_blank_line_is_malformed() {
        let input = "1.0 2.0 3.0\n\n";
        assert!(matches!(
            read_traces(Cursor::new(input)),
            Err(AnalysisError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let input = "1.0 two 3.0\n";
        assert!(matches!(
            read_traces(Cursor::new(input)),
            Err(AnalysisError::MalformedRecord { line: 1, .. })
        ));
    }
}
